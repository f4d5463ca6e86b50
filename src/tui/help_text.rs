use crate::keybindings::{KeybindingMode, Keybindings};
use crate::tui::theme::Theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Key column width for keybindings
const KEY_COLUMN_WIDTH: usize = 14;

const FOOTER: &str = "Use j/k or ↓/↑ to scroll | Press Esc or ? to close";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpLine {
    Title(String),
    Description(String),
    SectionHeader(String),
    KeyBinding { key: String, desc: String },
    Note(String),
    Blank,
}

impl HelpLine {
    /// Convert this help line to a styled ratatui Line
    pub fn to_line(&self, theme: &Theme) -> Line<'static> {
        match self {
            HelpLine::Title(text) => Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(theme.title_bar_fg)
                    .add_modifier(Modifier::BOLD),
            )),
            HelpLine::Description(text) => Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(theme.url_fg)
                    .add_modifier(Modifier::ITALIC),
            )),
            HelpLine::SectionHeader(text) => Line::from(Span::styled(
                text.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            HelpLine::KeyBinding { key, desc } => {
                let formatted_key = format!("  {:<width$}", key, width = KEY_COLUMN_WIDTH);
                Line::from(vec![
                    Span::styled(formatted_key, Style::default().fg(theme.indicator_fg)),
                    Span::raw(desc.clone()),
                ])
            }
            HelpLine::Note(text) => Line::from(vec![
                Span::styled(
                    "Note: ",
                    Style::default()
                        .fg(theme.search_match_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(text.clone(), Style::default().fg(theme.url_fg)),
            ]),
            HelpLine::Blank => Line::from(""),
        }
    }
}

/// Help content generated from the active keybindings, so user overrides
/// show up here too.
pub fn help_lines(keybindings: &Keybindings) -> Vec<HelpLine> {
    let mut lines = vec![
        HelpLine::Title("bookmarktree - Keyboard Shortcuts".to_string()),
        HelpLine::Description(FOOTER.to_string()),
        HelpLine::Blank,
    ];

    for mode in KeybindingMode::ALL {
        let entries = keybindings.help_entries(mode);
        if entries.is_empty() {
            continue;
        }

        lines.push(HelpLine::SectionHeader(format!("{} mode", mode.display_name())));
        let mut category = "";
        for (action, keys) in entries {
            if action.category() != category {
                category = action.category();
                lines.push(HelpLine::Description(format!(" {}", category)));
            }
            lines.push(HelpLine::KeyBinding {
                key: keys.join(", "),
                desc: action.description().to_string(),
            });
        }
        lines.push(HelpLine::Blank);
    }

    lines.push(HelpLine::Note(
        "Search matches titles, URLs and folder names; folders open to show matches".to_string(),
    ));
    lines.push(HelpLine::Note(
        "On Linux, install a clipboard manager (clipit, parcellite, xclip) for best results"
            .to_string(),
    ));
    lines.push(HelpLine::Blank);
    lines.push(HelpLine::Description(FOOTER.to_string()));
    lines
}

/// Build the help text with theme colors applied
pub fn build_help_text(keybindings: &Keybindings, theme: &Theme) -> Vec<Line<'static>> {
    help_lines(keybindings)
        .iter()
        .map(|line| line.to_line(theme))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_mode() {
        let lines = help_lines(&Keybindings::default());
        for mode in KeybindingMode::ALL {
            let header = HelpLine::SectionHeader(format!("{} mode", mode.display_name()));
            assert!(lines.contains(&header), "missing section for {:?}", mode);
        }
    }

    #[test]
    fn test_help_shows_delete_binding() {
        let lines = help_lines(&Keybindings::default());
        let delete = lines.iter().find_map(|line| match line {
            HelpLine::KeyBinding { key, desc } if desc == "Delete bookmark" => {
                Some(key.clone())
            }
            _ => None,
        });
        let keys = delete.expect("delete binding listed");
        assert!(keys.split(", ").any(|k| k == "d"));
    }
}
