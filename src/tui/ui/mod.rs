mod popups;
mod util;

use crate::bookmarks::SegmentKind;
use crate::keybindings::Action;
use crate::tui::app::{App, AppMode, DELETE_FAILED, LOAD_FAILED, NO_RESULTS, TreeContent};
use crate::tui::theme::Theme;
use crate::tui::tree::{TreeRow, TreeView};
use popups::{render_alert, render_delete_confirm, render_help_popup};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use unicode_width::UnicodeWidthStr;
use util::truncate_to_width;

const FOLDER_ICON: &str = "📁 ";
const BOOKMARK_ICON: &str = "🔖 ";

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let show_search_bar =
        app.search_enabled && (app.mode == AppMode::Search || !app.search_query.is_empty());
    let search_height = if show_search_bar { 3 } else { 0 };
    let [title_area, search_area, tree_area, status_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(search_height),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_title_bar(frame, app, title_area);
    if show_search_bar {
        render_search_bar(frame, app, search_area);
    }
    render_tree(frame, app, tree_area);
    render_status_bar(frame, app, status_area);

    match app.mode {
        AppMode::Help => render_help_popup(frame, app, area),
        AppMode::ConfirmDelete => {
            if let Some(pending) = &app.pending_delete {
                render_delete_confirm(frame, &pending.label, &app.theme);
            }
        }
        AppMode::Alert => {
            if let Some(message) = &app.alert {
                render_alert(frame, message, &app.theme);
            }
        }
        AppMode::Normal | AppMode::Search => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title_text = format!(
        "bookmarktree - {} - {} bookmarks",
        app.source(),
        app.bookmark_count()
    );

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title_bar_fg)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let typing = app.mode == AppMode::Search;

    let mut spans = vec![Span::raw(app.search_query.clone())];
    if typing {
        spans.push(Span::styled(
            "█",
            Style::default().fg(theme.indicator_fg),
        ));
    }

    let border_color = if typing {
        theme.search_match_bg
    } else {
        theme.border
    };
    let paragraph = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(" Search "),
        )
        .style(theme.content_style());

    frame.render_widget(paragraph, area);
}

fn render_tree(frame: &mut Frame, app: &mut App, area: Rect) {
    app.viewport_height = area.height.saturating_sub(2) as usize;
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Bookmarks ");

    match app.content() {
        TreeContent::Nothing => {
            let text = if app.is_loading() {
                "Loading bookmarks…"
            } else {
                ""
            };
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(theme.placeholder_fg).bg(theme.background))
                .block(block);
            frame.render_widget(paragraph, area);
        }
        TreeContent::NoResults => {
            let paragraph = Paragraph::new(NO_RESULTS)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.placeholder_fg).bg(theme.background))
                .block(block);
            frame.render_widget(paragraph, area);
        }
        TreeContent::Rows(view) => {
            // Inner width minus the highlight symbol
            let width = area.width.saturating_sub(4) as usize;
            let items: Vec<ListItem<'static>> = app
                .visible_rows()
                .into_iter()
                .map(|row| ListItem::new(row_line(row, view, theme, app.show_urls, width)))
                .collect();

            let list = List::new(items)
                .block(block)
                .style(theme.content_style())
                .highlight_style(theme.selection_style())
                .highlight_symbol("► ");

            frame.render_stateful_widget(list, area, &mut app.list_state);
        }
    }
}

fn row_line(row: &TreeRow, view: &TreeView, theme: &Theme, show_urls: bool, width: usize) -> Line<'static> {
    let mut spans = vec![Span::raw("  ".repeat(row.depth))];

    match view.indicator(row) {
        Some(glyph) => spans.push(Span::styled(
            format!("{} ", glyph),
            Style::default().fg(theme.indicator_fg),
        )),
        None => spans.push(Span::raw("  ")),
    }

    let (icon, base) = if row.is_folder() {
        (
            FOLDER_ICON,
            Style::default()
                .fg(theme.folder_fg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (BOOKMARK_ICON, Style::default().fg(theme.bookmark_fg))
    };
    spans.push(Span::raw(icon));

    for segment in &row.label {
        let style = match segment.kind {
            SegmentKind::Plain => base,
            SegmentKind::Match => theme.match_style(),
        };
        spans.push(Span::styled(segment.text.clone(), style));
    }

    if show_urls && let Some(url) = row.url() {
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let room = width.saturating_sub(used + 2);
        if room > 3 {
            spans.push(Span::styled(
                format!("  {}", truncate_to_width(url, room)),
                Style::default().fg(theme.url_fg),
            ));
        }
    }

    Line::from(spans)
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(ref msg) = app.status_message {
        let style = if msg == LOAD_FAILED || msg == DELETE_FAILED {
            app.theme
                .status_bar_style()
                .fg(app.theme.error_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            app.theme.status_bar_style().add_modifier(Modifier::BOLD)
        };
        frame.render_widget(Paragraph::new(format!(" {}", msg)).style(style), area);
        return;
    }

    let hints = status_hints(app);

    let total = app.visible_rows().len();
    let position = app.list_state.selected().map_or(0, |i| i + 1);
    let status_text = format!(
        " [{}] {}/{} • {} • Theme:{} ",
        mode_label(app.mode),
        position,
        total,
        hints,
        app.current_theme
    );

    frame.render_widget(
        Paragraph::new(status_text).style(app.theme.status_bar_style()),
        area,
    );
}

/// `key:Label` pairs for the current mode, using the first key bound to each action.
fn status_hints(app: &App) -> String {
    use Action::*;

    let actions: &[(Action, &str)] = match app.mode {
        AppMode::Normal => &[
            (ToggleExpand, "Toggle"),
            (OpenBookmark, "Open"),
            (CopyUrl, "Copy"),
            (DeleteBookmark, "Delete"),
            (EnterSearchMode, "Search"),
            (Refresh, "Refresh"),
            (CycleTheme, "Theme"),
            (ToggleHelp, "Help"),
        ],
        AppMode::Search => &[
            (Next, "Down"),
            (Previous, "Up"),
            (ExitMode, "Done"),
            (ClearSearch, "Clear"),
        ],
        AppMode::ConfirmDelete => &[(ConfirmAction, "Delete"), (CancelAction, "Cancel")],
        AppMode::Alert => &[(ConfirmAction, "Dismiss")],
        AppMode::Help => &[
            (HelpScrollDown, "Down"),
            (HelpScrollUp, "Up"),
            (ToggleHelp, "Close"),
        ],
    };

    let mode = app.mode.keybinding_mode();
    let hints: Vec<String> = actions
        .iter()
        .filter_map(|(action, label)| {
            app.keybindings
                .keys_for_action(mode, *action)
                .into_iter()
                .next()
                .map(|key| format!("{}:{}", key, label))
        })
        .collect();

    let hints = hints.join(" • ");
    if app.mode == AppMode::Search {
        format!("Type to filter • {}", hints)
    } else {
        hints
    }
}

fn mode_label(mode: AppMode) -> &'static str {
    match mode {
        AppMode::Normal => "NORMAL",
        AppMode::Search => "SEARCH",
        AppMode::ConfirmDelete => "CONFIRM",
        AppMode::Alert => "ERROR",
        AppMode::Help => "HELP",
    }
}
