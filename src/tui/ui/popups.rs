//! Modal dialogs: help, delete confirmation and error alert.

use crate::tui::app::{App, CONFIRM_DELETE};
use crate::tui::help_text;
use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

use super::util::{popup_area, truncate_to_width};

/// Render the help popup with keyboard shortcuts
pub fn render_help_popup(frame: &mut Frame, app: &App, area: Rect) {
    // Min 40 cols for readability, min 10 rows for usable scroll area
    let popup_area = popup_area(area, 70, 80, 40, 10);
    let theme = &app.theme;

    frame.render_widget(Clear, popup_area);

    let help_lines = help_text::build_help_text(&app.keybindings, theme);
    let help_text_len = help_lines.len();

    let paragraph = Paragraph::new(help_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(" Help ")
                .style(theme.modal_style()),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, popup_area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .style(theme.border_style());
    let mut scrollbar_state = ScrollbarState::new(help_text_len).position(app.help_scroll as usize);

    frame.render_stateful_widget(
        scrollbar,
        popup_area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

/// Ask before removing `label`
pub fn render_delete_confirm(frame: &mut Frame, label: &str, theme: &Theme) {
    // Min 30 cols for the question, min 7 rows for dialog content
    let area = popup_area(frame.area(), 50, 20, 30, 7);
    frame.render_widget(Clear, area);

    let label = truncate_to_width(label, area.width.saturating_sub(4) as usize);
    let text = vec![
        Line::from(Span::styled(
            CONFIRM_DELETE,
            Style::default()
                .fg(theme.title_bar_fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(label, Style::default().fg(theme.bookmark_fg))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", Style::default().fg(theme.indicator_fg)),
            Span::styled(" Delete  ", Style::default().fg(theme.url_fg)),
            Span::styled("[n/Esc]", Style::default().fg(theme.indicator_fg)),
            Span::styled(" Cancel", Style::default().fg(theme.url_fg)),
        ]),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Confirm ")
            .title_style(Style::default().fg(theme.title_bar_fg))
            .border_style(theme.border_style())
            .style(theme.modal_style()),
    );

    frame.render_widget(paragraph, area);
}

/// Error dialog that stays until dismissed
pub fn render_alert(frame: &mut Frame, message: &str, theme: &Theme) {
    let area = popup_area(frame.area(), 40, 20, 30, 6);
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(theme.error_fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(theme.indicator_fg)),
            Span::styled(" OK", Style::default().fg(theme.url_fg)),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Error ")
                .title_style(Style::default().fg(theme.error_fg))
                .border_style(Style::default().fg(theme.error_fg))
                .style(theme.modal_style()),
        );

    frame.render_widget(paragraph, area);
}
