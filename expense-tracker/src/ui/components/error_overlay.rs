//! Full-screen error state. The message is fixed per failure kind; details go to the log.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::{layouts, theme};

pub const DISMISS_HINT: &str = "Press Enter or Esc to continue";

pub fn render_error_overlay(f: &mut Frame, message: &str) {
    f.render_widget(Clear, f.area());

    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::MEDIUM,
        " An error occurred ",
        theme::danger_border_style(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let message = Paragraph::new(Line::from(Span::styled(
        message,
        theme::loading_style().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(message, chunks[0]);

    let hint = Paragraph::new(DISMISS_HINT)
        .style(theme::help_text_style())
        .alignment(Alignment::Center);
    f.render_widget(hint, chunks[2]);
}
