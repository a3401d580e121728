//! Shared help bar component for consistent bottom navigation hints.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Render a standard help bar with the given text.
pub fn render_help_bar(f: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text)
        .style(theme::help_text_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, area);
}

pub const HELP_TEXT_EXPENSES: &str =
    "a: add | Enter: edit | Tab: recent/all | r: refresh | ?: help | q: quit";

pub const HELP_TEXT_MANAGE_ADD: &str = "Tab/↓: next field | Enter: add | Esc: cancel";

pub const HELP_TEXT_MANAGE_EDIT: &str =
    "Tab/↓: next field | Enter: update | Ctrl-D: delete | Esc: cancel";
