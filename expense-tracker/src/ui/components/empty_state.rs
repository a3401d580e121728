//! Bordered placeholder for lists with nothing to show.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Text},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::ui::theme;

/// `message` centered in a titled box, with an optional `hint` underneath
pub fn render_empty_state(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    hint: Option<&str>,
) {
    let mut text = Text::from(vec![
        Line::default(),
        Line::styled(message, theme::loading_style()),
    ]);
    if let Some(hint) = hint {
        text.extend([Line::default(), Line::styled(hint, theme::help_text_style())]);
    }

    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        area,
    );
}
