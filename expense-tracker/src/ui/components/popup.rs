//! Centered modal frame shared by the help popup and error overlays.

use ratatui::prelude::Rect;
use ratatui::{
    style::Style,
    text::Line,
    widgets::{Block, Clear},
    Frame,
};

use crate::ui::layouts;

/// Clear a centered box of `size` (width %, height %) inside `parent_area`,
/// draw its border and title, and return the area inside the border.
pub fn render_popup_frame(
    f: &mut Frame,
    parent_area: Rect,
    size: (u16, u16),
    title: &str,
    border_style: Style,
) -> Rect {
    let (percent_x, percent_y) = size;
    let area = layouts::centered_popup(percent_x, percent_y, parent_area);

    let block = Block::bordered()
        .title(Line::from(title).centered())
        .border_style(border_style);
    let inner = block.inner(area);

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    inner
}
