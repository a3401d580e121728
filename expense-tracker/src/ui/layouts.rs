//! Reusable layout builders for consistent screen structure.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{
    HELP_BAR_HEIGHT, INPUT_FIELD_HEIGHT, SCREEN_MARGIN, SUMMARY_HEIGHT, TITLE_HEIGHT,
};

/// Standard screen layout with title, content area, and help bar.
///
/// Returns a tuple of (title_area, content_area, help_area)
pub fn screen_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(10),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Screen layout with a summary strip above the content.
///
/// Returns a tuple of (title_area, summary_area, content_area, help_area)
pub fn screen_layout_with_summary(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(SUMMARY_HEIGHT),
            Constraint::Min(5),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2], chunks[3])
}

/// Split a title area into title text and loading indicator.
///
/// Returns (title_text_area, loading_indicator_area)
pub fn title_with_loading(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Areas of the expense form: one per field, then the banner and the submit line
pub struct FormAreas {
    pub fields: [Rect; 3],
    pub banner: Rect,
    pub submit: Rect,
}

pub fn form_layout(area: Rect) -> FormAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(INPUT_FIELD_HEIGHT),
            Constraint::Length(INPUT_FIELD_HEIGHT),
            Constraint::Length(INPUT_FIELD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    FormAreas {
        fields: [chunks[0], chunks[1], chunks[2]],
        banner: chunks[4],
        submit: chunks[5],
    }
}

/// Create a centered popup rectangle.
///
/// # Arguments
/// * `percent_x` - Width as percentage of parent (0-100)
/// * `percent_y` - Height as percentage of parent (0-100)
/// * `area` - The parent area to center within
pub fn centered_popup(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Standard popup sizes
pub mod popup_sizes {
    /// Medium popup (60% x 30%) - for messages with a hint
    pub const MEDIUM: (u16, u16) = (60, 30);

    /// Large popup (80% x 80%) - for the help screen
    pub const LARGE: (u16, u16) = (80, 80);
}
