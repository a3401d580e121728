//! Centralized theme constants and style functions for consistent UI styling.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Colors
// =============================================================================

/// Color for amounts and totals
pub const COLOR_AMOUNT: Color = Color::Green;

/// Color for errors, invalid input and destructive actions
pub const COLOR_NEGATIVE: Color = Color::Red;

/// Background color for selected/highlighted rows
pub const COLOR_SELECTION_BG: Color = Color::DarkGray;

/// Color for table headers
pub const COLOR_HEADER: Color = Color::Yellow;

/// Color for help text and secondary information
pub const COLOR_HELP_TEXT: Color = Color::Gray;

/// Color for placeholders and muted log levels
pub const COLOR_MUTED: Color = Color::DarkGray;

/// Color for screen titles and accent text
pub const COLOR_TITLE: Color = Color::Cyan;

/// Color for loading/status messages
pub const COLOR_LOADING: Color = Color::Yellow;

/// Border color for error overlays
pub const COLOR_BORDER_DANGER: Color = Color::Red;

/// Border color for accent/highlighted elements
pub const COLOR_BORDER_ACCENT: Color = Color::Cyan;

/// Border color for the focused input field
pub const COLOR_INPUT_FOCUSED: Color = Color::Yellow;

// =============================================================================
// Layout Constants
// =============================================================================

/// Standard margin around screen content
pub const SCREEN_MARGIN: u16 = 2;

/// Height of the title/header area
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the period/total line above the expenses table
pub const SUMMARY_HEIGHT: u16 = 3;

/// Height of the help bar at the bottom
pub const HELP_BAR_HEIGHT: u16 = 3;

/// Height of one bordered input field
pub const INPUT_FIELD_HEIGHT: u16 = 3;

/// Standard column spacing for tables
pub const TABLE_COLUMN_SPACING: u16 = 2;

// =============================================================================
// Style Functions
// =============================================================================

/// Style for selected/highlighted rows in tables and lists
pub fn selection_style() -> Style {
    Style::default()
        .bg(COLOR_SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

/// Style for table headers
pub fn header_style() -> Style {
    Style::default()
        .fg(COLOR_HEADER)
        .add_modifier(Modifier::BOLD)
}

/// Style for help bar text
pub fn help_text_style() -> Style {
    Style::default().fg(COLOR_HELP_TEXT)
}

/// Style for screen titles
pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_TITLE)
        .add_modifier(Modifier::BOLD)
}

/// Style for loading/status messages
pub fn loading_style() -> Style {
    Style::default().fg(COLOR_LOADING)
}

pub fn amount_style() -> Style {
    Style::default().fg(COLOR_AMOUNT)
}

pub fn placeholder_style() -> Style {
    Style::default().fg(COLOR_MUTED)
}

/// Text style inside an input field
pub fn form_field_style() -> Style {
    Style::default().fg(Color::White)
}

/// Border of an input field, by focus and validity
pub fn input_border_style(focused: bool, is_valid: bool) -> Style {
    match (is_valid, focused) {
        (false, true) => Style::default()
            .fg(COLOR_NEGATIVE)
            .add_modifier(Modifier::BOLD),
        (false, false) => Style::default().fg(COLOR_NEGATIVE),
        (true, true) => Style::default()
            .fg(COLOR_INPUT_FOCUSED)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(COLOR_HELP_TEXT),
    }
}

/// Inline banner under an invalid form
pub fn error_banner_style() -> Style {
    Style::default()
        .bg(COLOR_NEGATIVE)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for danger/warning borders
pub fn danger_border_style() -> Style {
    Style::default()
        .fg(COLOR_BORDER_DANGER)
        .add_modifier(Modifier::BOLD)
}

/// Style for accent borders
pub fn accent_border_style() -> Style {
    Style::default().fg(COLOR_BORDER_ACCENT)
}
