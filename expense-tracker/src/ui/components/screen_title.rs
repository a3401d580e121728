//! Screen title with a status glyph on the right.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};
use throbber_widgets_tui::{Throbber, BRAILLE_EIGHT};

use crate::state::LoadingState;
use crate::ui::{layouts, theme};

pub fn render_screen_title(f: &mut Frame, area: Rect, title: &str, loading_state: &LoadingState) {
    let (title_area, indicator_area) = layouts::title_with_loading(area);

    f.render_widget(Paragraph::new(title).style(theme::title_style()), title_area);

    let (glyph, color) = match loading_state {
        LoadingState::NotStarted => return,
        LoadingState::Loading(throbber_state) => {
            let throbber = Throbber::default().throbber_set(BRAILLE_EIGHT);
            f.render_stateful_widget(throbber, indicator_area, &mut throbber_state.clone());
            return;
        }
        LoadingState::Loaded => ("✓", Color::Green),
        LoadingState::Error(_) => ("x", theme::COLOR_NEGATIVE),
    };

    f.render_widget(
        Paragraph::new(Span::styled(glyph, Style::default().fg(color))).alignment(Alignment::Right),
        indicator_area,
    );
}
