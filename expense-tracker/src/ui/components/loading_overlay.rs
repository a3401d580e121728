//! Full-screen spinner shown while a write is in flight.

use ratatui::{
    layout::{Constraint, Flex, Layout},
    widgets::Clear,
    Frame,
};
use throbber_widgets_tui::{Throbber, ThrobberState, BRAILLE_EIGHT};

use crate::ui::theme;

pub fn render_loading_overlay(f: &mut Frame, label: &str, throbber_state: &ThrobberState) {
    let area = f.area();
    f.render_widget(Clear, area);

    let width = label.chars().count() as u16 + 2;
    let [row] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    let throbber = Throbber::default()
        .label(label)
        .style(theme::loading_style())
        .throbber_style(theme::title_style())
        .throbber_set(BRAILLE_EIGHT);

    f.render_stateful_widget(throbber, cell, &mut throbber_state.clone());
}
