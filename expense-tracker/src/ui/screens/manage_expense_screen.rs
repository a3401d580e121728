use ratatui::{
    layout::Margin,
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{FormField, LoadingState, ManageExpenseState, SubmissionState};
use crate::ui::{
    components::{error_overlay, help_bar, input_field::InputField, loading_overlay, screen_title},
    layouts, theme,
};

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input values - please check your entered data!";

pub fn render(f: &mut Frame, state: &ManageExpenseState) {
    // Submitting replaces the whole screen
    if let SubmissionState::Submitting = state.submission {
        loading_overlay::render_loading_overlay(f, "Saving...", &state.throbber);
        return;
    }

    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(f, title_area, state.title(), &LoadingState::NotStarted);
    render_form(f, content_area, state);

    let help = if state.is_editing() {
        help_bar::HELP_TEXT_MANAGE_EDIT
    } else {
        help_bar::HELP_TEXT_MANAGE_ADD
    };
    help_bar::render_help_bar(f, help_area, help);

    if let SubmissionState::Error(message) = &state.submission {
        error_overlay::render_error_overlay(f, message);
    }
}

fn render_form(f: &mut Frame, area: Rect, state: &ManageExpenseState) {
    let block = Block::default().borders(Borders::ALL).title("Your Expense");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let form = &state.form;
    let areas = layouts::form_layout(inner.inner(Margin::new(1, 0)));

    for (field, field_area) in FormField::ALL.into_iter().zip(areas.fields) {
        InputField::for_form(field, form.field(field), form.focused).render(f, field_area);
    }

    if form.is_invalid() {
        f.render_widget(
            Paragraph::new(INVALID_INPUT_MESSAGE)
                .style(theme::error_banner_style())
                .alignment(Alignment::Center),
            areas.banner,
        );
    }

    f.render_widget(
        Paragraph::new(format!("[ {} ]", form.submit_label()))
            .style(theme::title_style())
            .alignment(Alignment::Center),
        areas.submit,
    );
}
