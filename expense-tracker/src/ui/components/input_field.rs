use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::{FieldInput, FormField};
use crate::ui::theme;

/// A labeled single-line text input.
///
/// Purely presentational: the border turns red when the field is marked
/// invalid and highlights when focused; a cursor follows the text while focused.
pub struct InputField<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub is_valid: bool,
    pub is_focused: bool,
}

impl<'a> InputField<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            is_valid: true,
            is_focused: false,
        }
    }

    /// Field of the expense form, with its label, placeholder and validity
    pub fn for_form(field: FormField, input: &'a FieldInput, focused: FormField) -> Self {
        Self::new(field.label(), &input.value)
            .placeholder(field.placeholder())
            .valid(input.is_valid)
            .focused(field == focused)
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn valid(mut self, is_valid: bool) -> Self {
        self.is_valid = is_valid;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.is_focused = focused;
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.label)
            .border_style(theme::input_border_style(self.is_focused, self.is_valid));

        let content = if self.value.is_empty() {
            Span::styled(self.placeholder, theme::placeholder_style())
        } else {
            Span::styled(self.value, theme::form_field_style())
        };

        let inner = block.inner(area);
        f.render_widget(Paragraph::new(Line::from(content)).block(block), area);

        if self.is_focused && inner.width > 0 {
            let offset = (self.value.chars().count() as u16).min(inner.width - 1);
            f.set_cursor_position((inner.x + offset, inner.y));
        }
    }
}
