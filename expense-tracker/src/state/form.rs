//! Local state of the expense form.
//!
//! The form owns one [`FieldInput`] per [`FormField`]. Edits only overwrite raw
//! text; validity is recomputed exclusively by [`ExpenseForm::submit`], so an
//! untouched or freshly seeded form never shows errors.

use super::validators;
use crate::utils::dates;
use expense_api::endpoints::expenses::{Expense, ExpenseData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Amount,
    Date,
    Description,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Amount, FormField::Date, FormField::Description];

    pub fn next(self) -> Self {
        match self {
            FormField::Amount => FormField::Date,
            FormField::Date => FormField::Description,
            FormField::Description => FormField::Amount,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Amount => FormField::Description,
            FormField::Date => FormField::Amount,
            FormField::Description => FormField::Date,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Amount => "Amount",
            FormField::Date => "Date",
            FormField::Description => "Description",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Amount => "0.00",
            FormField::Date => "YYYY-MM-DD",
            FormField::Description => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInput {
    pub value: String,
    pub is_valid: bool,
}

impl FieldInput {
    fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_valid: true,
        }
    }
}

/// Seed values the form starts from and resets to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDefaults {
    pub amount: String,
    pub date: String,
    pub description: String,
}

impl From<&Expense> for FormDefaults {
    fn from(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.to_string(),
            date: dates::format_date(expense.date),
            description: expense.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    amount: FieldInput,
    date: FieldInput,
    description: FieldInput,
    defaults: FormDefaults,
    submit_label: &'static str,
    pub focused: FormField,
}

impl ExpenseForm {
    pub fn new(defaults: Option<FormDefaults>, submit_label: &'static str) -> Self {
        let defaults = defaults.unwrap_or_default();
        Self {
            amount: FieldInput::new(defaults.amount.clone()),
            date: FieldInput::new(defaults.date.clone()),
            description: FieldInput::new(defaults.description.clone()),
            defaults,
            submit_label,
            focused: FormField::Amount,
        }
    }

    pub fn field(&self, field: FormField) -> &FieldInput {
        match field {
            FormField::Amount => &self.amount,
            FormField::Date => &self.date,
            FormField::Description => &self.description,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut FieldInput {
        match field {
            FormField::Amount => &mut self.amount,
            FormField::Date => &mut self.date,
            FormField::Description => &mut self.description,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        self.submit_label
    }

    /// Overwrite one field's raw text. Validity is left as it was.
    pub fn input_changed(&mut self, field: FormField, value: impl Into<String>) {
        self.field_mut(field).value = value.into();
    }

    pub fn push_char(&mut self, c: char) {
        let field = self.focused;
        let mut value = self.field(field).value.clone();
        value.push(c);
        self.input_changed(field, value);
    }

    pub fn pop_char(&mut self) {
        let field = self.focused;
        let mut value = self.field(field).value.clone();
        value.pop();
        self.input_changed(field, value);
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_previous(&mut self) {
        self.focused = self.focused.previous();
    }

    /// True when the last submit attempt failed validation
    pub fn is_invalid(&self) -> bool {
        FormField::ALL.iter().any(|f| !self.field(*f).is_valid)
    }

    /// Validate every field and return the normalized record when all pass.
    ///
    /// On failure each field's validity flag is updated and nothing is returned.
    /// The form never clears itself here.
    pub fn submit(&mut self) -> Option<ExpenseData> {
        let amount = validators::parse_amount(&self.amount.value);
        let date = validators::parse_date(&self.date.value);
        let description = validators::normalize_description(&self.description.value);

        self.amount.is_valid = validators::is_valid_amount(amount);
        self.date.is_valid = date.is_some();
        self.description.is_valid = validators::is_valid_description(&description);

        if self.is_invalid() {
            tracing::debug!(
                "Expense form rejected: amount={}, date={}, description={}",
                self.amount.is_valid,
                self.date.is_valid,
                self.description.is_valid
            );
            return None;
        }

        Some(ExpenseData::new(amount, date?, description))
    }

    /// Discard edits and validity flags, returning to the seeded values
    pub fn reset(&mut self) {
        *self = Self::new(Some(self.defaults.clone()), self.submit_label);
    }
}
