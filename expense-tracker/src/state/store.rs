use crate::utils::dates;
use chrono::NaiveDate;
use expense_api::endpoints::{
    expenses::{Expense, ExpenseData},
    ExpenseId,
};
use itertools::Itertools;

/// App-lifetime collection of expense records.
///
/// Mutations are applied only after the backend has confirmed them. No
/// validation happens here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_all(&mut self, expenses: Vec<Expense>) {
        self.expenses = expenses;
    }

    pub fn add(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Replace the fields of the record with `id`; unknown ids are ignored
    pub fn update(&mut self, id: &ExpenseId, patch: ExpenseData) {
        match self.expenses.iter_mut().find(|e| &e.id == id) {
            Some(expense) => expense.apply(patch),
            None => tracing::debug!("Ignoring update for unknown expense {}", id),
        }
    }

    pub fn delete(&mut self, id: &ExpenseId) {
        self.expenses.retain(|e| &e.id != id);
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Records dated within `[today - days, today]`
    pub fn recent(&self, today: NaiveDate, days: i64) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| dates::is_within_last_days(e.date, today, days))
            .collect()
    }

    /// Newest first; ties keep insertion order
    pub fn sorted_by_date(&self) -> Vec<&Expense> {
        sort_newest_first(self.expenses.iter())
    }

    pub fn total(&self) -> f64 {
        total(self.expenses.iter())
    }
}

pub fn sort_newest_first<'a>(expenses: impl Iterator<Item = &'a Expense>) -> Vec<&'a Expense> {
    expenses.sorted_by(|a, b| b.date.cmp(&a.date)).collect()
}

pub fn total<'a>(expenses: impl Iterator<Item = &'a Expense>) -> f64 {
    expenses.map(|e| e.amount).sum()
}
