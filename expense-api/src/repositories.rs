use crate::endpoints::{
    ExpenseId,
    expenses::{CreateExpense, DeleteExpense, ExpenseData, ListExpenses, UpdateExpense},
};

#[derive(Default)]
pub struct ExpenseRepository;

impl ExpenseRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn list(&self) -> ListExpenses {
        ListExpenses::new()
    }

    pub fn create(&self, expense: ExpenseData) -> CreateExpense {
        CreateExpense::new(expense)
    }

    pub fn update(&self, expense_id: ExpenseId, expense: ExpenseData) -> UpdateExpense {
        UpdateExpense::new(expense_id, expense)
    }

    pub fn delete(&self, expense_id: ExpenseId) -> DeleteExpense {
        DeleteExpense::new(expense_id)
    }
}
