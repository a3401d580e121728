pub mod expenses_screen;
pub mod logs_screen;
pub mod manage_expense_screen;

use crate::state::{ExpensesState, LogsState, ManageExpenseState};

#[derive(Debug, Clone)]
pub enum Screen {
    Expenses(ExpensesState),
    ManageExpense(ManageExpenseState),
    Logs(LogsState),
}
