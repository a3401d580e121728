use expense_api::endpoints::{
    expenses::{Expense, ExpenseData},
    ExpenseId,
};
use std::fmt::Display;

/// Identifies one mutating backend call issued by a manage-expense screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which kind of write failed; decides the message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Save,
    Delete,
}

impl MutationKind {
    pub fn failure_message(self) -> &'static str {
        match self {
            MutationKind::Save => "Could not save data",
            MutationKind::Delete => "Could not delete expense",
        }
    }
}

/// Commands to execute (user actions → state changes and background jobs)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // Expenses list
    SelectNext,
    SelectPrevious,
    TogglePeriod,
    LoadExpenses,
    DismissLoadError,

    // Navigation
    OpenManageExpense {
        expense_id: Option<ExpenseId>,
    },
    NavigateBack,

    // Manage expense form
    FocusNextField,
    FocusPreviousField,
    AppendFormChar(char),
    DeleteFormChar,
    SubmitExpenseForm,
    CancelExpenseForm,
    DeleteExpense,
    DismissError,

    // Log screen
    NavigateToLogs,
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,

    ToggleHelp,

    // System
    Quit,
}

/// Events from background tasks (responses to jobs)
#[derive(Debug, Clone)]
pub enum DataEvent {
    ExpensesLoaded {
        expenses: Vec<Expense>,
    },
    ExpensesLoadFailed {
        error: String,
    },

    ExpenseCreated {
        request: RequestId,
        expense: Expense,
    },
    ExpenseUpdated {
        request: RequestId,
        id: ExpenseId,
        data: ExpenseData,
    },
    ExpenseDeleted {
        request: RequestId,
        id: ExpenseId,
    },
    ExpenseMutationFailed {
        request: RequestId,
        kind: MutationKind,
        error: String,
    },
}
