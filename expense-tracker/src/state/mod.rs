pub mod form;
pub mod manage_expense;
pub mod reducer;
pub mod store;
pub mod validators;

pub use form::{ExpenseForm, FieldInput, FormField};
pub use manage_expense::{ManageExpenseState, ManageMode, SubmissionState};
pub use store::ExpenseStore;

use crate::events::RequestId;
use crate::ui::screens::Screen;
use crate::utils::dates;
use chrono::NaiveDate;
use expense_api::endpoints::expenses::Expense;
use ratatui::widgets::TableState;
use std::cell::RefCell;
use throbber_widgets_tui::ThrobberState;

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

/// Which slice of the store the list screen shows
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpensesPeriod {
    #[default]
    Recent,
    All,
}

impl ExpensesPeriod {
    pub fn toggle(self) -> Self {
        match self {
            ExpensesPeriod::Recent => ExpensesPeriod::All,
            ExpensesPeriod::All => ExpensesPeriod::Recent,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub history: Vec<Screen>,

    // Shared data
    pub store: ExpenseStore,
    pub recent_days: i64,

    // UI state
    pub help_visible: bool,

    // Highest request id handed out so far
    pub last_request_id: u64,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_recent_days(7)
    }

    pub fn with_recent_days(recent_days: i64) -> Self {
        Self {
            history: vec![Screen::Expenses(ExpensesState::default())],

            store: ExpenseStore::new(),
            recent_days,

            help_visible: false,

            last_request_id: 0,

            should_quit: false,
        }
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        self.history
            .last()
            .expect("Navigation stack should never be empty")
    }

    /// Get mutable reference to current screen
    pub fn current_screen_mut(&mut self) -> &mut Screen {
        self.history
            .last_mut()
            .expect("Navigation stack should never be empty")
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            tracing::debug!(
                "Navigating back, stack depth: {} -> {}",
                self.history.len(),
                self.history.len() - 1
            );
            if let Some(Screen::ManageExpense(mut manage_state)) = self.history.pop() {
                manage_state.cancel_pending();
            }
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    /// Cancel every in-flight write owned by a screen on the stack
    pub fn cancel_pending_requests(&mut self) {
        for screen in self.history.iter_mut() {
            if let Screen::ManageExpense(manage_state) = screen {
                manage_state.cancel_pending();
            }
        }
    }

    /// Id for the next write; becomes taken once passed to `record_issued`
    pub fn next_request_id(&self) -> RequestId {
        RequestId(self.last_request_id + 1)
    }

    pub fn record_issued(&mut self, request: RequestId) {
        self.last_request_id = self.last_request_id.max(request.0);
    }

    /// The manage screen on top of the stack, if it is waiting for `request`
    pub fn manage_screen_awaiting(&mut self, request: RequestId) -> Option<&mut ManageExpenseState> {
        match self.current_screen_mut() {
            Screen::ManageExpense(manage_state) if manage_state.is_waiting_for(request) => {
                Some(manage_state)
            }
            _ => None,
        }
    }

    /// Rows the list screen shows for `state`, newest first
    pub fn visible_expenses(&self, state: &ExpensesState) -> Vec<&Expense> {
        state.visible(&self.store, dates::today(), self.recent_days)
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        match self.current_screen_mut() {
            Screen::Expenses(state) => {
                if let LoadingState::Loading(ref mut throbber_state) = state.loading {
                    return Some(throbber_state);
                }
            }
            Screen::ManageExpense(state) => {
                if state.is_submitting() {
                    return Some(&mut state.throbber);
                }
            }
            Screen::Logs(_) => {
                // Logs screen has no loading state
            }
        }
        None
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default, Debug, Clone)]
pub struct ExpensesState {
    pub period: ExpensesPeriod,
    pub loading: LoadingState,
    pub table_state: RefCell<TableState>,
}

impl ExpensesState {
    pub fn visible<'a>(
        &self,
        store: &'a ExpenseStore,
        today: NaiveDate,
        recent_days: i64,
    ) -> Vec<&'a Expense> {
        match self.period {
            ExpensesPeriod::Recent => {
                store::sort_newest_first(store.recent(today, recent_days).into_iter())
            }
            ExpensesPeriod::All => store.sorted_by_date(),
        }
    }

    pub fn period_label(&self, recent_days: i64) -> String {
        match self.period {
            ExpensesPeriod::Recent => format!("Last {} Days", recent_days),
            ExpensesPeriod::All => "Total".to_string(),
        }
    }

    pub fn fallback_text(&self, recent_days: i64) -> String {
        match self.period {
            ExpensesPeriod::Recent => {
                format!("No expenses registered for the last {} days.", recent_days)
            }
            ExpensesPeriod::All => "No registered expenses found!".to_string(),
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

pub trait Scrollable {
    fn table_state(&self) -> &RefCell<TableState>;

    fn select_prev(&self, num_items: usize) {
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            if table_state.selected().unwrap_or(0) == 0 {
                table_state.select(Some(num_items - 1));
            } else {
                table_state.scroll_up_by(1)
            }
        }
    }

    fn select_next(&self, num_items: usize) {
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            if table_state.selected().unwrap_or(num_items - 1) >= num_items - 1 {
                table_state.select_first();
            } else {
                table_state.scroll_down_by(1)
            }
        }
    }

    /// Keep the selection inside `[0, num_items)` after the list changed
    fn clamp_selection(&self, num_items: usize) {
        let mut table_state = self.table_state().borrow_mut();
        match (table_state.selected(), num_items) {
            (_, 0) => table_state.select(None),
            (None, _) => table_state.select(Some(0)),
            (Some(i), n) if i >= n => table_state.select(Some(n - 1)),
            _ => {}
        }
    }

    fn selected_index(&self) -> Option<usize> {
        self.table_state().borrow().selected()
    }
}

impl Scrollable for ExpensesState {
    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}
