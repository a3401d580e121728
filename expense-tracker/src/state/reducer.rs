use super::{AppState, LoadingState, Scrollable};
use crate::events::{DataEvent, RequestId};
use crate::ui::screens::Screen;
use crate::utils::dates;

/// Shown over the list when fetching fails; the underlying error is only logged
pub const LOAD_FAILED_MESSAGE: &str = "Could not fetch expenses";

/// Pure state transition function for data events.
///
/// Store changes always apply, since the store outlives any screen. Screen
/// transitions only apply when the manage screen on top is the one that
/// issued the request.
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        DataEvent::ExpensesLoaded { expenses } => {
            state.store.set_all(expenses);
            for_each_list(state, |expenses_state| {
                expenses_state.loading = LoadingState::Loaded;
            });
        }

        DataEvent::ExpensesLoadFailed { error } => {
            tracing::error!("Expense list unavailable: {}", error);
            for_each_list(state, |expenses_state| {
                expenses_state.loading = LoadingState::Error(LOAD_FAILED_MESSAGE.to_string());
            });
        }

        DataEvent::ExpenseCreated { request, expense } => {
            state.store.add(expense);
            finish_request(state, request);
        }

        DataEvent::ExpenseUpdated { request, id, data } => {
            state.store.update(&id, data);
            finish_request(state, request);
        }

        DataEvent::ExpenseDeleted { request, id } => {
            state.store.delete(&id);
            finish_request(state, request);
        }

        DataEvent::ExpenseMutationFailed {
            request,
            kind,
            error,
        } => match state.manage_screen_awaiting(request) {
            Some(manage_state) => {
                tracing::warn!("Request {} failed: {}", request, error);
                manage_state.fail(kind.failure_message());
            }
            None => {
                tracing::warn!("Discarding failure of stale request {}: {}", request, error);
            }
        },
    }
}

/// Leave the manage screen that was waiting for `request`
fn finish_request(state: &mut AppState, request: RequestId) {
    match state.manage_screen_awaiting(request) {
        Some(manage_state) => {
            manage_state.pending = None;
            state.navigate_back();
        }
        None => tracing::debug!("No screen waiting for request {}", request),
    }
    for_each_list(state, |_| {});
}

/// Apply `update` to every list screen on the stack, then keep its selection in range
fn for_each_list(state: &mut AppState, mut update: impl FnMut(&mut super::ExpensesState)) {
    let today = dates::today();
    let AppState {
        history,
        store,
        recent_days,
        ..
    } = state;

    for screen in history.iter_mut() {
        if let Screen::Expenses(expenses_state) = screen {
            update(expenses_state);
            let visible = expenses_state.visible(store, today, *recent_days).len();
            expenses_state.clamp_selection(visible);
        }
    }
}
