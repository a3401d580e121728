use crate::background::{data_loader::DataLoader, BackgroundJob, BackgroundTaskManager};
use crate::events::AppCommand;
use crate::state::*;
use crate::ui::screens::Screen;
use throbber_widgets_tui::ThrobberState;

const LOG_PAGE_SIZE: usize = 20;

/// Execute a command, spawning its backend job if it scheduled one
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    if let Some(job) = execute_command_sync(command, state) {
        spawn_job(job, task_manager, data_loader);
    }
}

pub fn spawn_job(job: BackgroundJob, task_manager: &mut BackgroundTaskManager, data_loader: &DataLoader) {
    let task_id = job.task_id();
    let data_loader = data_loader.clone();
    let future = async move {
        data_loader.run(job).await;
    };

    task_manager.spawn_task(task_id, future);
}

/// Apply a command to the state without side effects.
///
/// Returns the backend job the command scheduled, if any. Production code
/// hands it to [`spawn_job`]; tests inspect it or feed it to a loader.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) -> Option<BackgroundJob> {
    match command {
        // Simple state updates
        AppCommand::Quit => {
            state.cancel_pending_requests();
            state.should_quit = true;
        }
        AppCommand::ToggleHelp => state.help_visible = !state.help_visible,

        // Navigation
        AppCommand::NavigateBack => {
            state.navigate_back();
        }
        AppCommand::OpenManageExpense { expense_id } => {
            let manage_state = ManageExpenseState::open(expense_id, &state.store);
            tracing::debug!("Opening manage screen: {}", manage_state.title());
            state.navigate_to(Screen::ManageExpense(manage_state));
        }

        // Expenses list
        AppCommand::SelectNext => {
            if let Screen::Expenses(expenses_state) = state.current_screen() {
                expenses_state.select_next(state.visible_expenses(expenses_state).len());
            }
        }
        AppCommand::SelectPrevious => {
            if let Screen::Expenses(expenses_state) = state.current_screen() {
                expenses_state.select_prev(state.visible_expenses(expenses_state).len());
            }
        }
        AppCommand::TogglePeriod => {
            if let Screen::Expenses(expenses_state) = state.current_screen_mut() {
                expenses_state.period = expenses_state.period.toggle();
                expenses_state.table_state.borrow_mut().select(None);
            }
            if let Screen::Expenses(expenses_state) = state.current_screen() {
                expenses_state.clamp_selection(state.visible_expenses(expenses_state).len());
            }
        }
        AppCommand::LoadExpenses => {
            if let Screen::Expenses(expenses_state) = state.current_screen_mut() {
                expenses_state.loading = LoadingState::Loading(ThrobberState::default());
            }
            return Some(BackgroundJob::LoadExpenses);
        }
        AppCommand::DismissLoadError => {
            if let Screen::Expenses(expenses_state) = state.current_screen_mut() {
                if let LoadingState::Error(_) = expenses_state.loading {
                    expenses_state.loading = LoadingState::Loaded;
                }
            }
        }

        // Manage expense form
        AppCommand::FocusNextField => {
            if let Some(manage_state) = idle_manage_screen(state) {
                manage_state.form.focus_next();
            }
        }
        AppCommand::FocusPreviousField => {
            if let Some(manage_state) = idle_manage_screen(state) {
                manage_state.form.focus_previous();
            }
        }
        AppCommand::AppendFormChar(c) => {
            if let Some(manage_state) = idle_manage_screen(state) {
                manage_state.form.push_char(c);
            }
        }
        AppCommand::DeleteFormChar => {
            if let Some(manage_state) = idle_manage_screen(state) {
                manage_state.form.pop_char();
            }
        }
        AppCommand::SubmitExpenseForm => {
            let request = state.next_request_id();
            let manage_state = idle_manage_screen(state)?;

            let Some(data) = manage_state.form.submit() else {
                tracing::debug!("Expense form has invalid input, nothing submitted");
                return None;
            };

            let cancel = manage_state.begin(request);
            let job = match &manage_state.mode {
                ManageMode::Edit(id) => BackgroundJob::UpdateExpense {
                    request,
                    id: id.clone(),
                    data,
                    cancel,
                },
                ManageMode::Add => BackgroundJob::CreateExpense {
                    request,
                    data,
                    cancel,
                },
            };
            state.record_issued(request);
            return Some(job);
        }
        AppCommand::DeleteExpense => {
            let request = state.next_request_id();
            let manage_state = idle_manage_screen(state)?;

            let ManageMode::Edit(id) = manage_state.mode.clone() else {
                tracing::debug!("Delete ignored in add mode");
                return None;
            };

            let cancel = manage_state.begin(request);
            state.record_issued(request);
            return Some(BackgroundJob::DeleteExpense {
                request,
                id,
                cancel,
            });
        }
        AppCommand::CancelExpenseForm => {
            if idle_manage_screen(state).is_some() {
                state.navigate_back();
            }
        }
        AppCommand::DismissError => {
            if let Screen::ManageExpense(manage_state) = state.current_screen_mut() {
                manage_state.dismiss_error();
            }
        }

        // Log screen (no logging to avoid feedback loop)
        AppCommand::NavigateToLogs => {
            state.navigate_to(Screen::Logs(LogsState::default()));
        }
        AppCommand::ScrollLogsUp => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                // Scroll up means going back in time (increase offset)
                if logs_state.scroll_offset < logs_state.total_entries.saturating_sub(1) {
                    logs_state.scroll_offset += 1;
                }
            }
        }
        AppCommand::ScrollLogsDown => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = logs_state.scroll_offset.saturating_sub(1);
            }
        }
        AppCommand::ScrollLogsPageUp => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = (logs_state.scroll_offset + LOG_PAGE_SIZE)
                    .min(logs_state.total_entries.saturating_sub(1));
            }
        }
        AppCommand::ScrollLogsPageDown => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = logs_state.scroll_offset.saturating_sub(LOG_PAGE_SIZE);
            }
        }
    }

    None
}

/// The manage screen on top of the stack, unless it is busy or showing an error
fn idle_manage_screen(state: &mut AppState) -> Option<&mut ManageExpenseState> {
    match state.current_screen_mut() {
        Screen::ManageExpense(manage_state) if manage_state.submission == SubmissionState::Idle => {
            Some(manage_state)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RequestId;
    use chrono::NaiveDate;
    use expense_api::endpoints::{
        expenses::{Expense, ExpenseData},
        ExpenseId,
    };

    // ============================================================================
    // Helper Functions
    // ============================================================================

    fn lunch() -> Expense {
        Expense::new(
            ExpenseId::from("e1"),
            ExpenseData::new(
                12.5,
                NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
                "Lunch",
            ),
        )
    }

    fn state_on_manage(expense_id: Option<&str>) -> AppState {
        let mut state = AppState::new();
        state.store.add(lunch());
        execute_command_sync(
            AppCommand::OpenManageExpense {
                expense_id: expense_id.map(ExpenseId::from),
            },
            &mut state,
        );
        state
    }

    fn manage(state: &AppState) -> &ManageExpenseState {
        match state.current_screen() {
            Screen::ManageExpense(manage_state) => manage_state,
            other => panic!("expected manage screen, got {other:?}"),
        }
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            execute_command_sync(AppCommand::AppendFormChar(c), state);
        }
    }

    // ============================================================================
    // Submission
    // ============================================================================

    #[test]
    fn valid_add_submit_schedules_a_create() {
        let mut state = state_on_manage(None);
        type_text(&mut state, "19.99");
        execute_command_sync(AppCommand::FocusNextField, &mut state);
        type_text(&mut state, "2023-06-01");
        execute_command_sync(AppCommand::FocusNextField, &mut state);
        type_text(&mut state, "Groceries");

        let job = execute_command_sync(AppCommand::SubmitExpenseForm, &mut state);

        match job {
            Some(BackgroundJob::CreateExpense { request, data, .. }) => {
                assert_eq!(request, RequestId(1));
                assert_eq!(data.amount, 19.99);
                assert_eq!(data.description, "Groceries");
            }
            other => panic!("expected create job, got {other:?}"),
        }
        assert!(manage(&state).is_submitting());
        // Nothing is stored until the backend confirms
        assert_eq!(state.store.len(), 1);
    }

    #[test]
    fn invalid_submit_schedules_nothing() {
        let mut state = state_on_manage(None);
        type_text(&mut state, "abc");

        assert!(execute_command_sync(AppCommand::SubmitExpenseForm, &mut state).is_none());
        assert_eq!(manage(&state).submission, SubmissionState::Idle);
        assert!(manage(&state).form.is_invalid());
        assert_eq!(state.last_request_id, 0);
    }

    #[test]
    fn edit_submit_schedules_an_update_for_the_record() {
        let mut state = state_on_manage(Some("e1"));

        let job = execute_command_sync(AppCommand::SubmitExpenseForm, &mut state);

        match job {
            Some(BackgroundJob::UpdateExpense { id, data, .. }) => {
                assert_eq!(id, "e1");
                assert_eq!(data, lunch().data());
            }
            other => panic!("expected update job, got {other:?}"),
        }
    }

    #[test]
    fn form_is_locked_while_submitting() {
        let mut state = state_on_manage(Some("e1"));
        execute_command_sync(AppCommand::SubmitExpenseForm, &mut state);

        execute_command_sync(AppCommand::AppendFormChar('9'), &mut state);
        assert!(execute_command_sync(AppCommand::SubmitExpenseForm, &mut state).is_none());
        execute_command_sync(AppCommand::CancelExpenseForm, &mut state);

        assert_eq!(manage(&state).form.field(FormField::Amount).value, "12.5");
        assert_eq!(state.last_request_id, 1);
    }

    // ============================================================================
    // Delete and cancel
    // ============================================================================

    #[test]
    fn delete_in_edit_mode_schedules_a_delete() {
        let mut state = state_on_manage(Some("e1"));

        let job = execute_command_sync(AppCommand::DeleteExpense, &mut state);

        assert!(matches!(
            job,
            Some(BackgroundJob::DeleteExpense { ref id, .. }) if id == "e1"
        ));
        assert!(manage(&state).is_submitting());
    }

    #[test]
    fn delete_in_add_mode_is_ignored() {
        let mut state = state_on_manage(None);

        assert!(execute_command_sync(AppCommand::DeleteExpense, &mut state).is_none());
        assert_eq!(manage(&state).submission, SubmissionState::Idle);
    }

    #[test]
    fn cancel_pops_without_touching_the_store() {
        let mut state = state_on_manage(Some("e1"));
        type_text(&mut state, "0");

        execute_command_sync(AppCommand::CancelExpenseForm, &mut state);

        assert!(matches!(state.current_screen(), Screen::Expenses(_)));
        assert_eq!(state.store.get(&ExpenseId::from("e1")), Some(&lunch()));
    }

    // ============================================================================
    // List and logs
    // ============================================================================

    #[test]
    fn load_marks_the_list_as_loading() {
        let mut state = AppState::new();

        let job = execute_command_sync(AppCommand::LoadExpenses, &mut state);

        assert!(matches!(job, Some(BackgroundJob::LoadExpenses)));
        match state.current_screen() {
            Screen::Expenses(s) => assert!(matches!(s.loading, LoadingState::Loading(_))),
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn toggle_period_switches_views() {
        let mut state = AppState::new();
        execute_command_sync(AppCommand::TogglePeriod, &mut state);

        match state.current_screen() {
            Screen::Expenses(s) => assert_eq!(s.period, ExpensesPeriod::All),
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn log_scrolling_is_bounded() {
        let mut state = AppState::new();
        execute_command_sync(AppCommand::NavigateToLogs, &mut state);
        if let Screen::Logs(logs_state) = state.current_screen_mut() {
            logs_state.total_entries = 30;
        }

        execute_command_sync(AppCommand::ScrollLogsPageUp, &mut state);
        execute_command_sync(AppCommand::ScrollLogsPageUp, &mut state);
        execute_command_sync(AppCommand::ScrollLogsUp, &mut state);

        match state.current_screen() {
            Screen::Logs(s) => assert_eq!(s.scroll_offset, 29),
            other => panic!("unexpected screen {other:?}"),
        }

        execute_command_sync(AppCommand::ScrollLogsPageDown, &mut state);
        execute_command_sync(AppCommand::ScrollLogsPageDown, &mut state);
        execute_command_sync(AppCommand::ScrollLogsDown, &mut state);
        match state.current_screen() {
            Screen::Logs(s) => assert_eq!(s.scroll_offset, 0),
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn quit_cancels_in_flight_writes() {
        let mut state = state_on_manage(Some("e1"));
        let job = execute_command_sync(AppCommand::SubmitExpenseForm, &mut state);

        execute_command_sync(AppCommand::Quit, &mut state);

        assert!(state.should_quit);
        match job {
            Some(BackgroundJob::UpdateExpense { cancel, .. }) => assert!(cancel.is_cancelled()),
            other => panic!("expected update job, got {other:?}"),
        }
    }
}
