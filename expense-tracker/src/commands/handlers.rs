use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::*;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Ctrl-C quits from anywhere, even while a write is in flight
    if event.is_interrupt() {
        return Some(AppCommand::Quit);
    }

    // Priority 1: Manage expense form owns the keyboard
    if let Screen::ManageExpense(manage_state) = state.current_screen() {
        return handle_manage_expense_keys(event, manage_state);
    }

    // Priority 2: Load error overlay on the list
    if let Screen::Expenses(expenses_state) = state.current_screen() {
        match expenses_state.loading {
            LoadingState::Error(_) => {
                return match key {
                    Key::Enter | Key::Esc => Some(AppCommand::DismissLoadError),
                    Key::Char('q') => Some(AppCommand::Quit),
                    _ => None,
                };
            }
            LoadingState::Loading(_) => {
                return match key {
                    Key::Char('q') => Some(AppCommand::Quit),
                    _ => None,
                };
            }
            _ => {}
        }
    }

    // Priority 3: Help popup
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    match (state.current_screen(), key) {
        // Global help toggle
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),

        // Global quit command
        (_, Key::Char('q')) => Some(AppCommand::Quit),

        // Expenses screen
        (Screen::Expenses(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Expenses(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Expenses(expenses_state), Key::Enter | Key::Char('e')) => {
            let selected_idx = expenses_state.selected_index()?;
            let visible = state.visible_expenses(expenses_state);
            visible
                .get(selected_idx)
                .map(|expense| AppCommand::OpenManageExpense {
                    expense_id: Some(expense.id.clone()),
                })
        }
        (Screen::Expenses(..), Key::Char('a' | 'n')) => {
            Some(AppCommand::OpenManageExpense { expense_id: None })
        }
        (Screen::Expenses(..), Key::Tab) => Some(AppCommand::TogglePeriod),
        (Screen::Expenses(..), Key::Char('r')) => Some(AppCommand::LoadExpenses),
        (Screen::Expenses(..), Key::Char('L')) => Some(AppCommand::NavigateToLogs),

        // Logs screen
        (Screen::Logs(..), Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Screen::Logs(..), Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Screen::Logs(..), Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Screen::Logs(..), Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),
        (Screen::Logs(..), Key::Char('h') | Key::Esc) => Some(AppCommand::NavigateBack),

        // Ignore other keys
        _ => None,
    }
}

/// Keys on the manage expense screen; every printable key is text input
fn handle_manage_expense_keys(
    event: KeyEvent,
    manage_state: &ManageExpenseState,
) -> Option<AppCommand> {
    let key = event.key;

    match &manage_state.submission {
        // Input is locked until the backend answers
        SubmissionState::Submitting => None,

        SubmissionState::Error(_) => match key {
            Key::Enter | Key::Esc => Some(AppCommand::DismissError),
            _ => None,
        },

        SubmissionState::Idle => {
            if event.ctrl {
                return match key {
                    Key::Char('d') if manage_state.is_editing() => Some(AppCommand::DeleteExpense),
                    _ => None,
                };
            }

            match key {
                Key::Enter => Some(AppCommand::SubmitExpenseForm),
                Key::Esc => Some(AppCommand::CancelExpenseForm),
                Key::Tab | Key::Down => Some(AppCommand::FocusNextField),
                Key::BackTab | Key::Up => Some(AppCommand::FocusPreviousField),
                Key::Backspace => Some(AppCommand::DeleteFormChar),
                Key::Char(c) => Some(AppCommand::AppendFormChar(c)),
                _ => None,
            }
        }
    }
}
