use crate::commands::handlers;
use crate::events::{AppCommand, DataEvent};
use crate::input::KeyEvent;
use crate::state::{reducer, AppState};

/// Side effects of command execution.
///
/// Production spawns the scheduled backend job; tests record it instead so
/// they can assert on it or run it against an in-memory backend.
pub trait DataEventHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState);
}

/// Key and data-event handling without a terminal
pub struct AppCore<H: DataEventHandler> {
    ui_state: AppState,
    handler: H,
}

impl<H: DataEventHandler> AppCore<H> {
    pub fn new(handler: H) -> Self {
        Self::with_state(AppState::new(), handler)
    }

    pub fn with_state(ui_state: AppState, handler: H) -> Self {
        Self { ui_state, handler }
    }

    /// Translate a key press into a command and execute it
    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(command) = handlers::handle_key_input(event, &self.ui_state) {
            tracing::trace!("Key {:?} -> {:?}", event.key, command);
            self.handler.execute_with_context(command, &mut self.ui_state);
        }
    }

    /// Execute a command that did not come from the keyboard (startup load)
    pub fn dispatch(&mut self, command: AppCommand) {
        self.handler.execute_with_context(command, &mut self.ui_state);
    }

    /// Apply the result of a background job
    pub fn handle_data_event(&mut self, event: DataEvent) {
        reducer::reduce_data_event(&mut self.ui_state, event);
    }

    pub fn state(&self) -> &AppState {
        &self.ui_state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.ui_state
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit
    }
}
