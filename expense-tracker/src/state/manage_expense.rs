use super::form::{ExpenseForm, FormDefaults};
use super::store::ExpenseStore;
use crate::events::RequestId;
use expense_api::endpoints::ExpenseId;
use throbber_widgets_tui::ThrobberState;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq)]
pub enum ManageMode {
    Add,
    Edit(ExpenseId),
}

/// What the manage screen is doing with the backend
#[derive(Default, Debug, Clone, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Error(String),
}

/// The in-flight write this screen is waiting on
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub id: RequestId,
    pub cancel: CancellationToken,
}

#[derive(Debug, Clone)]
pub struct ManageExpenseState {
    pub mode: ManageMode,
    pub form: ExpenseForm,
    pub submission: SubmissionState,
    pub pending: Option<PendingRequest>,
    /// Spinner shown by the loading overlay while submitting
    pub throbber: ThrobberState,
}

impl ManageExpenseState {
    /// Resolve the route parameter against the store.
    ///
    /// An id the store does not know falls back to add mode.
    pub fn open(expense_id: Option<ExpenseId>, store: &ExpenseStore) -> Self {
        let existing = expense_id.and_then(|id| match store.get(&id) {
            Some(expense) => Some(expense),
            None => {
                tracing::warn!("Expense {} not found, opening empty form", id);
                None
            }
        });

        match existing {
            Some(expense) => Self {
                mode: ManageMode::Edit(expense.id.clone()),
                form: ExpenseForm::new(Some(FormDefaults::from(expense)), "Update"),
                submission: SubmissionState::Idle,
                pending: None,
                throbber: ThrobberState::default(),
            },
            None => Self {
                mode: ManageMode::Add,
                form: ExpenseForm::new(None, "Add"),
                submission: SubmissionState::Idle,
                pending: None,
                throbber: ThrobberState::default(),
            },
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, ManageMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            ManageMode::Edit(_) => "Edit Expense",
            ManageMode::Add => "Add Expense",
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionState::Submitting
    }

    /// Enter `Submitting` for `request` and hand out its cancellation token
    pub fn begin(&mut self, request: RequestId) -> CancellationToken {
        let cancel = CancellationToken::new();
        self.submission = SubmissionState::Submitting;
        self.pending = Some(PendingRequest {
            id: request,
            cancel: cancel.clone(),
        });
        cancel
    }

    pub fn is_waiting_for(&self, request: RequestId) -> bool {
        self.pending.as_ref().is_some_and(|p| p.id == request)
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.pending = None;
        self.submission = SubmissionState::Error(message.into());
    }

    /// Return to `Idle` without retrying; the form goes back to its seed values
    pub fn dismiss_error(&mut self) {
        if let SubmissionState::Error(_) = self.submission {
            self.submission = SubmissionState::Idle;
            self.form.reset();
        }
    }

    /// Abandon the in-flight request, if any
    pub fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!("Cancelling request {}", pending.id);
            pending.cancel.cancel();
        }
    }
}
