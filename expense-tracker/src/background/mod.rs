pub mod backend;
pub mod data_loader;

use crate::events::RequestId;
use expense_api::endpoints::{expenses::ExpenseData, ExpenseId};
use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A backend call scheduled by a command
#[derive(Debug, Clone)]
pub enum BackgroundJob {
    LoadExpenses,
    CreateExpense {
        request: RequestId,
        data: ExpenseData,
        cancel: CancellationToken,
    },
    UpdateExpense {
        request: RequestId,
        id: ExpenseId,
        data: ExpenseData,
        cancel: CancellationToken,
    },
    DeleteExpense {
        request: RequestId,
        id: ExpenseId,
        cancel: CancellationToken,
    },
}

impl BackgroundJob {
    /// Jobs sharing an id supersede each other
    pub fn task_id(&self) -> String {
        match self {
            BackgroundJob::LoadExpenses => "load_expenses".to_string(),
            BackgroundJob::CreateExpense { request, .. }
            | BackgroundJob::UpdateExpense { request, .. }
            | BackgroundJob::DeleteExpense { request, .. } => format!("mutation_{}", request.0),
        }
    }
}

/// Tracks running tasks and provides cancellation support
pub struct BackgroundTaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Spawn a background task, aborting any running task with the same id
    pub fn spawn_task<F>(&mut self, task_id: String, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Finished tasks are dropped so the map does not grow per request
        self.tasks.retain(|_, handle| !handle.is_finished());

        if let Some(handle) = self.tasks.remove(&task_id) {
            tracing::debug!("Superseding running task {}", task_id);
            handle.abort();
        }

        let handle = tokio::spawn(future);
        self.tasks.insert(task_id, handle);
    }

    pub fn running(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }

    /// Cancel all running tasks (used on shutdown)
    pub fn cancel_all(&mut self) {
        let running = self.running();
        if running > 0 {
            tracing::debug!("Aborting {} background tasks", running);
        }
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
