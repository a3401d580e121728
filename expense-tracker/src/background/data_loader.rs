use super::backend::ExpenseBackend;
use super::BackgroundJob;
use crate::events::{DataEvent, MutationKind, RequestId};
use expense_api::endpoints::{
    expenses::{Expense, ExpenseData},
    ExpenseId,
};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Runs backend calls and reports each outcome as a [`DataEvent`]
#[derive(Clone)]
pub struct DataLoader {
    pub backend: Arc<dyn ExpenseBackend>,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl DataLoader {
    pub fn new(backend: Arc<dyn ExpenseBackend>, data_tx: mpsc::UnboundedSender<DataEvent>) -> Self {
        Self { backend, data_tx }
    }

    pub async fn run(&self, job: BackgroundJob) {
        match job {
            BackgroundJob::LoadExpenses => self.load_expenses().await,
            BackgroundJob::CreateExpense {
                request,
                data,
                cancel,
            } => self.create_expense(request, data, cancel).await,
            BackgroundJob::UpdateExpense {
                request,
                id,
                data,
                cancel,
            } => self.update_expense(request, id, data, cancel).await,
            BackgroundJob::DeleteExpense {
                request,
                id,
                cancel,
            } => self.delete_expense(request, id, cancel).await,
        }
    }

    pub async fn load_expenses(&self) {
        tracing::info!("Fetching expenses");

        match self.backend.list().await {
            Ok(expenses) => {
                tracing::info!("Loaded {} expenses", expenses.len());
                self.send(DataEvent::ExpensesLoaded { expenses });
            }
            Err(e) => {
                tracing::error!("Failed to fetch expenses: {:#}", e);
                self.send(DataEvent::ExpensesLoadFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn create_expense(
        &self,
        request: RequestId,
        data: ExpenseData,
        cancel: CancellationToken,
    ) {
        tracing::info!("Creating expense ({})", request);

        let Some(result) = until_cancelled(&cancel, request, self.backend.create(&data)).await
        else {
            return;
        };

        match result {
            Ok(id) => {
                tracing::info!("Expense {} created ({})", id, request);
                self.send(DataEvent::ExpenseCreated {
                    request,
                    expense: Expense::new(id, data),
                });
            }
            Err(e) => self.mutation_failed(request, MutationKind::Save, e),
        }
    }

    pub async fn update_expense(
        &self,
        request: RequestId,
        id: ExpenseId,
        data: ExpenseData,
        cancel: CancellationToken,
    ) {
        tracing::info!("Updating expense {} ({})", id, request);

        let Some(result) =
            until_cancelled(&cancel, request, self.backend.update(&id, &data)).await
        else {
            return;
        };

        match result {
            Ok(()) => {
                tracing::info!("Expense {} updated ({})", id, request);
                self.send(DataEvent::ExpenseUpdated { request, id, data });
            }
            Err(e) => self.mutation_failed(request, MutationKind::Save, e),
        }
    }

    pub async fn delete_expense(&self, request: RequestId, id: ExpenseId, cancel: CancellationToken) {
        tracing::info!("Deleting expense {} ({})", id, request);

        let Some(result) = until_cancelled(&cancel, request, self.backend.delete(&id)).await else {
            return;
        };

        match result {
            Ok(()) => {
                tracing::info!("Expense {} deleted ({})", id, request);
                self.send(DataEvent::ExpenseDeleted { request, id });
            }
            Err(e) => self.mutation_failed(request, MutationKind::Delete, e),
        }
    }

    fn mutation_failed(&self, request: RequestId, kind: MutationKind, error: anyhow::Error) {
        tracing::error!("{} ({}): {:#}", kind.failure_message(), request, error);
        self.send(DataEvent::ExpenseMutationFailed {
            request,
            kind,
            error: error.to_string(),
        });
    }

    fn send(&self, event: DataEvent) {
        if self.data_tx.send(event).is_err() {
            tracing::debug!("Event loop gone, dropping data event");
        }
    }
}

/// Await `call` unless `cancel` fires first. `None` means the result must not be reported.
async fn until_cancelled<T>(
    cancel: &CancellationToken,
    request: RequestId,
    call: impl Future<Output = T>,
) -> Option<T> {
    if cancel.is_cancelled() {
        tracing::debug!("Request {} cancelled before it was sent", request);
        return None;
    }

    let result = tokio::select! {
        _ = cancel.cancelled() => None,
        result = call => Some(result),
    };

    if result.is_none() || cancel.is_cancelled() {
        tracing::debug!("Request {} cancelled, discarding result", request);
        return None;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryBackend;
    use chrono::NaiveDate;

    fn groceries() -> ExpenseData {
        ExpenseData::new(
            19.99,
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            "Groceries",
        )
    }

    fn loader(backend: InMemoryBackend) -> (DataLoader, mpsc::UnboundedReceiver<DataEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (DataLoader::new(Arc::new(backend), tx), rx)
    }

    #[tokio::test]
    async fn create_reports_the_assigned_id() {
        let (loader, mut rx) = loader(InMemoryBackend::with_ids(["abc123"]));

        loader
            .create_expense(RequestId(1), groceries(), CancellationToken::new())
            .await;

        match rx.recv().await {
            Some(DataEvent::ExpenseCreated { request, expense }) => {
                assert_eq!(request, RequestId(1));
                assert_eq!(expense.id, "abc123");
                assert_eq!(expense.data(), groceries());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_create_reports_a_save_failure() {
        let backend = InMemoryBackend::new();
        backend.fail_writes(true);
        let (loader, mut rx) = loader(backend);

        loader
            .create_expense(RequestId(7), groceries(), CancellationToken::new())
            .await;

        match rx.recv().await {
            Some(DataEvent::ExpenseMutationFailed { request, kind, .. }) => {
                assert_eq!(request, RequestId(7));
                assert_eq!(kind, MutationKind::Save);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_delete_reports_a_delete_failure() {
        let backend = InMemoryBackend::new();
        backend.fail_writes(true);
        let (loader, mut rx) = loader(backend);

        loader
            .delete_expense(RequestId(2), ExpenseId::from("x"), CancellationToken::new())
            .await;

        assert!(matches!(
            rx.recv().await,
            Some(DataEvent::ExpenseMutationFailed {
                kind: MutationKind::Delete,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn cancelled_requests_report_nothing() {
        let backend = InMemoryBackend::with_ids(["abc123"]);
        let (loader, mut rx) = loader(backend.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();

        loader.create_expense(RequestId(1), groceries(), cancel).await;
        drop(loader);

        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn load_reports_the_backend_contents() {
        let backend = InMemoryBackend::with_ids(["abc123"]);
        backend.create(&groceries()).await.unwrap();
        let (loader, mut rx) = loader(backend);

        loader.run(BackgroundJob::LoadExpenses).await;

        match rx.recv().await {
            Some(DataEvent::ExpensesLoaded { expenses }) => {
                assert_eq!(expenses.len(), 1);
                assert_eq!(expenses[0].id, "abc123");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_load_reports_an_error() {
        let backend = InMemoryBackend::new();
        backend.fail_reads(true);
        let (loader, mut rx) = loader(backend);

        loader.load_expenses().await;

        assert!(matches!(
            rx.recv().await,
            Some(DataEvent::ExpensesLoadFailed { .. })
        ));
    }
}
