use crate::app_core::{AppCore, DataEventHandler};
use crate::background::{backend::ExpenseBackend, data_loader::DataLoader, BackgroundJob};
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent};
use crate::input::{Key, KeyEvent};
use crate::state::{AppState, LoadingState, Scrollable};
use crate::ui::screens::Screen;
use anyhow::{bail, Result};
use async_trait::async_trait;
use expense_api::endpoints::{
    expenses::{Expense, ExpenseData},
    ExpenseId,
};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Mock data event handler for tests (no real async tasks)
///
/// Commands run through `execute_command_sync`; the jobs they schedule are
/// kept so a test can inspect them or run them with [`TestApp::run_jobs`].
#[derive(Default)]
pub struct MockDataHandler {
    pub jobs: Vec<BackgroundJob>,
}

impl MockDataHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        if let Some(job) = executor::execute_command_sync(command, state) {
            self.jobs.push(job);
        }
    }
}

/// Backend state shared between clones of [`InMemoryBackend`]
#[derive(Default)]
struct Inner {
    expenses: BTreeMap<ExpenseId, ExpenseData>,
    ids: VecDeque<ExpenseId>,
    generated: u64,
    fail_reads: bool,
    fail_writes: bool,
}

/// Backend that keeps expenses in memory and can be told to fail
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out these ids to created expenses, in order
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let backend = Self::new();
        backend.lock().ids = ids.into_iter().map(ExpenseId::new).collect();
        backend
    }

    pub fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    pub fn insert(&self, expense: Expense) {
        let data = expense.data();
        self.lock().expenses.insert(expense.id, data);
    }

    pub fn get(&self, id: &ExpenseId) -> Option<ExpenseData> {
        self.lock().expenses.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ExpenseBackend for InMemoryBackend {
    async fn create(&self, data: &ExpenseData) -> Result<ExpenseId> {
        let mut inner = self.lock();
        if inner.fail_writes {
            bail!("(503 Service Unavailable) backend offline");
        }
        let id = match inner.ids.pop_front() {
            Some(id) => id,
            None => {
                inner.generated += 1;
                ExpenseId::new(format!("generated-{}", inner.generated))
            }
        };
        inner.expenses.insert(id.clone(), data.clone());
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Expense>> {
        let inner = self.lock();
        if inner.fail_reads {
            bail!("(503 Service Unavailable) backend offline");
        }
        Ok(inner
            .expenses
            .iter()
            .map(|(id, data)| Expense::new(id.clone(), data.clone()))
            .collect())
    }

    async fn update(&self, id: &ExpenseId, data: &ExpenseData) -> Result<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            bail!("(503 Service Unavailable) backend offline");
        }
        inner.expenses.insert(id.clone(), data.clone());
        Ok(())
    }

    async fn delete(&self, id: &ExpenseId) -> Result<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            bail!("(503 Service Unavailable) backend offline");
        }
        inner.expenses.remove(id);
        Ok(())
    }
}

pub struct TestApp {
    core: AppCore<MockDataHandler>,
}

impl TestApp {
    /// Create a new test app with mock handler
    pub fn new() -> Self {
        Self {
            core: AppCore::new(MockDataHandler::new()),
        }
    }

    /// App on a loaded list screen holding `expenses`
    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        let mut app = Self::new();
        app.send_data_event(DataEvent::ExpensesLoaded { expenses });
        app
    }

    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    /// Send a key event with modifiers
    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(Key::Char(c));
        }
    }

    /// Execute a command as if the app issued it itself
    pub fn dispatch(&mut self, command: AppCommand) {
        self.core.dispatch(command);
    }

    /// Inject a data event (simulate a backend response)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    /// Jobs scheduled so far and not yet run
    pub fn jobs(&self) -> &[BackgroundJob] {
        &self.core.handler().jobs
    }

    /// Remove and return every scheduled job
    pub fn take_jobs(&mut self) -> Vec<BackgroundJob> {
        std::mem::take(&mut self.core.handler_mut().jobs)
    }

    /// Run every scheduled job against `backend` and apply the resulting events
    pub async fn run_jobs(&mut self, backend: &InMemoryBackend) {
        self.run_jobs_with(Arc::new(backend.clone())).await;
    }

    /// Run every scheduled job against any backend, e.g. a real client
    pub async fn run_jobs_with(&mut self, backend: Arc<dyn ExpenseBackend>) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let loader = DataLoader::new(backend, tx);

        for job in self.take_jobs() {
            loader.run(job).await;
        }
        drop(loader);

        while let Some(event) = rx.recv().await {
            self.send_data_event(event);
        }
    }

    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        self.core.state_mut()
    }

    /// Ids of the rows the list screen currently shows, top to bottom
    pub fn visible_ids(&self) -> Vec<String> {
        let state = self.state();
        state
            .history
            .iter()
            .find_map(|screen| match screen {
                Screen::Expenses(expenses_state) => Some(
                    state
                        .visible_expenses(expenses_state)
                        .iter()
                        .map(|e| e.id.to_string())
                        .collect(),
                ),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn selected_index(&self) -> Option<usize> {
        match &self.state().history[0] {
            Screen::Expenses(expenses_state) => expenses_state.selected_index(),
            _ => None,
        }
    }

    pub fn list_loading(&self) -> LoadingState {
        match &self.state().history[0] {
            Screen::Expenses(expenses_state) => expenses_state.loading.clone(),
            _ => LoadingState::NotStarted,
        }
    }

    /// Assert that the app is on a specific screen type
    ///
    /// Uses discriminant comparison to check screen type without
    /// requiring full equality of state.
    pub fn assert_screen_type(&self, expected_discriminant: std::mem::Discriminant<Screen>) {
        let current = self.state().current_screen();
        assert_eq!(
            std::mem::discriminant(current),
            expected_discriminant,
            "Expected different screen. Current: {:?}",
            current
        );
    }

    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
