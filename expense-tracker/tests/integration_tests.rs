use expense_api::endpoints::{
    expenses::{Expense, ExpenseData},
    ExpenseId,
};
use expense_tracker::background::BackgroundJob;
use expense_tracker::commands::AppCommand;
use expense_tracker::input::{Key, KeyEvent};
use expense_tracker::state::{FormField, LoadingState, ManageMode, SubmissionState};
use expense_tracker::testing::{InMemoryBackend, TestApp};
use expense_tracker::ui::screens::Screen;
use expense_tracker::utils::dates;

// ============================================================================
// Helper Functions
// ============================================================================

fn expense(id: &str, amount: f64, days_ago: i64, description: &str) -> Expense {
    Expense::new(
        ExpenseId::from(id),
        ExpenseData::new(
            amount,
            dates::date_minus_days(dates::today(), days_ago),
            description,
        ),
    )
}

fn expenses_screen() -> std::mem::Discriminant<Screen> {
    std::mem::discriminant(&Screen::Expenses(Default::default()))
}

fn manage_screen(app: &TestApp) -> &expense_tracker::state::ManageExpenseState {
    match app.state().current_screen() {
        Screen::ManageExpense(manage_state) => manage_state,
        other => panic!("expected manage screen, got {other:?}"),
    }
}

/// Fill the add form field by field, starting from the amount
fn fill_form(app: &mut TestApp, amount: &str, date: &str, description: &str) {
    app.type_text(amount);
    app.send_key(Key::Tab);
    app.type_text(date);
    app.send_key(Key::Tab);
    app.type_text(description);
}

fn clear_focused_field(app: &mut TestApp) {
    for _ in 0..20 {
        app.send_key(Key::Backspace);
    }
}

// ============================================================================
// Global keys
// ============================================================================

#[test]
fn test_quit_flow() {
    let mut app = TestApp::new();
    app.assert_not_quit();

    app.send_key(Key::Char('q'));

    app.assert_should_quit();
}

#[test]
fn test_help_toggle() {
    let mut app = TestApp::new();
    assert!(!app.state().help_visible);

    app.send_key(Key::Char('?'));
    assert!(app.state().help_visible);

    // Other keys are swallowed while help is open
    app.send_key(Key::Char('a'));
    app.assert_screen_type(expenses_screen());

    app.send_key(Key::Esc);
    assert!(!app.state().help_visible);
}

#[test]
fn test_logs_navigation() {
    let mut app = TestApp::with_expenses(vec![]);

    app.send_key(Key::Char('L'));
    assert!(matches!(app.state().current_screen(), Screen::Logs(_)));

    app.send_key(Key::Char('h'));
    app.assert_screen_type(expenses_screen());
}

// ============================================================================
// Loading the list
// ============================================================================

#[tokio::test]
async fn test_initial_load_shows_newest_first() {
    let backend = InMemoryBackend::new();
    backend.insert(expense("old", 4.0, 3, "Coffee"));
    backend.insert(expense("new", 12.0, 0, "Lunch"));

    let mut app = TestApp::new();
    app.dispatch(AppCommand::LoadExpenses);
    assert!(matches!(app.list_loading(), LoadingState::Loading(_)));

    app.run_jobs(&backend).await;

    assert_eq!(app.list_loading(), LoadingState::Loaded);
    assert_eq!(app.visible_ids(), vec!["new", "old"]);
    assert_eq!(app.selected_index(), Some(0));
}

#[tokio::test]
async fn test_load_failure_is_dismissable() {
    let backend = InMemoryBackend::new();
    backend.fail_reads(true);

    let mut app = TestApp::new();
    app.dispatch(AppCommand::LoadExpenses);
    app.run_jobs(&backend).await;

    assert_eq!(
        app.list_loading(),
        LoadingState::Error("Could not fetch expenses".to_string())
    );

    app.send_key(Key::Enter);

    assert_eq!(app.list_loading(), LoadingState::Loaded);
    assert!(app.visible_ids().is_empty());
}

#[test]
fn test_period_toggle_reveals_older_expenses() {
    let mut app = TestApp::with_expenses(vec![
        expense("recent", 5.0, 1, "Snack"),
        expense("ancient", 80.0, 30, "Shoes"),
    ]);
    assert_eq!(app.visible_ids(), vec!["recent"]);

    app.send_key(Key::Tab);
    assert_eq!(app.visible_ids(), vec!["recent", "ancient"]);

    app.send_key(Key::Tab);
    assert_eq!(app.visible_ids(), vec!["recent"]);
}

#[test]
fn test_list_selection_wraps() {
    let mut app = TestApp::with_expenses(vec![
        expense("a", 1.0, 0, "A"),
        expense("b", 2.0, 1, "B"),
    ]);

    app.send_key(Key::Char('k'));
    assert_eq!(app.selected_index(), Some(1));

    app.send_key(Key::Char('j'));
    assert_eq!(app.selected_index(), Some(0));
}

// ============================================================================
// Adding
// ============================================================================

#[tokio::test]
async fn test_add_expense_round_trip() {
    let backend = InMemoryBackend::with_ids(["abc123"]);
    let mut app = TestApp::with_expenses(vec![]);
    let today = dates::format_date(dates::today());

    app.send_key(Key::Char('a'));
    assert_eq!(manage_screen(&app).mode, ManageMode::Add);
    assert_eq!(manage_screen(&app).title(), "Add Expense");

    fill_form(&mut app, "19.99", &today, "  Groceries ");
    app.send_key(Key::Enter);

    assert!(manage_screen(&app).is_submitting());
    assert!(matches!(
        app.jobs(),
        [BackgroundJob::CreateExpense { data, .. }] if data.description == "Groceries"
    ));

    app.run_jobs(&backend).await;

    app.assert_screen_type(expenses_screen());
    assert_eq!(app.visible_ids(), vec!["abc123"]);
    let stored = app.state().store.get(&ExpenseId::from("abc123")).cloned();
    assert_eq!(
        stored.map(|e| (e.amount, e.description)),
        Some((19.99, "Groceries".to_string()))
    );
    assert_eq!(backend.len(), 1);
}

#[test]
fn test_invalid_submit_stays_local() {
    let mut app = TestApp::with_expenses(vec![]);

    app.send_key(Key::Char('a'));
    fill_form(&mut app, "-3", "2023-02-30", "   ");
    app.send_key(Key::Enter);

    let manage_state = manage_screen(&app);
    assert!(app.jobs().is_empty());
    assert_eq!(manage_state.submission, SubmissionState::Idle);
    assert!(manage_state.form.is_invalid());
    for field in FormField::ALL {
        assert!(!manage_state.form.field(field).is_valid, "{field:?}");
    }
}

#[tokio::test]
async fn test_save_failure_shows_error_and_keeps_store() {
    let backend = InMemoryBackend::new();
    backend.fail_writes(true);
    let mut app = TestApp::with_expenses(vec![]);
    let today = dates::format_date(dates::today());

    app.send_key(Key::Char('a'));
    fill_form(&mut app, "19.99", &today, "Groceries");
    app.send_key(Key::Enter);
    app.run_jobs(&backend).await;

    assert_eq!(
        manage_screen(&app).submission,
        SubmissionState::Error("Could not save data".to_string())
    );
    assert!(app.state().store.is_empty());

    // Typing does nothing until the error is dismissed
    app.send_key(Key::Char('x'));
    app.send_key(Key::Esc);

    let manage_state = manage_screen(&app);
    assert_eq!(manage_state.submission, SubmissionState::Idle);
    assert_eq!(manage_state.form.field(FormField::Amount).value, "");
    assert_eq!(manage_state.form.field(FormField::Description).value, "");
}

// ============================================================================
// Editing and deleting
// ============================================================================

#[tokio::test]
async fn test_edit_expense_updates_store_and_backend() {
    let lunch = expense("e1", 12.5, 0, "Lunch");
    let backend = InMemoryBackend::new();
    backend.insert(lunch.clone());
    let mut app = TestApp::with_expenses(vec![lunch]);

    app.send_key(Key::Enter);
    let manage_state = manage_screen(&app);
    assert_eq!(manage_state.mode, ManageMode::Edit(ExpenseId::from("e1")));
    assert_eq!(manage_state.form.field(FormField::Amount).value, "12.5");
    assert_eq!(manage_state.form.submit_label(), "Update");

    clear_focused_field(&mut app);
    app.type_text("15");
    app.send_key(Key::Enter);
    app.run_jobs(&backend).await;

    app.assert_screen_type(expenses_screen());
    assert_eq!(
        app.state()
            .store
            .get(&ExpenseId::from("e1"))
            .map(|e| e.amount),
        Some(15.0)
    );
    assert_eq!(
        backend.get(&ExpenseId::from("e1")).map(|d| d.amount),
        Some(15.0)
    );
}

#[tokio::test]
async fn test_delete_expense() {
    let lunch = expense("e1", 12.5, 0, "Lunch");
    let backend = InMemoryBackend::new();
    backend.insert(lunch.clone());
    let mut app = TestApp::with_expenses(vec![lunch]);

    app.send_key(Key::Char('e'));
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('d')));
    assert!(matches!(
        app.jobs(),
        [BackgroundJob::DeleteExpense { .. }]
    ));

    app.run_jobs(&backend).await;

    app.assert_screen_type(expenses_screen());
    assert!(app.state().store.is_empty());
    assert!(backend.is_empty());
    assert_eq!(app.selected_index(), None);
}

#[tokio::test]
async fn test_delete_failure_keeps_expense() {
    let lunch = expense("e1", 12.5, 0, "Lunch");
    let backend = InMemoryBackend::new();
    backend.insert(lunch.clone());
    backend.fail_writes(true);
    let mut app = TestApp::with_expenses(vec![lunch]);

    app.send_key(Key::Enter);
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('d')));
    app.run_jobs(&backend).await;

    assert_eq!(
        manage_screen(&app).submission,
        SubmissionState::Error("Could not delete expense".to_string())
    );
    assert_eq!(app.state().store.len(), 1);
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_leaving_the_screen_discards_the_result() {
    let backend = InMemoryBackend::with_ids(["abc123"]);
    let mut app = TestApp::with_expenses(vec![]);
    let today = dates::format_date(dates::today());

    app.send_key(Key::Char('a'));
    fill_form(&mut app, "7", &today, "Taxi");
    app.send_key(Key::Enter);

    let cancelled = match app.jobs() {
        [BackgroundJob::CreateExpense { cancel, .. }] => cancel.clone(),
        other => panic!("unexpected jobs: {other:?}"),
    };

    app.state_mut().navigate_back();
    assert!(cancelled.is_cancelled());

    app.run_jobs(&backend).await;

    app.assert_screen_type(expenses_screen());
    assert!(app.state().store.is_empty());
    assert!(backend.is_empty());
}

#[test]
fn test_quit_cancels_in_flight_writes() {
    let mut app = TestApp::with_expenses(vec![]);
    let today = dates::format_date(dates::today());

    app.send_key(Key::Char('a'));
    fill_form(&mut app, "7", &today, "Taxi");
    app.send_key(Key::Enter);

    // The form ignores keys while submitting
    app.send_key(Key::Char('q'));
    app.assert_not_quit();

    app.send_key_event(KeyEvent::with_ctrl(Key::Char('c')));

    app.assert_should_quit();
    assert!(matches!(
        app.jobs(),
        [BackgroundJob::CreateExpense { cancel, .. }] if cancel.is_cancelled()
    ));
}
