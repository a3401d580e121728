use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::state::{store, AppState, ExpensesState, LoadingState};
use crate::ui::{
    components::{empty_state, error_overlay, help_bar, loading_overlay, screen_title},
    layouts, theme, utils,
};
use expense_api::endpoints::expenses::Expense;

pub fn render(f: &mut Frame, app: &AppState, state: &ExpensesState) {
    if let LoadingState::Loading(throbber_state) = &state.loading {
        loading_overlay::render_loading_overlay(f, "Loading expenses...", throbber_state);
        return;
    }

    let expenses = app.visible_expenses(state);
    let (title_area, summary_area, content_area, help_area) =
        layouts::screen_layout_with_summary(f.area());

    screen_title::render_screen_title(f, title_area, "Expenses", &state.loading);
    render_summary(f, summary_area, &state.period_label(app.recent_days), &expenses);
    render_content(f, content_area, state, &expenses, app.recent_days);
    help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_EXPENSES);

    if let LoadingState::Error(message) = &state.loading {
        error_overlay::render_error_overlay(f, message);
    }
}

fn render_summary(f: &mut Frame, area: Rect, period_label: &str, expenses: &[&Expense]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent_border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [label_area, total_area] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(16)]).areas(inner);

    f.render_widget(Paragraph::new(period_label), label_area);
    f.render_widget(
        Paragraph::new(utils::fmt_dollars(store::total(expenses.iter().copied())))
            .style(theme::amount_style().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Right),
        total_area,
    );
}

fn render_content(
    f: &mut Frame,
    area: Rect,
    state: &ExpensesState,
    expenses: &[&Expense],
    recent_days: i64,
) {
    if expenses.is_empty() {
        empty_state::render_empty_state(
            f,
            area,
            "Expenses",
            &state.fallback_text(recent_days),
            Some("Press a to add an expense"),
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Description"),
        Cell::from(Text::from("Amount").right_aligned()),
    ])
    .style(theme::header_style())
    .underlined();

    let rows: Vec<Row> = expenses
        .iter()
        .map(|expense| {
            Row::new(vec![
                Cell::from(utils::fmt_date(expense.date)),
                Cell::from(expense.description.clone()),
                Cell::from(Text::from(utils::format_amount(expense.amount)).right_aligned())
                    .style(theme::amount_style()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Expenses ({})", expenses.len())),
    )
    .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ExpensesPeriod;
    use crate::ui::screens::Screen;
    use crate::utils::dates;
    use expense_api::endpoints::{expenses::ExpenseData, ExpenseId};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| {
                if let Screen::Expenses(state) = app.current_screen() {
                    render(f, app, state);
                }
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn loaded(app: &mut AppState) {
        if let Screen::Expenses(state) = app.current_screen_mut() {
            state.loading = LoadingState::Loaded;
        }
    }

    #[test]
    fn shows_period_total_and_rows() {
        let mut app = AppState::new();
        app.store.add(Expense::new(
            ExpenseId::from("a"),
            ExpenseData::new(19.99, dates::today(), "Groceries"),
        ));
        loaded(&mut app);

        let screen = rendered(&app);
        assert!(screen.contains("Last 7 Days"));
        assert!(screen.contains("$19.99"));
        assert!(screen.contains("Groceries"));
    }

    #[test]
    fn empty_periods_show_fallback_text() {
        let mut app = AppState::new();
        loaded(&mut app);
        assert!(rendered(&app).contains("No expenses registered for the last 7 days."));

        if let Screen::Expenses(state) = app.current_screen_mut() {
            state.period = ExpensesPeriod::All;
        }
        assert!(rendered(&app).contains("No registered expenses found!"));
    }

    #[test]
    fn load_failure_shows_the_error_overlay() {
        let mut app = AppState::new();
        if let Screen::Expenses(state) = app.current_screen_mut() {
            state.loading = LoadingState::Error("Could not fetch expenses".to_string());
        }

        assert!(rendered(&app).contains("Could not fetch expenses"));
    }
}
