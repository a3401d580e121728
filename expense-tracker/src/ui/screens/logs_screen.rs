use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table},
};
use tracing::Level;

use crate::log_buffer::{LogBuffer, LogEntry};
use crate::state::LogsState;
use crate::ui::{
    components::{empty_state, help_bar},
    layouts, theme, utils,
};

const TARGET_WIDTH: usize = 25;

pub fn render(f: &mut Frame, state: &LogsState, log_buffer: &LogBuffer) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let title = format!("Logs ({} entries)", state.total_entries);
    f.render_widget(Paragraph::new(title).style(theme::title_style()), title_area);

    render_logs(f, content_area, state, log_buffer);
    render_help(f, help_area, state);
}

fn render_logs(f: &mut Frame, area: Rect, state: &LogsState, log_buffer: &LogBuffer) {
    let total = log_buffer.len();
    if total == 0 {
        empty_state::render_empty_state(f, area, "Session Logs", "No logs yet", None);
        return;
    }

    // Borders plus header and its margin
    let inner_height = area.height.saturating_sub(4) as usize;
    let entries = log_buffer.window(state.scroll_offset, inner_height);
    let end = total.saturating_sub(state.scroll_offset);
    let start = end.saturating_sub(entries.len());

    let rows: Vec<Row> = entries.iter().map(log_row).collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(5),
        Constraint::Length(TARGET_WIDTH as u16),
        Constraint::Min(30),
    ];

    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Logs [{}-{} of {}] ",
            start + 1,
            end,
            total
        )))
        .header(
            Row::new(vec!["Time", "Level", "Target", "Message"])
                .style(theme::header_style())
                .bottom_margin(1),
        );

    f.render_widget(table, area);
}

fn log_row(entry: &LogEntry) -> Row<'static> {
    let (label, style) = match entry.level {
        Level::ERROR => (
            "ERROR",
            Style::default()
                .fg(theme::COLOR_NEGATIVE)
                .add_modifier(Modifier::BOLD),
        ),
        Level::WARN => ("WARN ", theme::loading_style()),
        Level::INFO => ("INFO ", Style::default().fg(theme::COLOR_AMOUNT)),
        Level::DEBUG => ("DEBUG", Style::default().fg(Color::Blue)),
        Level::TRACE => ("TRACE", theme::placeholder_style()),
    };

    Row::new(vec![
        entry.timestamp.format("%H:%M:%S%.3f").to_string(),
        label.to_string(),
        utils::truncate_start(&entry.target, TARGET_WIDTH),
        entry.message.clone(),
    ])
    .style(style)
}

fn render_help(f: &mut Frame, area: Rect, state: &LogsState) {
    let scroll_info = if state.scroll_offset > 0 {
        format!(" (scrolled {} from bottom)", state.scroll_offset)
    } else {
        String::new()
    };

    let help_text = format!(
        "j/k: scroll | PgUp/PgDn: page | h/Esc: back | ?: help{}",
        scroll_info
    );

    help_bar::render_help_bar(f, area, &help_text);
}
