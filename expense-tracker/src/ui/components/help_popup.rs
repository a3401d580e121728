use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use crate::ui::{layouts, screens::Screen, theme};

pub fn render_help_popup(f: &mut Frame, screen: &Screen) {
    let help_items = get_help_items(screen);

    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::LARGE,
        " Help (press ? or Esc to close) ",
        theme::accent_border_style(),
    );

    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

pub fn get_help_items(screen: &Screen) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    match screen {
        Screen::Expenses(..) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("Enter/e", "Edit selected expense"));
            items.push(("a/n", "Add a new expense"));
            items.push(("Tab", "Switch between recent and all expenses"));
            items.push(("r", "Reload expenses"));
            items.push(("L", "Show session logs"));
        }
        Screen::ManageExpense(manage_state) => {
            items.push(("Type", "Edit the focused field"));
            items.push(("Tab/↓", "Next field"));
            items.push(("Shift-Tab/↑", "Previous field"));
            items.push(("Backspace", "Delete last character"));
            items.push(("Enter", manage_state.form.submit_label()));
            if manage_state.is_editing() {
                items.push(("Ctrl-D", "Delete this expense"));
            }
            items.push(("Esc", "Cancel"));
        }
        Screen::Logs(..) => {
            items.push(("↑/k", "Scroll up (older logs)"));
            items.push(("↓/j", "Scroll down (newer logs)"));
            items.push(("Page Up", "Scroll up one page"));
            items.push(("Page Down", "Scroll down one page"));
            items.push(("h/Esc", "Back to expenses"));
        }
    }

    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("?", "Toggle this help"));
    items.push(("q", "Quit application"));
    items.push(("Ctrl-C", "Quit from anywhere, abandoning unsaved changes"));

    items
}
