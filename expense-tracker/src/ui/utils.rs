use ratatui::text::Span;

use crate::utils::dates;
use chrono::NaiveDate;

/// Amounts are shown in dollars with two decimals
pub fn format_amount(amount: f64) -> String {
    if amount >= 0.0 {
        format!("${:.2}", amount)
    } else {
        format!("-${:.2}", amount.abs())
    }
}

pub fn fmt_dollars(amount: f64) -> Span<'static> {
    Span::from(format_amount(amount))
}

pub fn fmt_date(date: NaiveDate) -> String {
    dates::format_date(date)
}

/// Shorten `text` to `max_len` characters, keeping its end
pub fn truncate_start(text: &str, max_len: usize) -> String {
    let len = text.chars().count();
    if len <= max_len {
        text.to_string()
    } else {
        let keep = max_len.saturating_sub(3);
        let tail: String = text.chars().skip(len - keep).collect();
        format!("...{}", tail)
    }
}
