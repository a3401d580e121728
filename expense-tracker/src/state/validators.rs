use crate::utils::dates::DATE_FORMAT;
use chrono::NaiveDate;

/// Parse the raw amount text. Empty or non-numeric input yields NaN.
pub fn parse_amount(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Parse a `YYYY-MM-DD` date. Impossible dates (e.g. month 13) are rejected.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

pub fn normalize_description(input: &str) -> String {
    input.trim().to_string()
}

pub fn is_valid_description(description: &str) -> bool {
    !description.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // Amount
    // ============================================================================

    #[test]
    fn accepts_positive_amounts() {
        assert!(is_valid_amount(parse_amount("12.50")));
        assert!(is_valid_amount(parse_amount(" 3 ")));
        assert_eq!(parse_amount("12.50"), 12.5);
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        assert!(!is_valid_amount(parse_amount("0")));
        assert!(!is_valid_amount(parse_amount("-5")));
    }

    #[test]
    fn empty_and_garbage_amounts_are_nan() {
        assert!(parse_amount("").is_nan());
        assert!(parse_amount("abc").is_nan());
        assert!(!is_valid_amount(parse_amount("")));
        assert!(!is_valid_amount(parse_amount("abc")));
    }

    #[test]
    fn rejects_infinite_amounts() {
        assert!(!is_valid_amount(parse_amount("inf")));
        assert!(!is_valid_amount(parse_amount("1e999")));
    }

    // ============================================================================
    // Date
    // ============================================================================

    #[test]
    fn accepts_calendar_dates() {
        assert_eq!(
            parse_date("2023-01-15"),
            NaiveDate::from_ymd_opt(2023, 1, 15)
        );
        assert_eq!(
            parse_date("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn rejects_impossible_or_missing_dates() {
        assert_eq!(parse_date("2023-13-40"), None);
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("15/01/2023"), None);
    }

    // ============================================================================
    // Description
    // ============================================================================

    #[test]
    fn description_must_have_content() {
        assert!(!is_valid_description("  "));
        assert!(!is_valid_description(""));
        assert!(is_valid_description("Lunch"));
    }

    #[test]
    fn description_is_trimmed() {
        assert_eq!(normalize_description("  Lunch \n"), "Lunch");
    }
}
