use chrono::{Local, NaiveDate, TimeDelta};

/// Display format for expense dates; also the only format the form accepts
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `date` shifted back by `days`, saturating at the earliest representable date
pub fn date_minus_days(date: NaiveDate, days: i64) -> NaiveDate {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_sub_signed(delta))
        .unwrap_or(NaiveDate::MIN)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whether `date` lies within the last `days` days, inclusive on both ends
pub fn is_within_last_days(date: NaiveDate, today: NaiveDate, days: i64) -> bool {
    date >= date_minus_days(today, days) && date <= today
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn subtracts_across_month_boundaries() {
        assert_eq!(date_minus_days(date(2023, 3, 3), 7), date(2023, 2, 24));
        assert_eq!(date_minus_days(date(2024, 3, 3), 7), date(2024, 2, 25));
    }

    #[test]
    fn huge_offsets_saturate() {
        let today = date(2023, 6, 1);
        assert_eq!(date_minus_days(today, 1_000_000_000_000_000), NaiveDate::MIN);
        assert_eq!(date_minus_days(today, i64::MAX), NaiveDate::MIN);
        assert!(is_within_last_days(date(1970, 1, 1), today, i64::MAX));
    }

    #[test]
    fn recent_window_is_inclusive() {
        let today = date(2023, 6, 8);

        assert!(is_within_last_days(date(2023, 6, 8), today, 7));
        assert!(is_within_last_days(date(2023, 6, 1), today, 7));
        assert!(!is_within_last_days(date(2023, 5, 31), today, 7));
    }

    #[test]
    fn future_dates_are_not_recent() {
        assert!(!is_within_last_days(date(2023, 6, 9), date(2023, 6, 8), 7));
    }

    #[test]
    fn formats_as_iso() {
        assert_eq!(format_date(date(2023, 1, 5)), "2023-01-05");
    }
}
