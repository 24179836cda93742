//! Date token resolution.
//!
//! Parses strict `YYYY-MM-DD` literals (with an optional time), relative
//! keywords against a reference date, and daily-note file paths. Canonical
//! output is an epoch-millisecond timestamp; dates without a time component
//! are normalized to start of day. Unparseable tokens yield `None` and are
//! never fatal.

use chrono::{Duration, Months, NaiveDate, NaiveDateTime};

/// Resolves a date token against a reference "today".
///
/// The reference date is injected so resolution is deterministic; the public
/// parse entry point supplies the wall-clock date.
pub fn resolve_date(token: &str, today: NaiveDate) -> Option<i64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(token, format) {
            return Some(datetime.and_utc().timestamp_millis());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(token, "%Y-%m-%d") {
        return start_of_day(date);
    }

    let relative = match token.to_lowercase().as_str() {
        "today" => Some(today),
        "tomorrow" => Some(today + Duration::days(1)),
        "yesterday" => Some(today - Duration::days(1)),
        "next week" => Some(today + Duration::days(7)),
        "last week" => Some(today - Duration::days(7)),
        "next month" => today.checked_add_months(Months::new(1)),
        "last month" => today.checked_sub_months(Months::new(1)),
        _ => None,
    };

    relative.and_then(start_of_day)
}

/// Resolves a date from a daily-note file path.
///
/// The file must live under `daily_note_path` (or anywhere when that is
/// empty) and its stem must parse with the configured chrono format.
pub fn resolve_daily_note_date(file_path: &str, daily_note_path: &str, format: &str) -> Option<i64> {
    if !daily_note_path.is_empty() {
        let prefix = format!("{daily_note_path}/");
        if !file_path.starts_with(&prefix) {
            return None;
        }
    }

    let file_name = file_path.rsplit('/').next()?;
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    let date = NaiveDate::parse_from_str(stem, format).ok()?;
    start_of_day(date)
}

fn start_of_day(date: NaiveDate) -> Option<i64> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn ms(date: NaiveDate) -> i64 {
        date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis()
    }

    #[test]
    fn test_iso_date_literal() {
        let expected = ms(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(resolve_date("2024-06-01", reference()), Some(expected));
    }

    #[test]
    fn test_iso_date_with_time_keeps_time() {
        let ts = resolve_date("2024-06-01 09:30", reference()).unwrap();
        let start = ms(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(ts - start, (9 * 60 + 30) * 60 * 1000);
    }

    #[test]
    fn test_relative_keywords() {
        let today = reference();
        assert_eq!(resolve_date("today", today), Some(ms(today)));
        assert_eq!(
            resolve_date("tomorrow", today),
            Some(ms(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()))
        );
        assert_eq!(
            resolve_date("yesterday", today),
            Some(ms(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()))
        );
        assert_eq!(
            resolve_date("next week", today),
            Some(ms(NaiveDate::from_ymd_opt(2024, 3, 22).unwrap()))
        );
        assert_eq!(
            resolve_date("last week", today),
            Some(ms(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()))
        );
        assert_eq!(
            resolve_date("next month", today),
            Some(ms(NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()))
        );
        assert_eq!(
            resolve_date("last month", today),
            Some(ms(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()))
        );
    }

    #[test]
    fn test_relative_keywords_are_case_insensitive() {
        assert!(resolve_date("Tomorrow", reference()).is_some());
        assert!(resolve_date("NEXT WEEK", reference()).is_some());
    }

    #[test]
    fn test_month_arithmetic_clamps_at_month_end() {
        let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            resolve_date("next month", jan31),
            Some(ms(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()))
        );
    }

    #[test]
    fn test_unparseable_tokens_yield_none() {
        assert_eq!(resolve_date("", reference()), None);
        assert_eq!(resolve_date("soon", reference()), None);
        assert_eq!(resolve_date("2024-13-01", reference()), None);
        assert_eq!(resolve_date("01/06/2024", reference()), None);
        assert_eq!(resolve_date("2024-06-01 25:00", reference()), None);
    }

    #[test]
    fn test_daily_note_path_date() {
        let expected = ms(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap());
        assert_eq!(
            resolve_daily_note_date("journal/2024-05-20.md", "journal", "%Y-%m-%d"),
            Some(expected)
        );
    }

    #[test]
    fn test_daily_note_outside_configured_folder() {
        assert_eq!(
            resolve_daily_note_date("notes/2024-05-20.md", "journal", "%Y-%m-%d"),
            None
        );
    }

    #[test]
    fn test_daily_note_with_custom_format() {
        let expected = ms(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap());
        assert_eq!(
            resolve_daily_note_date("journal/20.05.2024.md", "journal", "%d.%m.%Y"),
            Some(expected)
        );
    }

    #[test]
    fn test_daily_note_with_non_date_stem() {
        assert_eq!(
            resolve_daily_note_date("journal/meeting-notes.md", "journal", "%Y-%m-%d"),
            None
        );
    }
}
