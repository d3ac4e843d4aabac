//! Clock helpers for the habit tracker
//!
//! Completion dates are local calendar days (`NaiveDate`, ISO `YYYY-MM-DD`)
//! and "today" is derived from the same local clock, so a toggle for today
//! and the stats' notion of today always agree.
//!
//! In debug builds `HABIT_MOCK_TIME` shifts the clock, either to a day
//! (`2024-01-01`, taken as noon) or to an instant (`2024-01-01 08:00:00`).
//! The shifted clock keeps ticking. Release builds ignore it.

use chrono::{DateTime, Local, NaiveDate};
use std::sync::OnceLock;

use crate::{HabitError, Result};

/// Environment variable that shifts the clock (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "HABIT_MOCK_TIME";

/// ISO calendar date format used for completion dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[cfg(any(debug_assertions, test))]
const MOCK_INSTANT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static CLOCK_SHIFT: OnceLock<Option<chrono::Duration>> = OnceLock::new();

#[cfg(any(debug_assertions, test))]
fn parse_mock_time(value: &str) -> Option<chrono::NaiveDateTime> {
    use chrono::{NaiveDateTime, NaiveTime};

    let value = value.trim();
    NaiveDateTime::parse_from_str(value, MOCK_INSTANT_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .map(|day| day.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()))
        })
}

#[cfg(debug_assertions)]
fn shift_from_env() -> Option<chrono::Duration> {
    use chrono::TimeZone;

    let raw = std::env::var(MOCK_TIME_ENV_VAR).ok()?;
    let Some(target) = parse_mock_time(&raw).and_then(|t| Local.from_local_datetime(&t).single())
    else {
        tracing::warn!(value = %raw, var = MOCK_TIME_ENV_VAR, "Ignoring unusable mock time");
        return None;
    };

    let shift = target.signed_duration_since(Local::now());
    tracing::info!(mock_time = %target, shift_secs = shift.num_seconds(), "Clock shifted");
    Some(shift)
}

#[cfg(not(debug_assertions))]
fn shift_from_env() -> Option<chrono::Duration> {
    None
}

/// Current local time, shifted by `HABIT_MOCK_TIME` when set
pub fn now() -> DateTime<Local> {
    let real = Local::now();
    match *CLOCK_SHIFT.get_or_init(shift_from_env) {
        Some(shift) => real + shift,
        None => real,
    }
}

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    now().date_naive()
}

/// Milliseconds since the Unix epoch for the given instant.
pub fn epoch_millis(dt: &DateTime<Local>) -> i64 {
    dt.timestamp_millis()
}

/// Format a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| HabitError::invalid_date(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format_date() {
        let date = parse_date("2024-01-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(format_date(date), "2024-01-01");
    }

    #[test]
    fn parse_date_trims_whitespace() {
        assert!(parse_date(" 2024-02-29 ").is_ok());
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(
            parse_date("yesterday"),
            Err(HabitError::InvalidDate("yesterday".into()))
        );
        assert!(parse_date("2023-02-29").is_err());
    }

    #[test]
    fn today_matches_now() {
        let before = now().date_naive();
        let t = today();
        let after = now().date_naive();
        assert!(t >= before && t <= after);
    }

    #[test]
    fn epoch_millis_is_positive() {
        assert!(epoch_millis(&now()) > 0);
    }

    #[test]
    fn mock_time_accepts_day_or_instant() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            parse_mock_time("2024-01-01 08:05:03"),
            day.and_hms_opt(8, 5, 3)
        );
        assert_eq!(parse_mock_time(" 2024-01-01 "), day.and_hms_opt(12, 0, 0));
        assert_eq!(parse_mock_time("tomorrow"), None);
    }
}
