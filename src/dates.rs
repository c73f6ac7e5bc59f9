//! Clock capability and human-relative date formatting.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

const SECONDS_PER_DAY: i64 = 86_400;

/// Source of the current instant.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for reproducible loads.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Parse an RFC 3339 date-time or a plain `YYYY-MM-DD` date (taken as midnight UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render `value` relative to `now`: "Today", "Yesterday", "N days ago",
/// "N weeks ago", "N months ago", or the plain date past a year.
///
/// Distance is measured in whole days rounded up, in either direction.
/// Unparseable input is returned unchanged.
pub fn format_relative(value: &str, now: DateTime<Utc>) -> String {
    let Some(date) = parse_date(value) else {
        return value.to_string();
    };

    let seconds = (now - date).num_seconds().abs();
    let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;

    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=29 => format!("{} weeks ago", days / 7),
        30..=364 => format!("{} months ago", days / 30),
        _ => date.format("%Y-%m-%d").to_string(),
    }
}
