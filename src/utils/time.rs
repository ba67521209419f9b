//! Time utilities: the platform's "YYYY-MM-DD HH:MM" start format and minute arithmetic.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Start format accepted by the volunteer platform.
pub const START_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn format_start(dt: &NaiveDateTime) -> String {
    dt.format(START_FORMAT).to_string()
}

/// Join the split date/time columns of a review row.
pub fn parse_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    let d = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let t = NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()?;
    Some(d.and_time(t))
}

/// Whole minutes between two instants, rounded down.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_seconds().div_euclid(60)
}

/// `None` when the offset or the result is outside chrono's range.
pub fn add_minutes(dt: NaiveDateTime, mins: i64) -> Option<NaiveDateTime> {
    dt.checked_add_signed(TimeDelta::try_minutes(mins)?)
}
