//! Structural checks a shift must pass before it is sent to the platform.
//!
//! Mirrors the platform's shift schema: start is "YYYY-MM-DD HH:MM" with a
//! year between 2020 and 2099, duration is 1-9999 minutes, slots 1-999.

use crate::errors::ValidationError;
use crate::export::ShiftRow;
use crate::models::ShiftRecord;
use crate::utils::time::{format_start, parse_date_time};
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_DURATION: i64 = 1;
pub const MAX_DURATION: i64 = 9999;
pub const MIN_SLOTS: u32 = 1;
pub const MAX_SLOTS: u32 = 999;

static START_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^20[2-9][0-9]-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01]) ([01][0-9]|2[0-3]):[0-5][0-9]$")
        .expect("start pattern is a valid regex")
});

/// Check a record; the first failing check is reported.
pub fn validate(record: &ShiftRecord) -> Result<&ShiftRecord, ValidationError> {
    if record.need_id.trim().is_empty() {
        return Err(ValidationError::new("need_id", "must not be empty"));
    }

    let start = format_start(&record.start);
    if !START_PATTERN.is_match(&start) {
        return Err(ValidationError::new(
            "start",
            format!("'{start}' is outside the accepted range 2020-01-01 00:00 .. 2099-12-31 23:59"),
        ));
    }

    if !(MIN_DURATION..=MAX_DURATION).contains(&record.duration) {
        return Err(ValidationError::new(
            "duration",
            format!(
                "{} is not between {MIN_DURATION} and {MAX_DURATION} minutes",
                record.duration
            ),
        ));
    }

    if !(MIN_SLOTS..=MAX_SLOTS).contains(&record.slots) {
        return Err(ValidationError::new(
            "slots",
            format!("{} is not between {MIN_SLOTS} and {MAX_SLOTS}", record.slots),
        ));
    }

    Ok(record)
}

/// Turn a review row back into a record, then validate it.
///
/// Unparsable fields are reported the same way as out-of-range ones, in
/// the same field order as [`validate`].
pub fn validate_row(row: &ShiftRow) -> Result<ShiftRecord, ValidationError> {
    let need_id = row.need_id.trim();
    if need_id.is_empty() {
        return Err(ValidationError::new("need_id", "must not be empty"));
    }

    if row.start_date.trim().is_empty() || row.start_time.trim().is_empty() {
        return Err(ValidationError::new("start", "is missing"));
    }
    let start = parse_date_time(&row.start_date, &row.start_time).ok_or_else(|| {
        ValidationError::new(
            "start",
            format!(
                "'{} {}' is not a valid YYYY-MM-DD HH:MM timestamp",
                row.start_date.trim(),
                row.start_time.trim()
            ),
        )
    })?;

    let duration: i64 = row.duration.trim().parse().map_err(|_| {
        ValidationError::new("duration", format!("'{}' is not a number", row.duration))
    })?;

    let slots: u32 = row.slots.trim().parse().map_err(|_| {
        ValidationError::new("slots", format!("'{}' is not a non-negative number", row.slots))
    })?;

    let record = ShiftRecord::new(need_id, start, duration, slots);
    validate(&record)?;
    Ok(record)
}
