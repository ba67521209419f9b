use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Calendar query window: `from` at midnight up to the end of `to` (exclusive next midnight).
pub fn query_window(from: &str, to: &str) -> AppResult<(NaiveDateTime, NaiveDateTime)> {
    let start = parse_date(from).ok_or_else(|| AppError::InvalidDate(from.to_string()))?;
    let end = parse_date(to).ok_or_else(|| AppError::InvalidDate(to.to_string()))?;

    if end < start {
        return Err(AppError::InvalidDate(format!(
            "end date {to} is before start date {from}"
        )));
    }

    let end_next = end
        .succ_opt()
        .ok_or_else(|| AppError::InvalidDate(to.to_string()))?;

    Ok((
        start.and_time(NaiveTime::MIN),
        end_next.and_time(NaiveTime::MIN),
    ))
}
