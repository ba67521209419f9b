//! Where raw events come from: a JSON export or the Google Calendar API.

pub mod gcal;

pub use gcal::GoogleCalendar;

use crate::errors::{AppError, AppResult};
use crate::models::RawEvent;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub trait CalendarSource {
    /// Events that start inside `[from, to)`.
    fn fetch(&self, from: NaiveDateTime, to: NaiveDateTime) -> AppResult<Vec<RawEvent>>;
}

/// JSON array of `{"title", "start", "end"}` with `YYYY-MM-DDTHH:MM:SS` times.
pub struct EventFile {
    path: PathBuf,
}

impl EventFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Every well-formed event in the file, in file order.
    pub fn read_all(&self) -> AppResult<Vec<RawEvent>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            AppError::Calendar(format!("cannot read {}: {e}", self.path.display()))
        })?;
        let events: Vec<RawEvent> = serde_json::from_str(&content)?;
        Ok(keep_well_formed(events))
    }
}

impl CalendarSource for EventFile {
    fn fetch(&self, from: NaiveDateTime, to: NaiveDateTime) -> AppResult<Vec<RawEvent>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.start >= from && e.start < to)
            .collect())
    }
}

/// Drop events that do not end after they start.
pub(crate) fn keep_well_formed(events: Vec<RawEvent>) -> Vec<RawEvent> {
    events
        .into_iter()
        .filter(|e| {
            let ok = e.is_well_formed();
            if !ok {
                warn!(title = %e.title, start = %e.start, end = %e.end, "event skipped: end is not after start");
            }
            ok
        })
        .collect()
}
