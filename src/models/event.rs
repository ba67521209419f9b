use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One calendar entry, already reduced to local wall-clock time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawEvent {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl RawEvent {
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            start,
            end,
        }
    }

    /// Calendar entries must end after they start.
    pub fn is_well_formed(&self) -> bool {
        self.end > self.start
    }
}
