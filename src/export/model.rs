// src/export/model.rs

use crate::models::ShiftRecord;
use serde::{Deserialize, Serialize};

/// One line of the review file.
///
/// Kept as strings so a reviewer can edit the file freely; rows are parsed
/// and validated again before submission.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShiftRow {
    /// Title of the calendar event the shift came from.
    pub need_name: String,
    pub need_id: String,
    pub start_date: String,
    pub start_time: String,
    pub duration: String,
    pub slots: String,
}

impl ShiftRow {
    pub fn from_record(need_name: &str, record: &ShiftRecord) -> Self {
        Self {
            need_name: need_name.to_string(),
            need_id: record.need_id.clone(),
            start_date: record.start.format("%Y-%m-%d").to_string(),
            start_time: record.start.format("%H:%M").to_string(),
            duration: record.duration.to_string(),
            slots: record.slots.to_string(),
        }
    }

    pub fn is_unmapped(&self) -> bool {
        self.need_id.trim().is_empty()
    }

    /// Identity used by `--dedupe`: the event title does not count.
    pub fn shift_key(&self) -> [String; 5] {
        [
            &self.need_id,
            &self.start_date,
            &self.start_time,
            &self.duration,
            &self.slots,
        ]
        .map(|s| s.trim().to_string())
    }
}
