use crate::utils::time::format_start;
use chrono::NaiveDateTime;
use serde::Serialize;

/// A dated, timed, capacity-bounded volunteer slot for one need.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ShiftRecord {
    pub need_id: String,
    pub start: NaiveDateTime,
    /// Minutes.
    pub duration: i64,
    pub slots: u32,
}

impl ShiftRecord {
    pub fn new(need_id: impl Into<String>, start: NaiveDateTime, duration: i64, slots: u32) -> Self {
        Self {
            need_id: need_id.into(),
            start,
            duration,
            slots,
        }
    }

    /// Records without a need id come from `default` templates and are never submitted.
    pub fn is_unmapped(&self) -> bool {
        self.need_id.trim().is_empty()
    }

    pub fn start_str(&self) -> String {
        format_start(&self.start)
    }
}
