//! Contract with the volunteer-management platform.
//!
//! The batch submitter only talks to [`ShiftApi`]; [`http::AmplifyClient`]
//! is the live implementation and tests supply their own.

pub mod http;

pub use http::AmplifyClient;

use crate::errors::SubmitError;
use crate::models::ShiftRecord;
use serde::{Deserialize, Serialize};

/// One shift as the platform expects it: every value is a string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShiftPayload {
    /// "YYYY-MM-DD HH:MM"
    pub start: String,
    /// Minutes.
    pub duration: String,
    pub slots: String,
}

impl From<&ShiftRecord> for ShiftPayload {
    fn from(record: &ShiftRecord) -> Self {
        Self {
            start: record.start_str(),
            duration: record.duration.to_string(),
            slots: record.slots.to_string(),
        }
    }
}

/// Body of `POST /needs/{need_id}/shifts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ShiftsBody {
    pub shifts: Vec<ShiftPayload>,
}

/// Every shift for one need id, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftBatch {
    pub need_id: String,
    pub body: ShiftsBody,
}

impl ShiftBatch {
    pub fn len(&self) -> usize {
        self.body.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.shifts.is_empty()
    }
}

/// What the platform reported back for one accepted batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreatedShifts {
    pub created: usize,
    pub ids: Vec<String>,
}

pub trait ShiftApi {
    /// Create every shift of `batch` under its need id.
    fn create_shifts(&self, batch: &ShiftBatch) -> Result<CreatedShifts, SubmitError>;

    /// Human title of a need, for the report.
    fn need_title(&self, need_id: &str) -> Result<String, SubmitError>;
}
