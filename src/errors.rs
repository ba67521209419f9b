//! Unified application error type.
//! Every command handler returns AppError so a run either completes or
//! stops with one readable message. Per-record and per-group failures
//! (ValidationError, SubmitError) are data in the reports, not AppErrors.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingSecret(&'static str),

    // ---------------------------
    // Template catalog
    // ---------------------------
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Unknown calendar '{0}'")]
    UnknownCalendar(String),

    // ---------------------------
    // Network
    // ---------------------------
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Calendar error: {0}")]
    Calendar(String),

    // ---------------------------
    // Submission
    // ---------------------------
    #[error("{0} shift group(s) failed to submit")]
    GroupsFailed(usize),

    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// A shift record that failed a structural check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Failure of one remote call for one need-ID group.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Network fault, timeout, 408/429 or 5xx. Worth another attempt.
    #[error("transient failure: {0}")]
    Transient(String),

    /// Authentication failure or rejected payload. Never retried.
    #[error("rejected (HTTP {status}): {message}")]
    Permanent { status: u16, message: String },
}

impl SubmitError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::Transient(_))
    }

    /// Classify a non-2xx HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            408 | 429 | 500..=599 => SubmitError::Transient(format!("HTTP {status}: {message}")),
            _ => SubmitError::Permanent { status, message },
        }
    }
}
