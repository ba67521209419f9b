// src/export/mod.rs

mod fs_utils;
mod json_csv;
mod model;

pub use fs_utils::ensure_writable;
pub use json_csv::{export_csv, export_json, export_payload, import_csv};
pub use model::ShiftRow;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion line for every export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

/// Flat formats the review file can be written in.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}
