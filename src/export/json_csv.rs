// src/export/json_csv.rs

use crate::api::ShiftBatch;
use crate::errors::AppResult;
use crate::export::{ShiftRow, notify_export_success};
use crate::ui::messages::info;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export rows as pretty-printed JSON.
pub fn export_json(rows: &[ShiftRow], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(rows)?;
    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export rows as CSV (header written by serde).
pub fn export_csv(rows: &[ShiftRow], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}

/// Read a (possibly hand-edited) review CSV.
pub fn import_csv(path: &Path) -> AppResult<Vec<ShiftRow>> {
    info(format!("Reading shift data from: {}", path.display()));

    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        let row: ShiftRow = row?;
        rows.push(row);
    }
    Ok(rows)
}

/// Write the request bodies that were (or would be) sent, keyed by need id.
pub fn export_payload(batches: &[ShiftBatch], path: &Path) -> AppResult<()> {
    info(format!("Writing request payloads: {}", path.display()));

    let mut by_need = Map::new();
    for batch in batches {
        by_need.insert(batch.need_id.clone(), serde_json::to_value(&batch.body)?);
    }

    let json_data = serde_json::to_string_pretty(&Value::Object(by_need))?;
    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("Payload", path);
    Ok(())
}
