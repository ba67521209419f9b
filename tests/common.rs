#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use starpass::catalog::{CatalogFile, TemplateCatalog};
use starpass::models::RawEvent;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Catalog used across the test suite: one calendar, specific keywords first.
pub const CATALOG_YAML: &str = r#"
calendars:
  practice:
    calendar_id: "club.example_123@resource.calendar.google.com"
    queries: ["scrimmage"]
    templates:
      "dh: game 1":
        description: Double header, first game
        group: adults
        initiative: Home Teams
        type: game
        need_ids:
          - id: "1001"
            description: NSOs
            slots: 12
            max_length: 165
            offset_start: 15
            offset_end: 30
          - id: "1002"
            description: Announcers
            slots: 2
            max_length: 60
            offset_start: 0
            offset_end: 0
      "petals":
        description: Petals practice
        group: juniors
        initiative: Junior Derby
        type: practice
        need_ids:
          - id: 2001
            description: Coaches
            slots: 2
            offset_start: -15
            offset_end: 0
      "buds":
        description: Buds practice
        group: juniors
        initiative: Junior Derby
        type: practice
        need_ids:
          - id: "3001"
            description: Coaches
            slots: 3
      "default":
        description: Unmatched event
        group: null
        initiative: Unassigned
        type: practice
        need_ids:
          - id: ""
            description: Volunteers
            slots: 1
"#;

pub fn sp() -> Command {
    let mut cmd = cargo_bin_cmd!("starpass");
    cmd.env("NO_COLOR", "1")
        .env_remove("AMPLIFY_TOKEN")
        .env_remove("GCAL_TOKEN")
        .env_remove("RUST_LOG")
        .current_dir(env::temp_dir());
    cmd
}

/// Unique path inside the system temp dir; any existing file is removed.
pub fn temp_path(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("starpass_{}.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write the shared catalog to a temp file and return its path.
pub fn write_catalog(name: &str) -> String {
    let path = temp_path(name, "yaml");
    fs::write(&path, CATALOG_YAML).expect("write catalog");
    path
}

/// Config path that does not exist, so built-in defaults apply.
pub fn missing_config(name: &str) -> String {
    temp_path(&format!("{name}_conf"), "conf")
}

pub fn catalog_file() -> CatalogFile {
    CatalogFile::from_yaml_str(CATALOG_YAML).expect("fixture catalog parses")
}

pub fn practice(file: &CatalogFile) -> &TemplateCatalog {
    file.calendar("practice").expect("practice calendar")
}

/// "YYYY-MM-DD HH:MM" → NaiveDateTime
pub fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("valid test timestamp")
}

pub fn event(title: &str, start: &str, end: &str) -> RawEvent {
    RawEvent::new(title, dt(start), dt(end))
}
