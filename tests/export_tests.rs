mod common;
use common::{dt, event, temp_path};
use starpass::calendar::{CalendarSource, EventFile};
use starpass::core::submit::group_records;
use starpass::export::{ShiftRow, export_csv, export_payload, import_csv};
use starpass::models::ShiftRecord;
use starpass::utils::date::query_window;
use std::fs;
use std::path::Path;

#[test]
fn test_hand_edited_csv_is_trimmed() {
    let path = temp_path("export_trim", "csv");
    fs::write(
        &path,
        "need_name,need_id,start_date,start_time,duration,slots\n\
         Petals , 2001 ,2099-01-11, 16:45 ,135, 2\n",
    )
    .expect("write csv");

    let rows = import_csv(Path::new(&path)).expect("import");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].need_name, "Petals");
    assert_eq!(rows[0].need_id, "2001");
    assert_eq!(rows[0].start_time, "16:45");
    assert_eq!(rows[0].slots, "2");
}

#[test]
fn test_csv_missing_column_is_an_error() {
    let path = temp_path("export_missing_col", "csv");
    fs::write(&path, "need_name,need_id,start_date\nPetals,2001,2099-01-11\n").expect("write csv");

    assert!(import_csv(Path::new(&path)).is_err());
}

#[test]
fn test_exported_csv_reads_back() {
    let path = temp_path("export_csv_back", "csv");
    let rows = vec![
        ShiftRow::from_record("DH: Game 1", &ShiftRecord::new("1001", dt("2099-01-10 18:15"), 135, 12)),
        ShiftRow::from_record("Team Social", &ShiftRecord::new("", dt("2099-01-12 19:00"), 180, 1)),
    ];

    export_csv(&rows, Path::new(&path)).expect("export");
    let back = import_csv(Path::new(&path)).expect("import");

    assert_eq!(back, rows);
    assert!(back[1].is_unmapped());
}

#[test]
fn test_payload_file_keyed_by_need_id() {
    let path = temp_path("export_payload", "json");
    let records = vec![
        ShiftRecord::new("3001", dt("2099-01-12 18:00"), 120, 3),
        ShiftRecord::new("1001", dt("2099-01-10 18:15"), 135, 12),
        ShiftRecord::new("3001", dt("2099-01-13 18:00"), 120, 3),
    ];

    export_payload(&group_records(&records), Path::new(&path)).expect("export");
    let content = fs::read_to_string(&path).expect("read");
    let value: serde_json::Value = serde_json::from_str(&content).expect("json");

    assert_eq!(value["3001"]["shifts"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["1001"]["shifts"][0]["slots"], "12");
    assert!(content.find("\"3001\"") < content.find("\"1001\""));
}

#[test]
fn test_event_file_filters_window_and_bad_events() {
    let path = temp_path("export_events", "json");
    let events = vec![
        event("Petals", "2099-01-11 17:00", "2099-01-11 19:00"),
        event("Buds", "2099-01-12 17:00", "2099-01-12 19:00"),
        event("Backwards", "2099-01-11 19:00", "2099-01-11 18:00"),
    ];
    fs::write(&path, serde_json::to_string(&events).expect("serialize")).expect("write");

    let source = EventFile::new(Path::new(&path));
    assert_eq!(source.read_all().expect("read").len(), 2);

    let (from, to) = query_window("2099-01-11", "2099-01-11").expect("window");
    let fetched = source.fetch(from, to).expect("fetch");
    assert_eq!(fetched, vec![events[0].clone()]);
}

#[test]
fn test_query_window_bounds() {
    let (from, to) = query_window("2099-01-10", "2099-01-12").expect("window");
    assert_eq!(from, dt("2099-01-10 00:00"));
    assert_eq!(to, dt("2099-01-13 00:00"));

    assert!(query_window("2099-01-12", "2099-01-10").is_err());
    assert!(query_window("10/01/2099", "2099-01-10").is_err());
}
