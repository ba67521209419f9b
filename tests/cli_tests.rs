mod common;
use common::{missing_config, sp, temp_path, write_catalog};
use predicates::prelude::*;
use std::fs;

const EVENTS_JSON: &str = r#"[
  { "title": "DH: Game 1", "start": "2099-01-10T18:00:00", "end": "2099-01-10T20:00:00" },
  { "title": "Juniors Practice - Petals", "start": "2099-01-11T17:00:00", "end": "2099-01-11T19:00:00" },
  { "title": "Team Social", "start": "2099-01-12T19:00:00", "end": "2099-01-12T22:00:00" },
  { "title": "Broken entry", "start": "2099-01-13T19:00:00", "end": "2099-01-13T18:00:00" }
]"#;

fn write_events(name: &str) -> String {
    let path = temp_path(name, "json");
    fs::write(&path, EVENTS_JSON).expect("write events");
    path
}

/// Run `collect` from the events fixture and return the review CSV path.
fn collect_review_file(name: &str) -> String {
    let cfg = missing_config(name);
    let catalog = write_catalog(name);
    let events = write_events(name);
    let out = temp_path(name, "csv");

    sp().args([
        "--config", &cfg, "--catalog", &catalog, "collect", "--events", &events, "--file", &out,
        "--force",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Events read      : 3"))
    .stdout(predicate::str::contains("Without need id  : 1"));

    out
}

#[test]
fn test_collect_writes_review_csv() {
    let out = collect_review_file("cli_collect");
    let content = fs::read_to_string(&out).expect("read csv");
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(
        lines[0],
        "need_name,need_id,start_date,start_time,duration,slots"
    );
    assert_eq!(lines[1], "DH: Game 1,1001,2099-01-10,18:15,135,12");
    assert_eq!(lines[2], "DH: Game 1,1002,2099-01-10,18:00,60,2");
    assert_eq!(lines[3], "Juniors Practice - Petals,2001,2099-01-11,16:45,135,2");
    assert_eq!(lines[4], "Team Social,,2099-01-12,19:00,180,1");
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_collect_respects_date_window() {
    let name = "cli_collect_window";
    let cfg = missing_config(name);
    let catalog = write_catalog(name);
    let events = write_events(name);
    let out = temp_path(&format!("{}_out", name), "json");

    sp().args([
        "--config", &cfg, "--catalog", &catalog, "collect", "--events", &events, "--from",
        "2099-01-11", "--to", "2099-01-11", "--format", "json", "--file", &out, "--force",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Events read      : 1"));

    let content = fs::read_to_string(&out).expect("read json");
    assert!(content.contains("\"need_id\": \"2001\""));
    assert!(!content.contains("1001"));
}

#[test]
fn test_collect_without_window_or_events_is_refused() {
    let name = "cli_collect_args";
    let cfg = missing_config(name);
    let out = temp_path(name, "csv");

    sp().args(["--config", &cfg, "collect", "--file", &out])
        .assert()
        .failure();
}

#[test]
fn test_submit_check_prints_requests_without_token() {
    let review = collect_review_file("cli_submit_check");
    let cfg = missing_config("cli_submit_check");

    sp().args(["--config", &cfg, "submit", "--file", &review, "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://api.galaxydigital.com/api/needs/1001/shifts",
        ))
        .stdout(predicate::str::contains("not sent"))
        .stdout(predicate::str::contains("\"start\": \"2099-01-10 18:15\""))
        .stdout(predicate::str::contains("Groups           : 3"))
        .stdout(predicate::str::contains("Rows unmapped    : 1"));
}

#[test]
fn test_submit_check_writes_payload_file() {
    let review = collect_review_file("cli_submit_payload");
    let cfg = missing_config("cli_submit_payload");
    let payload = temp_path("cli_submit_payload_body", "json");

    sp().args([
        "--config", &cfg, "submit", "--file", &review, "--check", "--payload", &payload,
        "--force",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&payload).expect("read payload");
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let shifts = value["1001"]["shifts"].as_array().expect("shifts array");
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0]["duration"], "135");
    assert_eq!(value["2001"]["shifts"][0]["start"], "2099-01-11 16:45");
    assert!(content.find("\"1001\"") < content.find("\"2001\""));
}

#[test]
fn test_submit_reports_rejected_rows() {
    let name = "cli_submit_invalid";
    let cfg = missing_config(name);
    let review = temp_path(name, "csv");
    fs::write(
        &review,
        "need_name,need_id,start_date,start_time,duration,slots\n\
         DH: Game 1,1001,2099-01-10,18:15,135,0\n\
         DH: Game 1,1002,2099-01-10,18:00,60,2\n\
         DH: Game 1,1002,2099-01-10,18:00,60,2\n",
    )
    .expect("write csv");

    sp().args(["--config", &cfg, "submit", "--file", &review, "--check", "--dedupe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 duplicate row(s)"))
        .stdout(predicate::str::contains("line 2 (DH: Game 1) rejected: slots"))
        .stdout(predicate::str::contains("Groups           : 1"));
}

#[test]
fn test_live_submit_requires_token() {
    let review = collect_review_file("cli_submit_token");
    let cfg = missing_config("cli_submit_token");

    sp().args(["--config", &cfg, "submit", "--file", &review])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AMPLIFY_TOKEN"));
}

#[test]
fn test_catalog_match_shows_needs() {
    let name = "cli_catalog_match";
    let cfg = missing_config(name);
    let catalog = write_catalog(name);

    sp().args(["--config", &cfg, "--catalog", &catalog, "catalog", "--match", "DH: Game 1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'dh: game 1' (score 100)"))
        .stdout(predicate::str::contains("need_id=1001"));

    sp().args(["--config", &cfg, "--catalog", &catalog, "catalog", "--match", "Team Social"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default template"));
}

#[test]
fn test_catalog_list_in_declaration_order() {
    let name = "cli_catalog_list";
    let cfg = missing_config(name);
    let catalog = write_catalog(name);

    let output = sp()
        .args(["--config", &cfg, "--catalog", &catalog, "catalog", "--list"])
        .output()
        .expect("run starpass");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let game = stdout.find("dh: game 1").expect("game listed");
    let petals = stdout.find("petals").expect("petals listed");
    let default = stdout.find("default").expect("default listed");
    assert!(game < petals && petals < default);
}

#[test]
fn test_invalid_catalog_is_reported() {
    let name = "cli_catalog_invalid";
    let cfg = missing_config(name);
    let catalog = temp_path(name, "yaml");
    fs::write(
        &catalog,
        "calendars:\n  practice:\n    templates:\n      petals:\n        description: P\n        initiative: J\n        type: practice\n        need_ids: []\n",
    )
    .expect("write catalog");

    sp().args(["--config", &cfg, "--catalog", &catalog, "catalog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no 'default' template"));
}

#[test]
fn test_init_creates_config_and_catalog() {
    let name = "cli_init";
    let cfg = missing_config(name);
    let catalog = temp_path(name, "yaml");

    sp().args(["--config", &cfg, "--catalog", &catalog, "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initialization completed"));

    let written = fs::read_to_string(&cfg).expect("config written");
    assert!(written.contains("match_threshold: 80"));
    assert!(fs::read_to_string(&catalog).expect("catalog written").contains("default"));

    sp().args(["--config", &cfg, "--catalog", &catalog, "catalog"])
        .assert()
        .success();
}

#[test]
fn test_config_print_hides_secrets() {
    let cfg = missing_config("cli_config_print");

    sp().args(["--config", &cfg, "config", "--print"])
        .env("AMPLIFY_TOKEN", "secret-value")
        .assert()
        .success()
        .stdout(predicate::str::contains("api_base_url"))
        .stdout(predicate::str::contains("AMPLIFY_TOKEN: set"))
        .stdout(predicate::str::contains("secret-value").not());
}

#[test]
fn test_declined_payload_overwrite_stops_before_sending() {
    let review = collect_review_file("cli_submit_declined");
    let cfg = missing_config("cli_submit_declined");
    let payload = temp_path("cli_submit_declined_body", "json");
    fs::write(&payload, "{}").expect("existing payload");

    sp().args(["--config", &cfg, "submit", "--file", &review, "--payload", &payload])
        .env("AMPLIFY_TOKEN", "test-token")
        .env("BASE_AMPLIFY_URL", "http://127.0.0.1:9/api")
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("left untouched"))
        .stdout(predicate::str::contains("Submission report").not());

    assert_eq!(fs::read_to_string(&payload).expect("read payload"), "{}");
}
