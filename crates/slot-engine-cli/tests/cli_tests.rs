//! Integration tests for the `slots` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise every subcommand
//! through the actual binary, including stdin/stdout piping, file I/O, option
//! overrides, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn slots() -> Command {
    let mut cmd = Command::cargo_bin("slots").unwrap();
    cmd.env_remove("SLOTS_GRANULARITY")
        .env_remove("SLOTS_DURATION")
        .env_remove("RUST_LOG");
    cmd
}

/// Run a subcommand and parse stdout as JSON.
fn run_json(args: &[&str]) -> serde_json::Value {
    let out = slots().args(args).assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("stdout must be JSON")
}

fn as_strings(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .expect("array")
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// compute
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn compute_from_file() {
    let day = fixture("day.json");
    let value = run_json(&["compute", "-i", &day]);
    let slots = as_strings(&value);

    assert_eq!(slots.len(), 13);
    assert_eq!(slots[0], "09:00");
    assert_eq!(slots.last().unwrap(), "16:30");
    assert!(!slots.contains(&"09:30".to_string()));
    assert!(!slots.contains(&"12:00".to_string()));
}

#[test]
fn compute_from_stdin() {
    let input = std::fs::read_to_string(fixture("day.json")).unwrap();

    slots()
        .arg("compute")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"10:00\""));
}

#[test]
fn duration_flag_overrides_request() {
    let day = fixture("day.json");
    let slots = as_strings(&run_json(&["compute", "-i", &day, "--duration", "60"]));

    assert_eq!(slots.len(), 10);
    assert_eq!(slots[0], "10:00");
    assert!(!slots.contains(&"11:30".to_string()), "would run into the break");
    assert_eq!(slots.last().unwrap(), "16:00");
}

#[test]
fn config_file_replaces_request_options() {
    let day = fixture("day.json");
    let config = fixture("options.json");
    let slots = as_strings(&run_json(&["compute", "-i", &day, "--config", &config]));

    assert_eq!(slots, vec!["10:00", "11:00", "13:00", "14:00", "15:00", "16:00"]);
}

#[test]
fn granularity_from_environment() {
    let day = fixture("day.json");
    let out = slots()
        .env("SLOTS_GRANULARITY", "60")
        .args(["compute", "-i", &day])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(
        as_strings(&value),
        vec!["09:00", "10:00", "11:00", "13:00", "14:00", "15:00", "16:00"]
    );
}

#[test]
fn zero_granularity_fails() {
    slots()
        .args(["compute", "-i", &fixture("day.json"), "--granularity", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid slot granularity"));
}

#[test]
fn compute_in_timezone_prints_utc_instants() {
    let day = fixture("day.json");
    let value = run_json(&[
        "compute",
        "-i",
        &day,
        "--date",
        "2026-03-16",
        "--timezone",
        "America/New_York",
    ]);

    let first = &value[0];
    assert_eq!(first["local_start"], "09:00");
    assert_eq!(first["start"], "2026-03-16T13:00:00Z");
    assert_eq!(first["end"], "2026-03-16T13:30:00Z");
}

#[test]
fn date_on_another_weekday_than_the_template_fails() {
    // day.json holds Monday hours; 2026-03-15 is a Sunday.
    slots()
        .args([
            "compute",
            "-i",
            &fixture("day.json"),
            "--date",
            "2026-03-15",
            "--timezone",
            "America/New_York",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Date 2026-03-15 is a Sun (weekday 0), but the working hours are for weekday 1",
        ));
}

#[test]
fn date_without_timezone_is_a_usage_error() {
    slots()
        .args(["compute", "-i", &fixture("day.json"), "--date", "2026-03-16"])
        .assert()
        .failure();
}

#[test]
fn unknown_timezone_fails() {
    slots()
        .args([
            "compute",
            "-i",
            &fixture("day.json"),
            "--date",
            "2026-03-16",
            "--timezone",
            "Nowhere/City",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

#[test]
fn malformed_time_fails_with_format_error() {
    slots()
        .args(["compute", "-i", &fixture("malformed.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time format"));
}

#[test]
fn missing_input_file_fails() {
    slots()
        .args(["compute", "-i", "/nonexistent/day.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn compute_writes_output_file() {
    let output_path = std::env::temp_dir().join("slots-test-compute-output.json");
    let _ = std::fs::remove_file(&output_path);

    slots()
        .args(["compute", "-i", &fixture("day.json"), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 13);

    let _ = std::fs::remove_file(&output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// week
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn week_lists_working_days() {
    let value = run_json(&["week", "-i", &fixture("range.json")]);
    let days = value.as_array().unwrap();

    assert_eq!(days.len(), 3);
    assert_eq!(days[0]["date"], "2026-03-16");
    assert!(days[0]["slots"].as_array().unwrap().is_empty(), "Monday is fully booked");
    assert_eq!(days[1]["date"], "2026-03-18");
    assert_eq!(as_strings(&days[1]["slots"]), vec!["13:00", "13:30", "14:00", "14:30"]);
    assert!(days[2]["slots"].as_array().unwrap().is_empty(), "Friday is off");
}

#[test]
fn week_first_available() {
    let value = run_json(&["week", "-i", &fixture("range.json"), "--first"]);

    assert_eq!(value["date"], "2026-03-18");
    assert_eq!(value["start_time"], "13:00");
}

#[test]
fn week_first_available_respects_not_before() {
    let value = run_json(&[
        "week",
        "-i",
        &fixture("range.json"),
        "--first",
        "--not-before",
        "2026-03-18T13:45:00",
    ]);

    assert_eq!(value["start_time"], "14:00");
}

#[test]
fn week_first_available_none_prints_null() {
    let value = run_json(&[
        "week",
        "-i",
        &fixture("range.json"),
        "--first",
        "--not-before",
        "2026-03-19T00:00:00",
    ]);

    assert!(value.is_null());
}

// ─────────────────────────────────────────────────────────────────────────────
// free / conflicts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn free_windows_around_booking_and_break() {
    let value = run_json(&["free", "-i", &fixture("day.json")]);
    let windows = value.as_array().unwrap();

    // 09:00-09:30, 10:00-12:00, 13:00-17:00
    assert_eq!(windows.len(), 3);
    assert_eq!(windows[0]["duration_minutes"], 30);
    assert_eq!(windows[1]["start"], "10:00");
    assert_eq!(windows[1]["duration_minutes"], 120);
    assert_eq!(windows[2]["duration_minutes"], 240);
}

#[test]
fn conflicts_reports_double_booking() {
    let value = run_json(&["conflicts", "-i", &fixture("bookings.json")]);
    let conflicts = value.as_array().unwrap();

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["booking_a"]["start_time"], "09:00");
    assert_eq!(conflicts[0]["booking_b"]["start_time"], "09:30");
    assert_eq!(conflicts[0]["overlap_minutes"], 30);
}

#[test]
fn conflicts_on_clean_day_is_empty_array() {
    slots()
        .arg("conflicts")
        .write_stdin(r#"[{"start_time":"09:00","duration_minutes":30},{"start_time":"09:30","duration_minutes":30}]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn no_subcommand_shows_usage() {
    slots()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
