use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_cli_db, setup_test_db, temp_out, ts};

/// Category 1 "Dev" with task 1 "Code"
fn with_task(name: &str) -> String {
    let db_path = init_cli_db(name);
    ts().args(["--db", &db_path, "category", "add", "Dev", "-d", "Coding"])
        .assert()
        .success()
        .stdout(contains("Category #1 'Dev' created"));
    ts().args(["--db", &db_path, "task", "add", "Code", "--category", "1"])
        .assert()
        .success()
        .stdout(contains("Task #1 'Code' created"));
    db_path
}

fn add_work(db_path: &str, start: &str, end: &str) {
    ts().args(["--db", db_path, "work", "add", "1", "--start", start, "--end", end])
        .assert()
        .success()
        .stdout(contains("Recorded"));
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    ts().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_category_and_task_listing() {
    let db_path = with_task("cli_listing");

    ts().args(["--db", &db_path, "category", "list"])
        .assert()
        .success()
        .stdout(contains("Dev").and(contains("Coding")));

    ts().args(["--db", &db_path, "task", "edit", "1", "--archive"])
        .assert()
        .success()
        .stdout(contains("archived"));

    ts().args(["--db", &db_path, "task", "list", "--active"])
        .assert()
        .success()
        .stdout(contains("No tasks found"));

    ts().args(["--db", &db_path, "task", "list", "--archived"])
        .assert()
        .success()
        .stdout(contains("Code"));
}

#[test]
fn test_report_total_as_json() {
    let db_path = with_task("cli_report_json");
    add_work(&db_path, "2023-03-15T09:00:00+00:00", "2023-03-15T11:00:00+00:00");
    add_work(&db_path, "2023-03-16T09:00:00+00:00", "2023-03-16T09:30:00+00:00");

    let output = ts()
        .args([
            "--db",
            &db_path,
            "report",
            "total",
            "--start",
            "2023-03-15T10:00:00+00:00",
            "--end",
            "2023-03-17T00:00:00+00:00",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json, serde_json::json!({ "time": 5400.0 }));
}

#[test]
fn test_report_by_task_to_csv_file() {
    let db_path = with_task("cli_report_csv");
    let out = temp_out("cli_report_csv", "csv");
    add_work(&db_path, "2023-03-15T09:00:00+00:00", "2023-03-15T11:00:00+00:00");

    ts().args([
        "--db",
        &db_path,
        "report",
        "task",
        "--start",
        "2023-03-15T00:00:00+00:00",
        "--end",
        "2023-03-16T00:00:00+00:00",
        "--format",
        "csv",
        "--file",
        &out,
    ])
    .assert()
    .success()
    .stdout(contains("Report written"));

    let content = fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("task_id,task_name,category_id,category_name,time")
    );
    assert_eq!(lines.next(), Some("1,Code,1,Dev,7200.0"));
}

#[test]
fn test_report_table_shows_readable_time() {
    let db_path = with_task("cli_report_table");
    add_work(&db_path, "2023-03-15T09:00:00+00:00", "2023-03-15T13:00:00+00:00");

    ts().args([
        "--db",
        &db_path,
        "report",
        "category",
        "--start",
        "2023-03-14",
        "--end",
        "2023-03-17",
    ])
    .assert()
    .success()
    .stdout(contains("Dev").and(contains("04h 00m")).and(contains("0.50")));
}

#[test]
fn test_report_bounds_must_come_together() {
    let db_path = init_cli_db("cli_report_bounds");

    ts().args(["--db", &db_path, "report", "total", "--start", "2023-03-15"])
        .assert()
        .failure();
}

#[test]
fn test_work_start_twice_fails() {
    let db_path = with_task("cli_start_twice");

    ts().args(["--db", &db_path, "work", "start", "1"])
        .assert()
        .success()
        .stdout(contains("Started"));

    ts().args(["--db", &db_path, "work", "start", "1"])
        .assert()
        .failure()
        .stderr(contains("already started"));

    ts().args(["--db", &db_path, "work", "current"])
        .assert()
        .success()
        .stdout(contains("running since"));
}

#[test]
fn test_overlapping_work_is_refused() {
    let db_path = with_task("cli_overlap");
    add_work(&db_path, "2023-03-15T09:00:00+00:00", "2023-03-15T11:00:00+00:00");

    ts().args([
        "--db",
        &db_path,
        "work",
        "add",
        "1",
        "--start",
        "2023-03-15T10:00:00+00:00",
        "--end",
        "2023-03-15T12:00:00+00:00",
    ])
    .assert()
    .failure()
    .stderr(contains("overlaps existing work item #1"));

    ts().args(["--db", &db_path, "work", "list"])
        .assert()
        .success()
        .stdout(contains("1 total"));
}

#[test]
fn test_stop_without_running_work_fails() {
    let db_path = with_task("cli_stop_idle");

    ts().args(["--db", &db_path, "work", "stop"])
        .assert()
        .failure()
        .stderr(contains("no work item to stop"));
}

#[test]
fn test_log_lists_mutations() {
    let db_path = with_task("cli_log");

    ts().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init").and(contains("category #1")).and(contains("task #1")));
}

#[test]
fn test_unknown_work_item_is_not_found() {
    let db_path = init_cli_db("cli_not_found");

    ts().args(["--db", &db_path, "work", "show", "99"])
        .assert()
        .failure()
        .stderr(contains("Work item #99 not found"));
}
