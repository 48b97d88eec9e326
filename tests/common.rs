#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Local, NaiveDate, TimeZone};
use std::env;
use std::fs;
use std::path::PathBuf;
use timesheet::core::category::CategoryLogic;
use timesheet::core::task::TaskLogic;
use timesheet::db::initialize::init_db;
use timesheet::db::pool::DbPool;

pub const H: i64 = 3600;

pub fn ts() -> Command {
    cargo_bin_cmd!("timesheet")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timesheet.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a DB file through the CLI in test mode (no config file written)
pub fn init_cli_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    ts().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    db_path
}

/// Fresh in-memory database with the current schema
pub fn memory_pool() -> DbPool {
    let pool = DbPool::open_in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// One category with one task; returns (category_id, task_id)
pub fn seed_task(pool: &mut DbPool, category: &str, task: &str) -> (i64, i64) {
    let c = CategoryLogic::create(pool, category, None).expect("create category");
    let t = TaskLogic::create(pool, task, c.id).expect("create task");
    (c.id, t.id)
}

/// Timestamp of a local wall-clock time
pub fn local_ts(y: i32, m: u32, d: u32, h: u32, mi: u32) -> i64 {
    let naive = NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|d| d.and_hms_opt(h, mi, 0))
        .expect("valid local datetime");
    Local
        .from_local_datetime(&naive)
        .earliest()
        .expect("unambiguous local datetime")
        .timestamp()
}
