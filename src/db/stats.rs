use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::time::format_ts;
use ansi_term::Colour::{Cyan, Fixed, Green, Yellow};
use std::fs;

/// Counts and timestamp span of the stored data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbStats {
    pub categories: i64,
    pub tasks: i64,
    pub work_items: i64,
    pub open_items: i64,
    pub first_start: Option<i64>,
    pub last_activity: Option<i64>,
}

pub fn collect_stats(pool: &DbPool) -> AppResult<DbStats> {
    let count = |table: &str| -> rusqlite::Result<i64> {
        pool.conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
    };

    let (first_start, last_activity, open_items) = pool.conn.query_row(
        "SELECT MIN(start_timestamp),
                MAX(COALESCE(end_timestamp, start_timestamp)),
                COALESCE(SUM(end_timestamp IS NULL), 0)
         FROM work_items",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    Ok(DbStats {
        categories: count("categories")?,
        tasks: count("tasks")?,
        work_items: count("work_items")?,
        open_items,
        first_start,
        last_activity,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    let stats = collect_stats(pool)?;

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);
    let missing = Fixed(244).paint("--").to_string();
    let ts_or_missing = |ts: Option<i64>| ts.map(format_ts).unwrap_or_else(|| missing.clone());

    println!();
    println!("{} {}", Cyan.paint("• File:"), Yellow.paint(db_path));
    println!("{} {:.2} MB", Cyan.paint("• Size:"), file_mb);
    println!("{} {}", Cyan.paint("• Categories:"), Green.paint(stats.categories.to_string()));
    println!("{} {}", Cyan.paint("• Tasks:"), Green.paint(stats.tasks.to_string()));
    println!(
        "{} {} ({} open)",
        Cyan.paint("• Work items:"),
        Green.paint(stats.work_items.to_string()),
        stats.open_items
    );
    println!("{}", Cyan.paint("• Recorded span:"));
    println!("    from: {}", ts_or_missing(stats.first_start));
    println!("    to:   {}", ts_or_missing(stats.last_activity));
    println!();
    Ok(())
}
