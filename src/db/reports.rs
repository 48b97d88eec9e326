//! Aggregation queries: clip every participating work item to the window
//! and sum in SQL (filter-then-aggregate, never a full scan in Rust).
//!
//! Bound parameters, shared by all three queries:
//! `?1` window start, `?2` window end (exclusive), `?3` now,
//! `?4` category filter (NULL = all), `?5` task filter (NULL = all).

use crate::core::aggregation::ClipWindow;
use crate::errors::AppResult;
use crate::models::report::{CategoryTime, ReportFilter, TaskTime, TotalTime};
use rusqlite::{Connection, params};

/// Participating work items with their clipped bounds.
///
/// Keep the predicate in sync with `ClipWindow::participates`.
const CLIPPED_ITEMS: &str = "
    SELECT wi.task_id, t.category_id,
           MAX(wi.start_timestamp, ?1) AS start_ts,
           MIN(COALESCE(wi.end_timestamp, ?3), ?2) AS end_ts
    FROM work_items AS wi
    INNER JOIN tasks AS t ON (wi.task_id = t.id)
    WHERE (
        (wi.start_timestamp >= ?1 AND wi.start_timestamp < ?2)
        OR (COALESCE(wi.end_timestamp, ?3) > ?1 AND COALESCE(wi.end_timestamp, ?3) <= ?2)
        OR (wi.start_timestamp < ?1 AND COALESCE(wi.end_timestamp, ?3) > ?2)
    )
    AND MIN(COALESCE(wi.end_timestamp, ?3), ?2) > MAX(wi.start_timestamp, ?1)
    AND (?4 IS NULL OR t.category_id = ?4)
    AND (?5 IS NULL OR wi.task_id = ?5)";

pub fn report_by_category(
    conn: &Connection,
    window: &ClipWindow,
    filter: &ReportFilter,
) -> AppResult<Vec<CategoryTime>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT ww.category_id, c.name AS category_name,
                COALESCE(SUM(ww.end_ts - ww.start_ts), 0) AS work_seconds
         FROM ({CLIPPED_ITEMS}) AS ww
         INNER JOIN categories AS c ON (ww.category_id = c.id)
         GROUP BY ww.category_id, c.name
         ORDER BY ww.category_id ASC"
    ))?;

    let rows = stmt.query_map(
        params![
            window.start_ts,
            window.end_ts,
            window.now_ts,
            filter.category_id,
            filter.task_id
        ],
        |row| {
            Ok(CategoryTime {
                category_id: row.get(0)?,
                category_name: row.get(1)?,
                seconds: row.get(2)?,
            })
        },
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn report_by_task(
    conn: &Connection,
    window: &ClipWindow,
    filter: &ReportFilter,
) -> AppResult<Vec<TaskTime>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT ww.task_id, t.name AS task_name, t.category_id, c.name AS category_name,
                COALESCE(SUM(ww.end_ts - ww.start_ts), 0) AS work_seconds
         FROM ({CLIPPED_ITEMS}) AS ww
         INNER JOIN tasks AS t ON (ww.task_id = t.id)
         INNER JOIN categories AS c ON (t.category_id = c.id)
         GROUP BY ww.task_id, t.name, t.category_id, c.name
         ORDER BY ww.task_id ASC"
    ))?;

    let rows = stmt.query_map(
        params![
            window.start_ts,
            window.end_ts,
            window.now_ts,
            filter.category_id,
            filter.task_id
        ],
        |row| {
            Ok(TaskTime {
                task_id: row.get(0)?,
                task_name: row.get(1)?,
                category_id: row.get(2)?,
                category_name: row.get(3)?,
                seconds: row.get(4)?,
            })
        },
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn report_total(
    conn: &Connection,
    window: &ClipWindow,
    filter: &ReportFilter,
) -> AppResult<TotalTime> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT COALESCE(SUM(ww.end_ts - ww.start_ts), 0) AS work_seconds
         FROM ({CLIPPED_ITEMS}) AS ww"
    ))?;

    let seconds: i64 = stmt.query_row(
        params![
            window.start_ts,
            window.end_ts,
            window.now_ts,
            filter.category_id,
            filter.task_id
        ],
        |row| row.get(0),
    )?;

    Ok(TotalTime { seconds })
}
