use crate::errors::AppResult;
use crate::models::page::Page;
use crate::models::work_item::{WorkItem, WorkItemOrder};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const WORK_ITEM_COLUMNS: &str = "id, task_id, start_timestamp, end_timestamp";

pub fn map_work_item(row: &Row) -> Result<WorkItem> {
    Ok(WorkItem {
        id: row.get("id")?,
        task_id: row.get("task_id")?,
        start_timestamp: row.get("start_timestamp")?,
        end_timestamp: row.get("end_timestamp")?,
    })
}

fn collect(rows: impl Iterator<Item = Result<WorkItem>>) -> AppResult<Vec<WorkItem>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_work_item(
    conn: &Connection,
    task_id: i64,
    start_timestamp: i64,
    end_timestamp: Option<i64>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO work_items (task_id, start_timestamp, end_timestamp) VALUES (?1, ?2, ?3)",
        params![task_id, start_timestamp, end_timestamp],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_work_item(conn: &Connection, id: i64) -> AppResult<Option<WorkItem>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {WORK_ITEM_COLUMNS} FROM work_items WHERE id = ?1"
    ))?;
    Ok(stmt.query_row([id], map_work_item).optional()?)
}

/// The open work item, if any. The schema allows at most one.
pub fn load_open_work_item(conn: &Connection) -> AppResult<Option<WorkItem>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {WORK_ITEM_COLUMNS} FROM work_items WHERE end_timestamp IS NULL
         ORDER BY start_timestamp DESC LIMIT 1"
    ))?;
    Ok(stmt.query_row([], map_work_item).optional()?)
}

/// Work items whose closed range `[start, end or +inf]` intersects the
/// candidate's, skipping `excluded_id`.
///
/// This is only the index-friendly pre-selection; the overlap rule itself
/// lives in `core::validation`.
pub fn load_work_items_touching(
    conn: &Connection,
    start_timestamp: i64,
    end_timestamp: Option<i64>,
    excluded_id: Option<i64>,
) -> AppResult<Vec<WorkItem>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {WORK_ITEM_COLUMNS} FROM work_items
         WHERE (?3 IS NULL OR id <> ?3)
           AND (?2 IS NULL OR start_timestamp <= ?2)
           AND (end_timestamp IS NULL OR end_timestamp >= ?1)
         ORDER BY start_timestamp ASC, id ASC"
    ))?;
    let rows = stmt.query_map(
        params![start_timestamp, end_timestamp, excluded_id],
        map_work_item,
    )?;
    collect(rows)
}

pub fn count_work_items(conn: &Connection) -> AppResult<u64> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM work_items", [], |row| row.get(0))?;
    Ok(n as u64)
}

pub fn load_work_items_page(
    conn: &Connection,
    order: WorkItemOrder,
    page: u32,
    size: u32,
) -> AppResult<Page<WorkItem>> {
    let total = count_work_items(conn)?;

    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {WORK_ITEM_COLUMNS} FROM work_items ORDER BY {} LIMIT ?1 OFFSET ?2",
        order.to_sql()
    ))?;
    let offset = Page::<WorkItem>::offset(page, size) as i64;
    let rows = stmt.query_map(params![size as i64, offset], map_work_item)?;
    let items = collect(rows)?;

    Ok(Page::new(items, page, size, total))
}

pub fn load_work_items_by_task(conn: &Connection, task_id: i64) -> AppResult<Vec<WorkItem>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {WORK_ITEM_COLUMNS} FROM work_items WHERE task_id = ?1
         ORDER BY start_timestamp ASC, id ASC"
    ))?;
    let rows = stmt.query_map([task_id], map_work_item)?;
    collect(rows)
}

/// Update all mutable fields of a work item. Returns the number of rows touched.
pub fn update_work_item(conn: &Connection, item: &WorkItem) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE work_items
         SET task_id = ?1, start_timestamp = ?2, end_timestamp = ?3
         WHERE id = ?4",
        params![
            item.task_id,
            item.start_timestamp,
            item.end_timestamp,
            item.id
        ],
    )?)
}

pub fn delete_work_item(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM work_items WHERE id = ?1", [id])?)
}
