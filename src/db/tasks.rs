use crate::errors::AppResult;
use crate::models::task::Task;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Task columns joined with the category name and the derived current flag.
/// `LEFT JOIN` on the open work item: at most one exists, so no duplicates.
const TASK_SELECT: &str = "
    SELECT t.id, t.name, t.category_id, c.name AS category_name, t.is_archived,
           CASE WHEN w.id IS NULL THEN 0 ELSE 1 END AS is_current
    FROM tasks AS t
    JOIN categories AS c ON (t.category_id = c.id)
    LEFT JOIN work_items AS w ON (t.id = w.task_id AND w.end_timestamp IS NULL)";

pub fn map_task(row: &Row) -> Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        name: row.get("name")?,
        category_id: row.get("category_id")?,
        category_name: row.get("category_name")?,
        is_archived: row.get::<_, i64>("is_archived")? == 1,
        is_current: row.get::<_, i64>("is_current")? == 1,
    })
}

pub fn insert_task(conn: &Connection, name: &str, category_id: i64) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO tasks (name, category_id, is_archived) VALUES (?1, ?2, 0)",
        params![name, category_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_task(conn: &Connection, id: i64) -> AppResult<Option<Task>> {
    let mut stmt = conn.prepare_cached(&format!("{TASK_SELECT} WHERE t.id = ?1"))?;
    Ok(stmt.query_row([id], map_task).optional()?)
}

pub fn task_exists(conn: &Connection, id: i64) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM tasks WHERE id = ?1")?;
    Ok(stmt.exists([id])?)
}

/// List tasks ordered by id, optionally filtered on the archived flag.
pub fn load_tasks(conn: &Connection, is_archived: Option<bool>) -> AppResult<Vec<Task>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{TASK_SELECT} WHERE (?1 IS NULL OR t.is_archived = ?1) ORDER BY t.id"
    ))?;
    let rows = stmt.query_map([is_archived.map(i64::from)], map_task)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_task(conn: &Connection, task: &Task) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE tasks SET name = ?1, category_id = ?2, is_archived = ?3 WHERE id = ?4",
        params![task.name, task.category_id, task.is_archived as i64, task.id],
    )?)
}

pub fn delete_task(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?)
}
