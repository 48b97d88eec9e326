use crate::errors::AppResult;
use crate::models::category::Category;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_category(row: &Row) -> Result<Category> {
    Ok(Category {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}

pub fn insert_category(conn: &Connection, name: &str, description: Option<&str>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO categories (name, description) VALUES (?1, ?2)",
        params![name, description],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_category(conn: &Connection, id: i64) -> AppResult<Option<Category>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, name, description FROM categories WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_category).optional()?)
}

pub fn load_categories(conn: &Connection) -> AppResult<Vec<Category>> {
    let mut stmt = conn.prepare_cached("SELECT id, name, description FROM categories ORDER BY id")?;
    let rows = stmt.query_map([], map_category)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Returns the number of updated rows (0 when the id is unknown).
pub fn update_category(conn: &Connection, category: &Category) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE categories SET name = ?1, description = ?2 WHERE id = ?3",
        params![category.name, category.description, category.id],
    )?)
}

pub fn delete_category(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM categories WHERE id = ?1", [id])?)
}
