use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result};

const MIGRATION_ARCHIVED_FLAG: &str = "20250605_0002_add_task_archived_flag";

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create categories / tasks / work_items with the current schema.
fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            description TEXT DEFAULT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            category_id INTEGER NOT NULL,
            is_archived INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (category_id)
                REFERENCES categories(id)
                    ON DELETE CASCADE ON UPDATE NO ACTION
        );

        CREATE TABLE IF NOT EXISTS work_items (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            task_id         INTEGER NOT NULL,
            start_timestamp INTEGER NOT NULL,
            end_timestamp   INTEGER DEFAULT NULL,
            FOREIGN KEY (task_id)
                REFERENCES tasks(id)
                    ON DELETE CASCADE ON UPDATE NO ACTION,
            CHECK (end_timestamp IS NULL OR start_timestamp < end_timestamp)
        );
        "#,
    )?;
    Ok(())
}

fn create_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_tasks_category ON tasks(category_id);
        CREATE INDEX IF NOT EXISTS idx_work_items_task ON work_items(task_id);
        CREATE INDEX IF NOT EXISTS idx_work_items_start ON work_items(start_timestamp);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_work_items_single_open
            ON work_items((end_timestamp IS NULL))
            WHERE end_timestamp IS NULL;
        "#,
    )?;
    Ok(())
}

/// Tasks tables created before archiving existed lack `is_archived`.
fn migrate_add_archived_column(conn: &Connection) -> Result<()> {
    if migration_applied(conn, MIGRATION_ARCHIVED_FLAG)? {
        return Ok(());
    }

    if !column_exists(conn, "tasks", "is_archived")? {
        warning("Adding 'is_archived' column to tasks table...");
        conn.execute(
            "ALTER TABLE tasks ADD COLUMN is_archived INTEGER NOT NULL DEFAULT 0;",
            [],
        )
        .map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to add 'is_archived' column: {}", e)),
            )
        })?;
        success(format!(
            "Migration applied: {} → added 'is_archived' to tasks table",
            MIGRATION_ARCHIVED_FLAG
        ));
    }

    mark_applied(conn, MIGRATION_ARCHIVED_FLAG, "Added is_archived flag to tasks")
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db() and `db --migrate`. Idempotent.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Base schema
    let fresh = !table_exists(conn, "work_items")?;
    create_tables(conn)?;
    if fresh {
        success("Created categories, tasks and work_items tables.");
    }

    // 3) Incremental upgrades of older databases
    migrate_add_archived_column(conn)?;

    // 4) Indexes last, they may reference migrated columns
    create_indexes(conn)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied, 1);
        assert!(column_exists(&conn, "tasks", "is_archived").unwrap());
    }

    #[test]
    fn legacy_tasks_table_gets_archived_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE categories (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL UNIQUE, description TEXT);
             CREATE TABLE tasks (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL UNIQUE, category_id INTEGER NOT NULL);
             INSERT INTO categories (name) VALUES ('Dev');
             INSERT INTO tasks (name, category_id) VALUES ('Old task', 1);",
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();

        let archived: i64 = conn
            .query_row("SELECT is_archived FROM tasks WHERE id = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(archived, 0);
    }

    #[test]
    fn only_one_open_item_is_storable() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO categories (name) VALUES ('Dev');
             INSERT INTO tasks (name, category_id) VALUES ('T', 1);
             INSERT INTO work_items (task_id, start_timestamp) VALUES (1, 100);",
        )
        .unwrap();

        let second = conn.execute(
            "INSERT INTO work_items (task_id, start_timestamp) VALUES (1, 500)",
            [],
        );
        assert!(second.is_err());
    }
}
