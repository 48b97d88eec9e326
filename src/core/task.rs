use crate::db::categories::load_category;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::tasks::{delete_task, insert_task, load_task, load_tasks, update_task};
use crate::errors::{AppError, AppResult};
use crate::models::task::{Task, TaskPatch};
use rusqlite::Connection;

const ENTITY: &str = "Task";

pub struct TaskLogic;

fn ensure_category(conn: &Connection, category_id: i64) -> AppResult<()> {
    match load_category(conn, category_id)? {
        Some(_) => Ok(()),
        None => Err(AppError::not_found("Category", category_id)),
    }
}

fn fetch(conn: &Connection, id: i64) -> AppResult<Task> {
    load_task(conn, id)?.ok_or_else(|| AppError::not_found(ENTITY, id))
}

impl TaskLogic {
    /// New tasks are never archived.
    pub fn create(pool: &mut DbPool, name: &str, category_id: i64) -> AppResult<Task> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("task name must not be empty".into()));
        }

        let tx = pool.write_tx()?;
        ensure_category(&tx, category_id)?;

        let id = insert_task(&tx, name, category_id)?;
        ttlog(
            &tx,
            "add",
            &format!("task #{id}"),
            &format!("Added task '{name}' to category #{category_id}"),
        )?;
        let task = fetch(&tx, id)?;
        tx.commit()?;
        Ok(task)
    }

    pub fn read(pool: &DbPool, id: i64) -> AppResult<Task> {
        fetch(&pool.conn, id)
    }

    pub fn list(pool: &DbPool, is_archived: Option<bool>) -> AppResult<Vec<Task>> {
        load_tasks(&pool.conn, is_archived)
    }

    pub fn update(pool: &mut DbPool, id: i64, patch: &TaskPatch) -> AppResult<Task> {
        let tx = pool.write_tx()?;

        let mut task = fetch(&tx, id)?;
        if let Some(name) = &patch.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::InvalidInput("task name must not be empty".into()));
            }
            task.name = name.to_string();
        }
        if let Some(category_id) = patch.category_id {
            ensure_category(&tx, category_id)?;
            task.category_id = category_id;
        }
        if let Some(archived) = patch.is_archived {
            task.is_archived = archived;
        }

        update_task(&tx, &task)?;
        ttlog(
            &tx,
            "edit",
            &format!("task #{id}"),
            &format!(
                "name='{}', category=#{}, archived={}",
                task.name, task.category_id, task.is_archived
            ),
        )?;
        // reload for the joined category name
        let task = fetch(&tx, id)?;
        tx.commit()?;
        Ok(task)
    }

    /// Deleting a task cascades to its work items.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let tx = pool.write_tx()?;

        if delete_task(&tx, id)? == 0 {
            return Err(AppError::not_found(ENTITY, id));
        }
        ttlog(&tx, "del", &format!("task #{id}"), "Deleted task")?;
        tx.commit()?;
        Ok(())
    }
}
