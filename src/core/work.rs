use crate::core::clock::Clock;
use crate::core::validation::RangeCandidate;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::tasks::task_exists;
use crate::db::work_items::{
    delete_work_item, insert_work_item, load_open_work_item, load_work_item,
    load_work_items_by_task, load_work_items_page, update_work_item,
};
use crate::errors::{AppError, AppResult};
use crate::models::page::Page;
use crate::models::work_item::{WorkItem, WorkItemOrder, WorkItemPatch};
use crate::utils::time::format_ts;
use rusqlite::Connection;

const ENTITY: &str = "Work item";

/// High-level business logic for work items.
///
/// Every mutation runs in one immediate transaction: the open-item and
/// overlap checks see exactly the state the write is applied to.
pub struct WorkLogic;

fn ensure_task(conn: &Connection, task_id: i64) -> AppResult<()> {
    if task_exists(conn, task_id)? {
        Ok(())
    } else {
        Err(AppError::not_found("Task", task_id))
    }
}

fn fetch(conn: &Connection, id: i64) -> AppResult<WorkItem> {
    load_work_item(conn, id)?.ok_or_else(|| AppError::not_found(ENTITY, id))
}

fn target(id: i64) -> String {
    format!("work_item #{id}")
}

impl WorkLogic {
    /// Open a new work item for `task_id`, starting at `start` or now.
    pub fn start_work(
        pool: &mut DbPool,
        clock: &dyn Clock,
        task_id: i64,
        start: Option<i64>,
    ) -> AppResult<WorkItem> {
        let tx = pool.write_tx()?;

        if load_open_work_item(&tx)?.is_some() {
            return Err(AppError::AlreadyStarted);
        }
        ensure_task(&tx, task_id)?;

        let start = start.unwrap_or_else(|| clock.now_ts());
        RangeCandidate::for_create(start, None).validate(&tx)?;

        let id = insert_work_item(&tx, task_id, start, None)?;
        ttlog(
            &tx,
            "start",
            &target(id),
            &format!("Started task #{} at {}", task_id, format_ts(start)),
        )?;
        let item = fetch(&tx, id)?;
        tx.commit()?;
        Ok(item)
    }

    /// Close the open work item at the current time.
    pub fn stop_current(pool: &mut DbPool, clock: &dyn Clock) -> AppResult<WorkItem> {
        let tx = pool.write_tx()?;

        let mut item = load_open_work_item(&tx)?.ok_or(AppError::NoCurrentWork)?;
        let end = clock.now_ts();
        RangeCandidate::for_update(item.id, item.start_timestamp, Some(end)).check_order()?;

        item.end_timestamp = Some(end);
        update_work_item(&tx, &item)?;
        ttlog(
            &tx,
            "stop",
            &target(item.id),
            &format!("Stopped task #{} at {}", item.task_id, format_ts(end)),
        )?;
        tx.commit()?;
        Ok(item)
    }

    /// Record a work item with explicit bounds.
    pub fn create(
        pool: &mut DbPool,
        task_id: i64,
        start: i64,
        end: Option<i64>,
    ) -> AppResult<WorkItem> {
        let tx = pool.write_tx()?;

        ensure_task(&tx, task_id)?;
        RangeCandidate::for_create(start, end).validate(&tx)?;

        let id = insert_work_item(&tx, task_id, start, end)?;
        ttlog(
            &tx,
            "add",
            &target(id),
            &format!(
                "Added task #{} from {} to {}",
                task_id,
                format_ts(start),
                end.map(format_ts).unwrap_or_else(|| "now".into())
            ),
        )?;
        let item = fetch(&tx, id)?;
        tx.commit()?;
        Ok(item)
    }

    /// Change any subset of task, start and end.
    pub fn update(pool: &mut DbPool, id: i64, patch: &WorkItemPatch) -> AppResult<WorkItem> {
        let tx = pool.write_tx()?;

        let stored = fetch(&tx, id)?;
        if patch.is_empty() {
            return Ok(stored);
        }
        if let Some(task_id) = patch.task_id {
            ensure_task(&tx, task_id)?;
        }

        let merged = patch.apply_to(&stored);
        if patch.start_timestamp.is_some() || patch.end_timestamp.is_some() {
            RangeCandidate::for_update(id, merged.start_timestamp, merged.end_timestamp)
                .validate(&tx)?;
        }

        update_work_item(&tx, &merged)?;
        ttlog(
            &tx,
            "edit",
            &target(id),
            &format!(
                "task #{} -> #{}, start {} -> {}, end {:?} -> {:?}",
                stored.task_id,
                merged.task_id,
                stored.start_timestamp,
                merged.start_timestamp,
                stored.end_timestamp,
                merged.end_timestamp
            ),
        )?;
        tx.commit()?;
        Ok(merged)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let tx = pool.write_tx()?;

        if delete_work_item(&tx, id)? == 0 {
            return Err(AppError::not_found(ENTITY, id));
        }
        ttlog(&tx, "del", &target(id), "Deleted work item")?;
        tx.commit()?;
        Ok(())
    }

    pub fn read(pool: &DbPool, id: i64) -> AppResult<WorkItem> {
        fetch(&pool.conn, id)
    }

    /// All work recorded on one task, oldest first.
    pub fn for_task(pool: &DbPool, task_id: i64) -> AppResult<Vec<WorkItem>> {
        ensure_task(&pool.conn, task_id)?;
        load_work_items_by_task(&pool.conn, task_id)
    }

    pub fn current(pool: &DbPool) -> AppResult<Option<WorkItem>> {
        load_open_work_item(&pool.conn)
    }

    pub fn list(
        pool: &DbPool,
        order: WorkItemOrder,
        page: u32,
        size: u32,
    ) -> AppResult<Page<WorkItem>> {
        if page == 0 || size == 0 {
            return Err(AppError::InvalidInput(
                "page and size must be greater than zero".into(),
            ));
        }
        load_work_items_page(&pool.conn, order, page, size)
    }
}
