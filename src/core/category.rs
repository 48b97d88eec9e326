use crate::db::categories::{
    delete_category, insert_category, load_categories, load_category, update_category,
};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::category::Category;

const ENTITY: &str = "Category";

pub struct CategoryLogic;

fn non_empty(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("category name must not be empty".into()));
    }
    Ok(name)
}

impl CategoryLogic {
    pub fn create(pool: &mut DbPool, name: &str, description: Option<&str>) -> AppResult<Category> {
        let name = non_empty(name)?;
        let tx = pool.write_tx()?;

        let id = insert_category(&tx, name, description)?;
        ttlog(&tx, "add", &format!("category #{id}"), &format!("Added category '{name}'"))?;
        let category = load_category(&tx, id)?.ok_or_else(|| AppError::not_found(ENTITY, id))?;
        tx.commit()?;
        Ok(category)
    }

    pub fn read(pool: &DbPool, id: i64) -> AppResult<Category> {
        load_category(&pool.conn, id)?.ok_or_else(|| AppError::not_found(ENTITY, id))
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Category>> {
        load_categories(&pool.conn)
    }

    /// `description: Some(None)` clears the description.
    pub fn update(
        pool: &mut DbPool,
        id: i64,
        name: Option<&str>,
        description: Option<Option<&str>>,
    ) -> AppResult<Category> {
        let tx = pool.write_tx()?;

        let mut category =
            load_category(&tx, id)?.ok_or_else(|| AppError::not_found(ENTITY, id))?;
        if let Some(name) = name {
            category.name = non_empty(name)?.to_string();
        }
        if let Some(description) = description {
            category.description = description.map(str::to_string);
        }

        update_category(&tx, &category)?;
        ttlog(
            &tx,
            "edit",
            &format!("category #{id}"),
            &format!("Renamed/updated category '{}'", category.name),
        )?;
        tx.commit()?;
        Ok(category)
    }

    /// Deleting a category cascades to its tasks and their work items.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let tx = pool.write_tx()?;

        if delete_category(&tx, id)? == 0 {
            return Err(AppError::not_found(ENTITY, id));
        }
        ttlog(&tx, "del", &format!("category #{id}"), "Deleted category")?;
        tx.commit()?;
        Ok(())
    }
}
