pub mod category;
pub mod config;
pub mod db;
pub mod init;
pub mod log;
pub mod report;
pub mod task;
pub mod work;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database, bringing its schema up to date first.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
