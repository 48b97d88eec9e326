use crate::cli::commands::open_db;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(print: bool, cfg: &Config) -> AppResult<()> {
    if !print {
        info("Nothing to do: use `log --print` to list the internal log.");
        return Ok(());
    }
    let pool = open_db(cfg)?;
    LogLogic::print_log(&pool)
}
