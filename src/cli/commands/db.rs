use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};
use ansi_term::Colour::Cyan;

pub struct DbFlags {
    pub migrate: bool,
    pub check: bool,
    pub vacuum: bool,
    pub info: bool,
}

pub fn handle(flags: &DbFlags, cfg: &Config) -> AppResult<()> {
    if !(flags.migrate || flags.check || flags.vacuum || flags.info) {
        info("Nothing to do: use --migrate, --check, --vacuum or --info.");
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database)?;

    if flags.migrate {
        println!("{}", Cyan.paint("▶ Running migrations…"));
        run_pending_migrations(&pool.conn)?;
        success("Migration completed.");
    }

    if flags.info {
        stats::print_db_info(&pool, &cfg.database)?;
    }

    if flags.check {
        println!("{}", Cyan.paint("▶ Running integrity check…"));
        let integrity: String = pool
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

        if integrity == "ok" {
            success("Integrity check passed.");
        } else {
            error(format!("Integrity check failed: {integrity}"));
        }
    }

    if flags.vacuum {
        println!("{}", Cyan.paint("▶ Running VACUUM…"));
        pool.conn.execute_batch("VACUUM;")?;
        success("Vacuum completed.");
    }

    Ok(())
}
