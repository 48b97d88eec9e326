//! timesheet library root.
//! Exposes the CLI parser, the high-level run() function and the
//! tracking/reporting modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use crate::cli::commands::db::DbFlags;
use crate::cli::commands::report::ReportArgs;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::errors::AppResult;
use crate::models::report::ReportFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config {
            print_config,
            edit_config,
            editor,
        } => cli::commands::config::handle(*print_config, *edit_config, editor.as_deref(), cfg),
        Commands::Db {
            migrate,
            check,
            vacuum,
            info,
        } => {
            let flags = DbFlags {
                migrate: *migrate,
                check: *check,
                vacuum: *vacuum,
                info: *info,
            };
            cli::commands::db::handle(&flags, cfg)
        }
        Commands::Log { print } => cli::commands::log::handle(*print, cfg),
        Commands::Category { action } => cli::commands::category::handle(action, cfg),
        Commands::Task { action } => cli::commands::task::handle(action, cfg, clock),
        Commands::Work { action } => cli::commands::work::handle(action, cfg, clock),
        Commands::Report {
            kind,
            start,
            end,
            today,
            category,
            task,
            format,
            file,
        } => {
            let args = ReportArgs {
                kind: *kind,
                start: start.as_ref(),
                end: end.as_ref(),
                today: *today,
                filter: ReportFilter {
                    category_id: *category,
                    task_id: *task,
                },
                format: *format,
                file: file.as_deref(),
            };
            cli::commands::report::handle(&args, cfg, clock)
        }
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `init` writes the configuration, so it must not require a valid one
    let mut cfg = match cli.command {
        Commands::Init => Config::default(),
        _ => Config::load()?,
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg, &SystemClock)
}
