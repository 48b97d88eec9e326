use crate::models::report::ReportKind;
use crate::models::work_item::WorkItemOrder;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for timesheet
/// CLI application to track time spent on tasks with SQLite
#[derive(Parser)]
#[command(
    name = "timesheet",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal time tracker: categories, tasks, work intervals and clipped reports on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            requires = "edit_config",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Start, stop and record work intervals
    Work {
        #[command(subcommand)]
        action: WorkAction,
    },

    /// Report work time clipped to a window
    Report {
        /// Grouping of the report rows
        #[arg(value_enum)]
        kind: ReportKind,

        /// Window start (ISO-8601 datetime or YYYY-MM-DD, local time)
        #[arg(long, requires = "end", conflicts_with = "today")]
        start: Option<String>,

        /// Window end, exclusive (ISO-8601 datetime or YYYY-MM-DD, local time)
        #[arg(long, requires = "start", conflicts_with = "today")]
        end: Option<String>,

        /// Report today only (midnight to midnight)
        #[arg(long)]
        today: bool,

        /// Only count work on tasks of this category
        #[arg(long, value_name = "ID")]
        category: Option<i64>,

        /// Only count work on this task
        #[arg(long, value_name = "ID")]
        task: Option<i64>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        file: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Create a category
    Add {
        name: String,

        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// List all categories
    List,

    /// Show one category with its tasks
    Show { id: i64 },

    /// Rename a category or change its description
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, short = 'd', conflicts_with = "clear_description")]
        description: Option<String>,

        #[arg(long = "clear-description")]
        clear_description: bool,
    },

    /// Delete a category, its tasks and their work
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task inside a category
    Add {
        name: String,

        #[arg(long, value_name = "ID")]
        category: i64,
    },

    /// List tasks
    List {
        #[arg(long, conflicts_with = "active", help = "Only archived tasks")]
        archived: bool,

        #[arg(long, help = "Only tasks that are not archived")]
        active: bool,
    },

    /// Show one task with its recorded work
    Show { id: i64 },

    /// Rename, move or (un)archive a task
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_name = "ID")]
        category: Option<i64>,

        #[arg(long, conflicts_with = "unarchive")]
        archive: bool,

        #[arg(long)]
        unarchive: bool,
    },

    /// Delete a task and its work
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum WorkAction {
    /// Start working on a task
    Start {
        task_id: i64,

        /// Start time instead of now (ISO-8601 datetime, local time)
        #[arg(long = "at", value_name = "DATETIME")]
        at: Option<String>,
    },

    /// Stop the running work item
    Stop,

    /// Show the running work item, if any
    Current,

    /// Record a work item with explicit bounds
    Add {
        task_id: i64,

        #[arg(long, value_name = "DATETIME")]
        start: String,

        /// Leave out to record a running item
        #[arg(long, value_name = "DATETIME")]
        end: Option<String>,
    },

    /// Change the task or bounds of a work item
    Edit {
        id: i64,

        #[arg(long, value_name = "ID")]
        task: Option<i64>,

        #[arg(long, value_name = "DATETIME")]
        start: Option<String>,

        #[arg(long, value_name = "DATETIME")]
        end: Option<String>,
    },

    /// Delete a work item
    Del { id: i64 },

    /// Show one work item
    Show { id: i64 },

    /// List work items page by page
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = crate::models::page::DEFAULT_PAGE_SIZE)]
        size: u32,

        #[arg(long, value_enum, default_value = "start")]
        order: WorkItemOrder,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}
