//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError so that domain
//! failures and persistence failures travel through the same `?` chain.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Work interval rules
    // ---------------------------
    #[error("Cannot start work: already started")]
    AlreadyStarted,

    #[error("There is no work item to stop")]
    NoCurrentWork,

    #[error("Invalid range: start {start} must be before end {end}")]
    RangeOrder { start: i64, end: i64 },

    #[error("Work item overlaps existing work item #{id}")]
    Overlap { id: i64 },

    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: i64 },

    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid report window: {0}")]
    InvalidWindow(String),

    #[error("Invalid value: {0}")]
    InvalidInput(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] serde_yaml::Error),

    // ---------------------------
    // Output errors
    // ---------------------------
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    /// Domain errors the user can fix by changing the request.
    /// Everything else is an unclassified failure that aborts the operation.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AppError::AlreadyStarted
                | AppError::NoCurrentWork
                | AppError::RangeOrder { .. }
                | AppError::Overlap { .. }
                | AppError::NotFound { .. }
                | AppError::InvalidDate(_)
                | AppError::InvalidWindow(_)
                | AppError::InvalidInput(_)
        )
    }

    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        AppError::NotFound { entity, id }
    }
}

pub type AppResult<T> = Result<T, AppError>;
