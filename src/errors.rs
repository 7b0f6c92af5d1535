//! Unified application error type.
//! All modules (db, core, cli, export) return AppError so that the binary
//! can print a single short message and exit.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
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

    #[error("Document encoding error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid meter category: {0}")]
    InvalidCategory(String),

    #[error("Invalid meter reading: {0}")]
    InvalidReading(String),

    // ---------------------------
    // Form validation
    // ---------------------------
    #[error("Missing description: please enter a task description")]
    MissingDescription,

    #[error("Invalid time range: end time must be after start time")]
    InvalidTimeRange,

    #[error("Missing meter name")]
    MissingMeterName,

    // ---------------------------
    // Lookups
    // ---------------------------
    #[error("Task #{0} not found")]
    TaskNotFound(i64),

    #[error("Meter #{0} not found")]
    MeterNotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export / backup errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("Backup error: {0}")]
    Backup(String),
}

pub type AppResult<T> = Result<T, AppError>;
