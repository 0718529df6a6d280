//! Unified application error type.
//! All modules (db, core, reminder, cli, utils) return AppError to keep the
//! error handling consistent and easy to manage.

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

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid care event type: {0}")]
    InvalidCareKind(String),

    #[error("Invalid interval: {0} (must be a positive number of days)")]
    InvalidInterval(f64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Plant #{0} not found")]
    PlantNotFound(i64),

    #[error("Care event #{0} not found")]
    EventNotFound(i64),

    #[error("Note #{0} not found")]
    NoteNotFound(i64),

    #[error("Reference plant #{0} not found")]
    ReferenceNotFound(i64),

    #[error("{0} #{1} not found")]
    AfflictionNotFound(crate::models::AfflictionKind, i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
