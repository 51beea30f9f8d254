//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

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
    // Encoding
    // ---------------------------
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid display mode: {0}")]
    InvalidDisplayMode(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    // ---------------------------
    // Reminder errors
    // ---------------------------
    #[error("Invalid reminder: {0}")]
    InvalidReminder(String),

    #[error("Reminder not found: {0}")]
    ReminderNotFound(String),

    #[error("Duplicate reminder identifier: {0}")]
    DuplicateReminder(String),

    // ---------------------------
    // Notification / platform errors
    // ---------------------------
    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Login item error: {0}")]
    LoginItem(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
