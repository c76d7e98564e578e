//! Core error types for daystreak-core.
//!
//! This module defines the error hierarchy using thiserror. Most failure
//! conditions in the streak domain are deliberate no-ops (unknown ids, blank
//! names); what remains here are storage failures and requests rejected at the
//! calendar boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for daystreak-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Writes to the key-value slot were refused
    #[error("Write to '{key}' failed: {message}")]
    WriteFailed { key: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dotted configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors raised at the calendar boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Day string is not a canonical `YYYY-MM-DD` calendar day
    #[error("Invalid day '{0}': expected YYYY-MM-DD")]
    InvalidDay(String),

    /// Day-of-month outside the displayed month
    #[error("Day {day} does not exist in {year}-{month:02}")]
    DayOutOfMonth { year: i32, month: u32, day: u32 },

    /// Toggling a day other than today outside developer mode
    #[error("Only today ({today}) can be edited outside developer mode, got {day}")]
    EditNotPermitted { day: String, today: String },

    /// Destructive action requested outside developer mode
    #[error("'{action}' is only available in developer mode")]
    DeveloperModeRequired { action: String },

    /// Confirmation without a pending request
    #[error("No pending action to confirm")]
    NoPendingAction,

    /// Operation needs a selected streak
    #[error("No streak selected")]
    NoSelection,

    /// Blank streak name
    #[error("Streak name must not be empty")]
    EmptyName,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
