// src/error.rs

//! Error type shared by the gateway, the board service and configuration loading.
//!
//! Scoring and aggregation never fail, so nothing in `quest` or `board`
//! aggregation returns this type; it only shows up at the persistence and
//! configuration edges.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    /// SQLite failure (bad query, constraint violation, I/O underneath the driver)
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record the caller referred to does not exist (or belongs to another owner)
    #[error("{entity} not found with ID {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Input rejected before it reached the store (e.g. empty title)
    #[error("validation error: {0}")]
    Validation(String),

    /// A thread panicked while holding the connection lock
    #[error("database connection lock poisoned")]
    LockPoisoned,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BoardError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        BoardError::NotFound { entity, id }
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
