use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot '{name}' not found")]
    SnapshotNotFound { name: String },

    #[error("Invalid rate table for '{dimension}': {reason}")]
    InvalidRateTable { dimension: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DashResult<T> = Result<T, DashError>;
