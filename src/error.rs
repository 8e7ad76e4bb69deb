//! Custom error types for the tracker
//!
//! Provides structured, typed errors instead of generic Box<dyn Error>

use thiserror::Error;

/// Top-level tracker errors
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Errors raised at the snapshot decode boundary
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot is missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("Snapshot date is empty")]
    EmptyDate,

    #[error("Snapshot has no categories")]
    NoCategories,

    #[error("Category {name} has no instruments")]
    NoInstruments { name: String },
}

impl From<serde_yaml::Error> for TrackerError {
    fn from(err: serde_yaml::Error) -> Self {
        TrackerError::Config(err.to_string())
    }
}

impl TrackerError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        TrackerError::Io {
            path: path.into(),
            source,
        }
    }
}
