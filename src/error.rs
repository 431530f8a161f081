//! Error types of this crate

use thiserror::Error;

use crate::task::TaskId;

/// Errors returned by the [`TaskStore`](crate::TaskStore) operations
#[derive(Error, Debug)]
pub enum Error {
    /// The user input has been rejected. The store has not been modified
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No task matches this ID. The store has not been modified
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    /// The durable storage could not be read or written
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Bad user input.
///
/// The `Display` messages are meant to be shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a task name.")]
    EmptyName,

    #[error("Cannot set tasks in the past.")]
    PastDate,

    #[error("End time must be after start time.")]
    InvertedTimeRange,

    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Invalid time: {0:?}")]
    InvalidTime(String),
}

/// Failures of the durable storage, or of the (de)serialization of its content
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage quota exceeded while writing {0:?}")]
    QuotaExceeded(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
