//! Error types for the eventcal ecosystem.

use thiserror::Error;

use crate::event::EventId;

/// Errors that can occur in eventcal operations.
#[derive(Error, Debug)]
pub enum EventCalError {
    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid recurring period: {0}")]
    InvalidPeriod(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for eventcal operations.
pub type EventCalResult<T> = Result<T, EventCalError>;
