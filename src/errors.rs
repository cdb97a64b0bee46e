use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for dialog, validation, and storage failures.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("User not registered: {0}")]
    Unauthorized(i64),
    #[error("No prior dialog state to return to")]
    HistoryExhausted,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = StdResult<T, BotError>;
