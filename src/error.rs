//! Error types shared across the crate.

use thiserror::Error;

/// Boundary validation failures for the leveling engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LevelingError {
    #[error("XP amount must be finite, got {0}")]
    NonFiniteAmount(f64),

    #[error("invalid XP curve: {0}")]
    InvalidCurve(String),
}

/// Illegal quest status transitions and malformed quests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuestError {
    #[error("quest '{0}' is already completed")]
    AlreadyCompleted(String),

    #[error("quest {field} must be finite, got {value}")]
    NonFiniteAmount { field: &'static str, value: f64 },
}

#[derive(Error, Debug)]
pub enum FinquestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Leveling(#[from] LevelingError),

    #[error(transparent)]
    Quest(#[from] QuestError),

    #[error("no quest with id '{0}'")]
    QuestNotFound(String),
}

pub type Result<T> = std::result::Result<T, FinquestError>;
