//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;

use crate::quiz::QuizPhase;

/// Errors emitted by `QuizSession` and `QuizRunner`.
///
/// Every variant is recoverable. A rejected operation leaves the session unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("invalid quiz configuration: {0}")]
    InvalidConfiguration(String),
    #[error("option index must be between 1 and 4, got {0}")]
    InvalidOption(u8),
    #[error("question already answered")]
    AlreadyAnswered,
    #[error("please answer the question")]
    NotAnswered,
    #[error("quiz already started")]
    AlreadyStarted,
    #[error("quiz is not in progress (phase: {0:?})")]
    NotInProgress(QuizPhase),
    #[error(transparent)]
    Supply(#[from] StorageError),
    #[error("quiz runner has stopped")]
    RunnerStopped,
}
