//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::ConfigError;
use storage::BankError;

/// Errors emitted by quiz and browse sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions with options available")]
    Empty,
    #[error("session already submitted")]
    Completed,
    #[error("question position {position} out of range for {len} questions")]
    PositionOutOfRange { position: usize, len: usize },
    #[error(transparent)]
    Load(#[from] BankError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SessionError {
    /// Static message for the error view.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::Empty => "No questions with options available for the quiz.",
            SessionError::Load(_) => "Unable to load quiz questions.",
            SessionError::Completed => "This quiz has already been submitted.",
            SessionError::PositionOutOfRange { .. } => "That question does not exist.",
            SessionError::Config(_) => "The quiz is not configured correctly.",
        }
    }

    /// True for failures that end a session before it becomes active.
    #[must_use]
    pub fn is_load_failure(&self) -> bool {
        matches!(self, SessionError::Empty | SessionError::Load(_))
    }
}
