use thiserror::Error;

/// Rejected quiz or browse configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("question cap must be > 0")]
    InvalidCap,

    #[error("time limit must be > 0 seconds")]
    InvalidTimeLimit,

    #[error("browse page size must be > 0")]
    InvalidMaxQuestions,

    #[error("group key cannot be empty")]
    EmptyGroupKey,
}
