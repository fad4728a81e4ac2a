use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Author-assigned question number (`qno` in review banks).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionNo(u32);

impl QuestionNo {
    #[must_use]
    pub fn new(no: u32) -> Self {
        Self(no)
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for QuestionNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionNo({})", self.0)
    }
}

impl fmt::Display for QuestionNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// Error type for parsing a question number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid question number: {}", self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for QuestionNo {
    type Err = ParseIdError;

    /// Accepts both `7` and `Q7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('Q')
            .or_else(|| trimmed.strip_prefix('q'))
            .unwrap_or(trimmed);
        digits.parse::<u32>().map(QuestionNo::new).map_err(|_| ParseIdError {
            raw: s.to_string(),
        })
    }
}
