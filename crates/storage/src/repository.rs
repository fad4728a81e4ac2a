use async_trait::async_trait;
use quiz_core::model::QuestionBank;
use thiserror::Error;

/// Errors surfaced while loading a question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("bank file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bank request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bank request returned status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a JSON document of `group-key → [record]`.
///
/// # Errors
///
/// Returns `BankError::Parse` for malformed JSON or a non-array group.
pub fn parse_bank(bytes: &[u8]) -> Result<QuestionBank, BankError> {
    let bank: QuestionBank = serde_json::from_slice(bytes)?;
    log::debug!(
        "parsed bank with {} groups and {} questions",
        bank.groups().len(),
        bank.total_questions()
    );
    Ok(bank)
}

/// Where a session's question bank comes from.
///
/// Implementations make exactly one attempt per call; callers decide what a
/// failure means.
#[async_trait]
pub trait BankSource: Send + Sync {
    /// Load the whole bank.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the bank cannot be fetched or parsed.
    async fn load_bank(&self) -> Result<QuestionBank, BankError>;

    /// Human-readable location for log lines.
    fn describe(&self) -> String;
}

/// Bank already held in memory, for tests and embedded banks.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBankSource {
    bank: QuestionBank,
}

impl InMemoryBankSource {
    #[must_use]
    pub fn new(bank: QuestionBank) -> Self {
        Self { bank }
    }

    /// # Errors
    ///
    /// Returns `BankError::Parse` when `json` is not a valid bank.
    pub fn from_json(json: &str) -> Result<Self, BankError> {
        parse_bank(json.as_bytes()).map(Self::new)
    }
}

#[async_trait]
impl BankSource for InMemoryBankSource {
    async fn load_bank(&self) -> Result<QuestionBank, BankError> {
        Ok(self.bank.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory bank ({} questions)", self.bank.total_questions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::AnswerRule;

    #[tokio::test]
    async fn in_memory_source_returns_bank() {
        let source = InMemoryBankSource::from_json(
            r#"{"CO1": [{"question": "q", "options": ["a", "b"], "answer": "a"}]}"#,
        )
        .unwrap();

        let bank = source.load_bank().await.unwrap();

        assert_eq!(bank.total_questions(), 1);
        assert!(source.describe().contains("1 questions"));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse_bank(b"not json").unwrap_err();
        assert!(matches!(err, BankError::Parse(_)));
    }

    #[test]
    fn parse_rejects_top_level_array() {
        let err = parse_bank(b"[]").unwrap_err();
        assert!(matches!(err, BankError::Parse(_)));
    }

    #[test]
    fn non_string_answer_keeps_rest_of_bank() {
        let bank = parse_bank(
            br#"{"CO1": [
                {"question": "Pick 3", "options": ["1", "2", "3", "4"], "answer": 2},
                {"question": "Pick r", "options": ["p", "q", "r", "s"], "answer": "r"}
            ]}"#,
        )
        .unwrap();

        let questions = bank.records().collect::<Vec<_>>();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].correct_index(AnswerRule::OptionText), None);
        assert_eq!(questions[1].correct_index(AnswerRule::OptionText), Some(2));
    }
}
