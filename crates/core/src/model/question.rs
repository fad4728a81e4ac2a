use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::model::answer::AnswerRule;
use crate::model::ids::QuestionNo;

/// One multiple-choice question as stored in a bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "qno", default, skip_serializing_if = "Option::is_none")]
    number: Option<QuestionNo>,
    #[serde(rename = "question")]
    prompt: String,
    #[serde(default, deserialize_with = "lenient_options")]
    options: Vec<String>,
    #[serde(default, deserialize_with = "lenient_answer")]
    answer: Option<String>,
}

/// Anything but an array means no options. Scalar entries keep their text.
fn lenient_options<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect())
}

/// Only a string can name the correct option; any other value never resolves.
fn lenient_answer<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

impl QuestionRecord {
    #[must_use]
    pub fn new<I, S>(prompt: impl Into<String>, options: I, answer: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            number: None,
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            answer: Some(answer.into()),
        }
    }

    #[must_use]
    pub fn with_number(mut self, number: QuestionNo) -> Self {
        self.number = Some(number);
        self
    }

    #[must_use]
    pub fn number(&self) -> Option<QuestionNo> {
        self.number
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Raw answer field: a letter or an option's text depending on the bank.
    /// `None` when the bank stored something other than a string.
    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    #[must_use]
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    #[must_use]
    pub fn option_text(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    /// Correct option index under `rule`, or `None` for malformed records.
    #[must_use]
    pub fn correct_index(&self, rule: AnswerRule) -> Option<usize> {
        self.answer
            .as_deref()
            .and_then(|answer| rule.resolve(answer, &self.options))
    }

    /// Correct option text under `rule`, when it resolves to an existing option.
    #[must_use]
    pub fn correct_text(&self, rule: AnswerRule) -> Option<&str> {
        self.correct_index(rule).and_then(|i| self.option_text(i))
    }
}
