use chrono::{DateTime, Utc};

use crate::model::answer::AnswerRule;
use crate::model::question::QuestionRecord;
use crate::model::selections::Selections;

/// Text shown for a question the user never answered.
pub const NOT_ANSWERED: &str = "Not answered";

/// What ended the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReason {
    Manual,
    TimedOut,
}

/// A question the user did not get right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Miss {
    pub position: usize,
    pub prompt: String,
    /// Text of the chosen option; `None` when unanswered or out of range.
    pub user_answer: Option<String>,
    /// `None` when the record's answer does not resolve to an option.
    pub correct_answer: Option<String>,
    /// The record's answer key could not be resolved at all.
    pub unscorable: bool,
}

impl Miss {
    #[must_use]
    pub fn user_answer_text(&self) -> &str {
        self.user_answer.as_deref().unwrap_or(NOT_ANSWERED)
    }

    #[must_use]
    pub fn correct_answer_text(&self) -> &str {
        self.correct_answer.as_deref().unwrap_or_default()
    }
}

/// Outcome of a submitted quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    correct: usize,
    total: usize,
    misses: Vec<Miss>,
    reason: SubmitReason,
    started_at: DateTime<Utc>,
    submitted_at: DateTime<Utc>,
}

impl ScoreReport {
    /// Score `questions` against `selections`.
    ///
    /// A selection counts only if it is in range for the record's options and
    /// equals the resolved correct index. Records whose answer key does not
    /// resolve count toward the total but never toward the score.
    #[must_use]
    pub fn tally(
        questions: &[QuestionRecord],
        selections: &Selections,
        rule: AnswerRule,
        reason: SubmitReason,
        started_at: DateTime<Utc>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let mut correct = 0_usize;
        let mut misses = Vec::new();

        for (position, question) in questions.iter().enumerate() {
            let correct_index = question.correct_index(rule);
            let chosen = selections
                .get(position)
                .filter(|option| *option < question.options().len());

            if chosen.is_some() && chosen == correct_index {
                correct += 1;
                continue;
            }

            misses.push(Miss {
                position,
                prompt: question.prompt().to_owned(),
                user_answer: chosen.and_then(|i| question.option_text(i)).map(str::to_owned),
                correct_answer: correct_index
                    .and_then(|i| question.option_text(i))
                    .map(str::to_owned),
                unscorable: correct_index.is_none(),
            });
        }

        Self {
            correct,
            total: questions.len(),
            misses,
            reason,
            started_at,
            submitted_at,
        }
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn misses(&self) -> &[Miss] {
        &self.misses
    }

    #[must_use]
    pub fn reason(&self) -> SubmitReason {
        self.reason
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Number of records whose answer key did not resolve.
    #[must_use]
    pub fn unscorable(&self) -> usize {
        self.misses.iter().filter(|m| m.unscorable).count()
    }

    #[must_use]
    pub fn score_line(&self) -> String {
        format!("Score: {} / {}", self.correct, self.total)
    }
}
