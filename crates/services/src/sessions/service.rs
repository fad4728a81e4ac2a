use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;

use quiz_core::model::{AnswerRule, QuestionBank, QuestionRecord, ScoreReport, Selections, SubmitReason};
use quiz_core::{Clock, Countdown, QuizConfig, Tick};

use super::plan::{QuestionSampler, SamplePlan};
use crate::error::SessionError;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of a submit call. Only the first call scores the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission<'a> {
    Submitted(&'a ScoreReport),
    AlreadySubmitted(&'a ScoreReport),
}

impl<'a> Submission<'a> {
    #[must_use]
    pub fn report(self) -> &'a ScoreReport {
        match self {
            Submission::Submitted(report) | Submission::AlreadySubmitted(report) => report,
        }
    }

    #[must_use]
    pub fn is_first(self) -> bool {
        matches!(self, Submission::Submitted(_))
    }
}

/// Result of one timer tick against a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTick {
    Running { displayed: u32 },
    /// The countdown hit zero on this tick and the session was submitted.
    Expired { displayed: u32 },
    Idle,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One timed quiz over a fixed sample of questions.
///
/// `Active` until the first submit (manual or timeout), then terminal: later
/// selections fail with `SessionError::Completed`, ticks are idle and submit
/// returns the stored report.
pub struct QuizSession {
    questions: Vec<QuestionRecord>,
    answer_rule: AnswerRule,
    selections: Selections,
    countdown: Countdown,
    clock: Clock,
    started_at: DateTime<Utc>,
    report: Option<ScoreReport>,
}

impl QuizSession {
    /// Sample `bank` according to `config` and start a session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no option-bearing questions remain.
    pub fn start(bank: &QuestionBank, config: &QuizConfig, clock: Clock) -> Result<Self, SessionError> {
        let plan = QuestionSampler::new(config).sample(bank);
        Self::from_plan(plan, config, clock)
    }

    /// Same as `start` with a caller-provided RNG.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no option-bearing questions remain.
    pub fn start_with_rng<R: Rng>(
        bank: &QuestionBank,
        config: &QuizConfig,
        clock: Clock,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let plan = QuestionSampler::new(config).sample_with(bank, rng);
        Self::from_plan(plan, config, clock)
    }

    fn from_plan(plan: SamplePlan, config: &QuizConfig, clock: Clock) -> Result<Self, SessionError> {
        log::debug!(
            "sampled {} of {} questions ({} without options)",
            plan.questions.len(),
            plan.available,
            plan.filtered_out
        );
        Self::from_questions(plan.questions, config, clock)
    }

    /// Start a session over an already chosen list of questions.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `questions` is empty.
    pub fn from_questions(
        questions: Vec<QuestionRecord>,
        config: &QuizConfig,
        clock: Clock,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        Ok(Self {
            questions,
            answer_rule: config.answer_rule(),
            selections: Selections::new(),
            countdown: Countdown::new(config.time_limit_secs()),
            clock,
            started_at: clock.now(),
            report: None,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    #[must_use]
    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    #[must_use]
    pub fn answer_rule(&self) -> AnswerRule {
        self.answer_rule
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.report.is_some()
    }

    #[must_use]
    pub fn report(&self) -> Option<&ScoreReport> {
        self.report.as_ref()
    }

    /// Record `option` for the question at `position`, replacing any earlier choice.
    ///
    /// `option` is not checked against the question's options; scoring treats
    /// an out-of-range choice as unanswered.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after submission and
    /// `SessionError::PositionOutOfRange` for an unknown position.
    pub fn record_selection(&mut self, position: usize, option: usize) -> Result<Option<usize>, SessionError> {
        if self.is_submitted() {
            return Err(SessionError::Completed);
        }
        if position >= self.questions.len() {
            return Err(SessionError::PositionOutOfRange {
                position,
                len: self.questions.len(),
            });
        }
        Ok(self.selections.record(position, option))
    }

    /// Advance the countdown by one second. Submits on expiry.
    pub fn tick(&mut self) -> SessionTick {
        match self.countdown.tick() {
            Tick::Running { displayed } => SessionTick::Running { displayed },
            Tick::Expired { displayed } => {
                log::info!("time limit reached, submitting");
                self.finish(SubmitReason::TimedOut);
                SessionTick::Expired { displayed }
            }
            Tick::Idle => SessionTick::Idle,
        }
    }

    /// Submit the session and score it. Idempotent.
    pub fn submit(&mut self) -> Submission<'_> {
        self.finish(SubmitReason::Manual)
    }

    fn finish(&mut self, reason: SubmitReason) -> Submission<'_> {
        self.countdown.cancel();

        let first = self.report.is_none();
        let report = self.report.get_or_insert_with(|| {
            ScoreReport::tally(
                &self.questions,
                &self.selections,
                self.answer_rule,
                reason,
                self.started_at,
                self.clock.now(),
            )
        });

        if first {
            log::info!(
                "quiz submitted ({reason:?}): {}/{} correct",
                report.correct(),
                report.total()
            );
            Submission::Submitted(report)
        } else {
            log::debug!("submit ignored, session already submitted");
            Submission::AlreadySubmitted(report)
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("answer_rule", &self.answer_rule)
            .field("selections_len", &self.selections.len())
            .field("remaining_secs", &self.countdown.remaining())
            .field("started_at", &self.started_at)
            .field("submitted", &self.is_submitted())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
