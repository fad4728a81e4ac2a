use crate::error::ConfigError;
use crate::model::AnswerRule;

//
// ─── SHUFFLE ───────────────────────────────────────────────────────────────────
//

/// How the flattened bank is permuted before truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShuffleMode {
    /// Fisher–Yates selection of the first `cap` elements.
    #[default]
    Uniform,
    /// One independent random key per record, then a stable sort by key.
    RandomKeys,
    /// Keep bank order.
    Preserve,
}

//
// ─── QUIZ CONFIG ───────────────────────────────────────────────────────────────
//

/// Settings for a timed quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    cap: usize,
    time_limit_secs: u32,
    filter_empty: bool,
    answer_rule: AnswerRule,
    shuffle: ShuffleMode,
}

impl QuizConfig {
    pub const DEFAULT_CAP: usize = 20;
    pub const DEFAULT_TIME_LIMIT_SECS: u32 = 300;

    /// Build a config with explicit sample cap and time limit.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCap` or `ConfigError::InvalidTimeLimit` for zero values.
    pub fn new(cap: usize, time_limit_secs: u32) -> Result<Self, ConfigError> {
        if cap == 0 {
            return Err(ConfigError::InvalidCap);
        }
        if time_limit_secs == 0 {
            return Err(ConfigError::InvalidTimeLimit);
        }
        Ok(Self {
            cap,
            time_limit_secs,
            filter_empty: true,
            answer_rule: AnswerRule::Letter,
            shuffle: ShuffleMode::Uniform,
        })
    }

    /// Drop records without options before sampling. Banks that are known to
    /// be fully populated may turn this off.
    #[must_use]
    pub fn with_filter_empty(mut self, filter_empty: bool) -> Self {
        self.filter_empty = filter_empty;
        self
    }

    #[must_use]
    pub fn with_answer_rule(mut self, rule: AnswerRule) -> Self {
        self.answer_rule = rule;
        self
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: ShuffleMode) -> Self {
        self.shuffle = shuffle;
        self
    }

    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn filter_empty(&self) -> bool {
        self.filter_empty
    }

    #[must_use]
    pub fn answer_rule(&self) -> AnswerRule {
        self.answer_rule
    }

    #[must_use]
    pub fn shuffle(&self) -> ShuffleMode {
        self.shuffle
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            cap: Self::DEFAULT_CAP,
            time_limit_secs: Self::DEFAULT_TIME_LIMIT_SECS,
            filter_empty: true,
            answer_rule: AnswerRule::Letter,
            shuffle: ShuffleMode::Uniform,
        }
    }
}

//
// ─── BROWSE CONFIG ─────────────────────────────────────────────────────────────
//

/// Settings for the untimed review listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseConfig {
    max_questions: usize,
    initial_group: String,
    answer_rule: AnswerRule,
}

impl BrowseConfig {
    pub const DEFAULT_MAX_QUESTIONS: usize = 50;
    pub const DEFAULT_GROUP: &'static str = "CO1";

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMaxQuestions` for a zero page size and
    /// `ConfigError::EmptyGroupKey` for a blank group.
    pub fn new(max_questions: usize, initial_group: impl Into<String>) -> Result<Self, ConfigError> {
        if max_questions == 0 {
            return Err(ConfigError::InvalidMaxQuestions);
        }
        let initial_group = initial_group.into();
        if initial_group.trim().is_empty() {
            return Err(ConfigError::EmptyGroupKey);
        }
        Ok(Self {
            max_questions,
            initial_group,
            answer_rule: AnswerRule::OptionText,
        })
    }

    #[must_use]
    pub fn with_answer_rule(mut self, rule: AnswerRule) -> Self {
        self.answer_rule = rule;
        self
    }

    #[must_use]
    pub fn max_questions(&self) -> usize {
        self.max_questions
    }

    #[must_use]
    pub fn initial_group(&self) -> &str {
        &self.initial_group
    }

    #[must_use]
    pub fn answer_rule(&self) -> AnswerRule {
        self.answer_rule
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            max_questions: Self::DEFAULT_MAX_QUESTIONS,
            initial_group: Self::DEFAULT_GROUP.to_owned(),
            answer_rule: AnswerRule::OptionText,
        }
    }
}
