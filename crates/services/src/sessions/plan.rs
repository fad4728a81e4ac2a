use rand::seq::SliceRandom;
use rand::{Rng, rng};

use quiz_core::model::{QuestionBank, QuestionRecord};
use quiz_core::{QuizConfig, ShuffleMode};

/// Selection result for a quiz session.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePlan {
    pub questions: Vec<QuestionRecord>,
    /// Records eligible after filtering.
    pub available: usize,
    /// Records dropped for having no options.
    pub filtered_out: usize,
}

impl SamplePlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Flattens a bank and samples up to `cap` questions from it.
pub struct QuestionSampler<'a> {
    config: &'a QuizConfig,
}

impl<'a> QuestionSampler<'a> {
    #[must_use]
    pub fn new(config: &'a QuizConfig) -> Self {
        Self { config }
    }

    /// Sample using the thread-local RNG.
    #[must_use]
    pub fn sample(self, bank: &QuestionBank) -> SamplePlan {
        self.sample_with(bank, &mut rng())
    }

    /// Sample with a caller-provided RNG.
    ///
    /// - Groups are flattened in key order, records in group order.
    /// - Records with no options are dropped when `filter_empty` is set.
    /// - The result holds `min(cap, available)` records.
    ///
    /// Neither shuffle mode is suitable where statistical or cryptographic
    /// guarantees matter.
    pub fn sample_with<R: Rng>(self, bank: &QuestionBank, rng: &mut R) -> SamplePlan {
        let cap = self.config.cap();
        let total = bank.total_questions();

        let mut candidates: Vec<QuestionRecord> = bank
            .records()
            .filter(|q| !self.config.filter_empty() || q.has_options())
            .cloned()
            .collect();
        let available = candidates.len();

        let questions = match self.config.shuffle() {
            ShuffleMode::Uniform => {
                let (picked, _) = candidates.partial_shuffle(rng, cap);
                picked.to_vec()
            }
            ShuffleMode::RandomKeys => {
                let mut keyed: Vec<(f64, QuestionRecord)> = candidates
                    .into_iter()
                    .map(|q| (rng.random::<f64>(), q))
                    .collect();
                keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
                keyed.into_iter().take(cap).map(|(_, q)| q).collect()
            }
            ShuffleMode::Preserve => {
                candidates.truncate(cap);
                candidates
            }
        };

        SamplePlan {
            questions,
            available,
            filtered_out: total - available,
        }
    }
}
