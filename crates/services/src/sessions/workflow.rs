use std::sync::Arc;

use tokio::sync::mpsc;

use quiz_core::model::ScoreReport;
use quiz_core::{Clock, QuizConfig};
use storage::BankSource;

use super::presenter::QuizPresenter;
use super::runner::{QuizEvent, run_timed};
use super::service::QuizSession;
use crate::error::SessionError;

/// Loads a bank and runs timed sessions over it.
#[derive(Clone)]
pub struct QuizService {
    source: Arc<dyn BankSource>,
    config: QuizConfig,
    clock: Clock,
}

impl QuizService {
    #[must_use]
    pub fn new(source: Arc<dyn BankSource>, config: QuizConfig) -> Self {
        Self {
            source,
            config,
            clock: Clock::default(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Load the bank once and sample a new session from it.
    ///
    /// There is no retry; a failed load is final for this attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Load` if the bank cannot be loaded and
    /// `SessionError::Empty` if nothing is left after filtering.
    pub async fn start_session(&self) -> Result<QuizSession, SessionError> {
        log::info!("loading question bank from {}", self.source.describe());
        let bank = self.source.load_bank().await.map_err(|err| {
            log::error!("quiz loading error: {err}");
            SessionError::from(err)
        })?;
        QuizSession::start(&bank, &self.config, self.clock)
    }

    /// Run the whole flow: load, render questions, count down, report.
    ///
    /// On a load failure the presenter gets the static error message and the
    /// session never becomes active.
    ///
    /// # Errors
    ///
    /// Returns the load error after it has been rendered.
    pub async fn launch<P>(
        &self,
        presenter: &mut P,
        events: &mut mpsc::Receiver<QuizEvent>,
    ) -> Result<ScoreReport, SessionError>
    where
        P: QuizPresenter + ?Sized,
    {
        let mut session = match self.start_session().await {
            Ok(session) => session,
            Err(err) => {
                presenter.render_error(err.user_message());
                return Err(err);
            }
        };

        presenter.render_questions(session.questions(), session.selections());
        Ok(run_timed(&mut session, presenter, events).await)
    }
}
