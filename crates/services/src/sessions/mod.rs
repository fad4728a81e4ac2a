mod plan;
mod presenter;
mod runner;
mod service;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::SessionError;
pub use plan::{QuestionSampler, SamplePlan};
pub use presenter::QuizPresenter;
pub use runner::{QuizEvent, run_timed};
pub use service::{QuizSession, SessionTick, Submission};
pub use workflow::QuizService;
