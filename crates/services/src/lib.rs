#![forbid(unsafe_code)]

pub mod browse;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use browse::{ReviewBrowser, RevealedAnswer};
pub use error::SessionError;

pub use sessions::{
    QuestionSampler, QuizEvent, QuizPresenter, QuizService, QuizSession, SamplePlan,
    SessionTick, Submission, run_timed,
};
