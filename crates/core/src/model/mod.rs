mod answer;
mod bank;
mod ids;
mod question;
mod report;
mod selections;

pub use answer::{AnswerRule, option_letter};
pub use bank::{QuestionBank, QuestionGroup};
pub use ids::{ParseIdError, QuestionNo};
pub use question::QuestionRecord;
pub use report::{Miss, NOT_ANSWERED, ScoreReport, SubmitReason};
pub use selections::Selections;
