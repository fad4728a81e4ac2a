use quiz_core::model::{QuestionRecord, ScoreReport, Selections};

/// Rendering side of a quiz session.
///
/// The session calls out only at state transitions: once with the question
/// list after a successful load, once per selection and timer tick, and once
/// with the report or the error message.
pub trait QuizPresenter {
    fn render_questions(&mut self, questions: &[QuestionRecord], selections: &Selections);

    /// Highlight the chosen option. Defaults to a no-op.
    fn render_selection(&mut self, _position: usize, _option: usize) {}

    /// Remaining time as `M:SS`.
    fn render_countdown(&mut self, remaining: &str);

    fn render_report(&mut self, report: &ScoreReport);

    fn render_error(&mut self, message: &str);
}
