use std::fmt;
use std::io::Write;

use quiz_core::model::{QuestionRecord, ScoreReport, Selections, option_letter};
use services::{QuizPresenter, ReviewBrowser};

/// Line-oriented presenter over any writer (stdout in the binary).
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = self.out.write_fmt(args).and_then(|()| self.out.flush()) {
            log::warn!("terminal write failed: {err}");
        }
    }
}

fn letter(index: usize) -> char {
    option_letter(index).unwrap_or('?')
}

impl<W: Write> QuizPresenter for TerminalPresenter<W> {
    fn render_questions(&mut self, questions: &[QuestionRecord], selections: &Selections) {
        for (position, question) in questions.iter().enumerate() {
            self.emit(format_args!("\n{}. {}\n", position + 1, question.prompt()));
            for (i, option) in question.options().iter().enumerate() {
                let marker = if selections.get(position) == Some(i) { '*' } else { ' ' };
                self.emit(format_args!("  {marker}{}) {option}\n", letter(i)));
            }
        }
        self.emit(format_args!(
            "\nAnswer with `<question> <letter>`, finish with `submit`.\n"
        ));
    }

    fn render_selection(&mut self, position: usize, option: usize) {
        self.emit(format_args!(
            "Question {}: selected {}\n",
            position + 1,
            letter(option)
        ));
    }

    fn render_countdown(&mut self, remaining: &str) {
        self.emit(format_args!("\rTime Left: {remaining} "));
    }

    fn render_report(&mut self, report: &ScoreReport) {
        self.emit(format_args!("\n\n{}\nYour Quiz Report\n", report.score_line()));
        for miss in report.misses() {
            self.emit(format_args!(
                "- {}\n  Your Answer: {}\n  Correct Answer: {}\n",
                miss.prompt,
                miss.user_answer_text(),
                miss.correct_answer_text()
            ));
        }
        self.emit(format_args!(
            "\nBack to practice mode: run with `browse`.\n"
        ));
    }

    fn render_error(&mut self, message: &str) {
        self.emit(format_args!("Error: {message}\n"));
    }
}

/// Print the current page of a review browser.
pub fn render_browse_page<W: Write>(out: &mut W, browser: &ReviewBrowser) -> std::io::Result<()> {
    writeln!(out, "{}", browser.title())?;
    writeln!(out, "{}", browser.count_line())?;
    for (index, question) in browser.visible().iter().enumerate() {
        let label = question
            .number()
            .map_or_else(|| format!("{}", index + 1), |no| no.to_string());
        writeln!(out, "\n{label} {}", question.prompt())?;
        let chosen = browser.selection_for(index);
        for (i, option) in question.options().iter().enumerate() {
            let marker = if chosen == Some(i) { '*' } else { ' ' };
            writeln!(out, "  {marker}{}) {option}", letter(i))?;
        }
    }
    writeln!(out, "\nGroups: {}", browser.groups().collect::<Vec<_>>().join(", "))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerRule, QuestionBank, QuestionGroup, QuestionNo, SubmitReason};
    use quiz_core::time::fixed_now;
    use quiz_core::BrowseConfig;

    fn output(presenter: TerminalPresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn renders_questions_with_letters() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        let questions = vec![QuestionRecord::new("2 + 2?", ["3", "4"], "b")];
        let selections: Selections = [(0, 1)].into_iter().collect();

        presenter.render_questions(&questions, &selections);

        let text = output(presenter);
        assert!(text.contains("1. 2 + 2?"));
        assert!(text.contains("   A) 3"));
        assert!(text.contains("  *B) 4"));
    }

    #[test]
    fn renders_report_misses() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        let questions = vec![QuestionRecord::new("Capital?", ["Rome", "Paris"], "b")];
        let report = ScoreReport::tally(
            &questions,
            &Selections::new(),
            AnswerRule::Letter,
            SubmitReason::TimedOut,
            fixed_now(),
            fixed_now(),
        );

        presenter.render_report(&report);

        let text = output(presenter);
        assert!(text.contains("Score: 0 / 1"));
        assert!(text.contains("Your Answer: Not answered"));
        assert!(text.contains("Correct Answer: Paris"));
    }

    #[test]
    fn renders_countdown_and_error() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.render_countdown("4:59");
        presenter.render_error("Unable to load quiz questions.");

        let text = output(presenter);
        assert!(text.contains("Time Left: 4:59"));
        assert!(text.contains("Error: Unable to load quiz questions."));
    }

    #[test]
    fn browse_page_lists_numbered_questions() {
        let bank = QuestionBank::new(vec![QuestionGroup::new(
            "CO1",
            vec![QuestionRecord::new("Pick r", ["p", "r"], "r").with_number(QuestionNo::new(7))],
        )]);
        let mut browser = ReviewBrowser::new(bank, BrowseConfig::default());
        browser.select_option(0, 1).unwrap();
        let mut out = Vec::new();

        render_browse_page(&mut out, &browser).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("CO1 MCQ Questions"));
        assert!(text.contains("Q7 Pick r"));
        assert!(text.contains("  *B) r"));
        assert!(text.contains("Groups: CO1"));
    }
}
