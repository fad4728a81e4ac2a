use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{AnswerRule, QuestionBank, QuestionRecord, ScoreReport, Selections, SubmitReason};
use quiz_core::time::fixed_clock;
use quiz_core::{BrowseConfig, QuizConfig, ShuffleMode};
use services::{QuizEvent, QuizPresenter, QuizService, ReviewBrowser, SessionError};
use storage::{BankError, BankSource, InMemoryBankSource};
use tokio::sync::mpsc;

const QUIZ_BANK: &str = r#"{
    "set1": [
        {"question": "Capital of France?", "options": ["Berlin", "Paris", "Rome", "Madrid"], "answer": "b"},
        {"question": "Placeholder", "options": [], "answer": "a"}
    ],
    "set2": [
        {"question": "2 + 2?", "options": ["3", "4", "5", "22"], "answer": "B"}
    ]
}"#;

struct FailingSource;

#[async_trait]
impl BankSource for FailingSource {
    async fn load_bank(&self) -> Result<QuestionBank, BankError> {
        Err(BankError::Io(std::io::Error::other("offline")))
    }

    fn describe(&self) -> String {
        "failing source".into()
    }
}

#[derive(Default)]
struct Screen {
    questions: Vec<String>,
    countdowns: usize,
    reports: Vec<ScoreReport>,
    errors: Vec<String>,
}

impl QuizPresenter for Screen {
    fn render_questions(&mut self, questions: &[QuestionRecord], selections: &Selections) {
        assert!(selections.is_empty());
        self.questions = questions.iter().map(|q| q.prompt().to_owned()).collect();
    }

    fn render_countdown(&mut self, _remaining: &str) {
        self.countdowns += 1;
    }

    fn render_report(&mut self, report: &ScoreReport) {
        self.reports.push(report.clone());
    }

    fn render_error(&mut self, message: &str) {
        self.errors.push(message.to_owned());
    }
}

fn service(source: Arc<dyn BankSource>) -> QuizService {
    let config = QuizConfig::default().with_shuffle(ShuffleMode::Preserve);
    QuizService::new(source, config).with_clock(fixed_clock())
}

#[tokio::test(start_paused = true)]
async fn launch_runs_quiz_to_manual_submit() {
    let source = Arc::new(InMemoryBankSource::from_json(QUIZ_BANK).unwrap());
    let mut screen = Screen::default();
    let (tx, mut rx) = mpsc::channel(8);
    tx.send(QuizEvent::Select { position: 0, option: 1 }).await.unwrap();
    tx.send(QuizEvent::Select { position: 1, option: 2 }).await.unwrap();
    tx.send(QuizEvent::Submit).await.unwrap();

    let report = service(source).launch(&mut screen, &mut rx).await.unwrap();

    assert_eq!(screen.questions, vec!["Capital of France?", "2 + 2?"]);
    assert_eq!(report.score_line(), "Score: 1 / 2");
    assert_eq!(report.reason(), SubmitReason::Manual);
    let miss = &report.misses()[0];
    assert_eq!(miss.prompt, "2 + 2?");
    assert_eq!(miss.user_answer_text(), "5");
    assert_eq!(miss.correct_answer_text(), "4");
    assert_eq!(screen.reports.len(), 1);
    assert!(screen.errors.is_empty());
}

#[tokio::test(start_paused = true)]
async fn launch_times_out_without_input() {
    let source = Arc::new(InMemoryBankSource::from_json(QUIZ_BANK).unwrap());
    let config = QuizConfig::new(20, 2).unwrap();
    let service = QuizService::new(source, config).with_clock(fixed_clock());
    let mut screen = Screen::default();
    let (_tx, mut rx) = mpsc::channel(1);

    let report = service.launch(&mut screen, &mut rx).await.unwrap();

    assert_eq!(report.reason(), SubmitReason::TimedOut);
    assert_eq!(report.correct(), 0);
    assert_eq!(report.misses().len(), 2);
    assert_eq!(screen.countdowns, 3);
}

#[tokio::test]
async fn load_failure_renders_error() {
    let mut screen = Screen::default();
    let (_tx, mut rx) = mpsc::channel(1);

    let err = service(Arc::new(FailingSource))
        .launch(&mut screen, &mut rx)
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Load(_)));
    assert_eq!(screen.errors, vec!["Unable to load quiz questions."]);
    assert!(screen.questions.is_empty());
    assert!(screen.reports.is_empty());
}

#[tokio::test]
async fn empty_bank_renders_no_questions_error() {
    let source = Arc::new(
        InMemoryBankSource::from_json(r#"{"set1": [{"question": "q", "options": []}]}"#).unwrap(),
    );
    let mut screen = Screen::default();
    let (_tx, mut rx) = mpsc::channel(1);

    let err = service(source).launch(&mut screen, &mut rx).await.unwrap_err();

    assert!(matches!(err, SessionError::Empty));
    assert_eq!(
        screen.errors,
        vec!["No questions with options available for the quiz."]
    );
}

#[tokio::test]
async fn browser_opens_review_bank() {
    let source = InMemoryBankSource::from_json(
        r#"{"CO1": [{"qno": 1, "question": "Pick r", "options": ["p", "q", "r", "s"], "answer": "r"}]}"#,
    )
    .unwrap();

    let mut browser = ReviewBrowser::open(&source, BrowseConfig::default()).await.unwrap();

    assert_eq!(browser.count_line(), "Displaying 1 of 1 available questions");
    assert_eq!(browser.reveal(0).unwrap().unwrap().to_string(), "Option C: r");
}

#[tokio::test]
async fn browser_open_propagates_load_failure() {
    let config = BrowseConfig::default().with_answer_rule(AnswerRule::OptionText);

    let result = ReviewBrowser::open(&FailingSource, config).await;

    assert!(matches!(result, Err(SessionError::Load(_))));
}
