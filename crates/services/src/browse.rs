//! Untimed review of one question group at a time.

use std::collections::{HashMap, HashSet};
use std::fmt;

use quiz_core::BrowseConfig;
use quiz_core::model::{QuestionBank, QuestionNo, QuestionRecord, option_letter};
use storage::BankSource;

use crate::error::SessionError;

/// Correct answer shown after a reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealedAnswer {
    pub letter: char,
    pub text: String,
}

impl fmt::Display for RevealedAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Option {}: {}", self.letter, self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum QuestionKey {
    Number(QuestionNo),
    Position(usize),
}

pub struct ReviewBrowser {
    bank: QuestionBank,
    config: BrowseConfig,
    current: String,
    selections: HashMap<(String, QuestionKey), usize>,
    revealed: HashSet<usize>,
}

impl ReviewBrowser {
    #[must_use]
    pub fn new(bank: QuestionBank, config: BrowseConfig) -> Self {
        let current = config.initial_group().to_owned();
        Self {
            bank,
            config,
            current,
            selections: HashMap::new(),
            revealed: HashSet::new(),
        }
    }

    /// Load the bank once and open the initial group.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Load` if the bank cannot be loaded.
    pub async fn open(source: &dyn BankSource, config: BrowseConfig) -> Result<Self, SessionError> {
        log::info!("loading review bank from {}", source.describe());
        let bank = source.load_bank().await.map_err(|err| {
            log::error!("error loading MCQs: {err}");
            SessionError::from(err)
        })?;
        Ok(Self::new(bank, config))
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.bank.keys()
    }

    #[must_use]
    pub fn current_group(&self) -> &str {
        &self.current
    }

    /// Switch groups. Reveals reset; selections are kept per group.
    pub fn select_group(&mut self, key: impl Into<String>) {
        self.current = key.into();
        self.revealed.clear();
        log::debug!("browsing group {}", self.current);
    }

    /// Questions across every group.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.bank.total_questions()
    }

    /// Questions in the current group, before the page limit.
    #[must_use]
    pub fn available(&self) -> usize {
        self.group_questions().len()
    }

    /// The page of questions shown for the current group.
    #[must_use]
    pub fn visible(&self) -> &[QuestionRecord] {
        let questions = self.group_questions();
        &questions[..questions.len().min(self.config.max_questions())]
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("{} MCQ Questions", self.current)
    }

    #[must_use]
    pub fn count_line(&self) -> String {
        format!(
            "Displaying {} of {} available questions",
            self.visible().len(),
            self.available()
        )
    }

    /// Record a choice for the visible question at `index`. Last choice wins.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::PositionOutOfRange` if `index` is not visible.
    pub fn select_option(&mut self, index: usize, option: usize) -> Result<Option<usize>, SessionError> {
        let key = self.key_for(index)?;
        Ok(self.selections.insert((self.current.clone(), key), option))
    }

    #[must_use]
    pub fn selection_for(&self, index: usize) -> Option<usize> {
        let key = self.key_for(index).ok()?;
        self.selections.get(&(self.current.clone(), key)).copied()
    }

    /// Reveal the correct answer for the visible question at `index`.
    ///
    /// Returns `Ok(None)` when the record's answer does not match any option.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::PositionOutOfRange` if `index` is not visible.
    pub fn reveal(&mut self, index: usize) -> Result<Option<RevealedAnswer>, SessionError> {
        let question = self.visible_question(index)?;
        let rule = self.config.answer_rule();
        let answer = question.correct_index(rule).and_then(|i| {
            let text = question.option_text(i)?;
            Some(RevealedAnswer {
                letter: option_letter(i)?,
                text: text.to_owned(),
            })
        });
        if answer.is_none() {
            log::warn!("question {index} in {} has no matching answer", self.current);
        }
        self.revealed.insert(index);
        Ok(answer)
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    fn group_questions(&self) -> &[QuestionRecord] {
        self.bank
            .group(&self.current)
            .map(|g| g.questions())
            .unwrap_or_default()
    }

    fn visible_question(&self, index: usize) -> Result<&QuestionRecord, SessionError> {
        let visible = self.visible();
        visible.get(index).ok_or(SessionError::PositionOutOfRange {
            position: index,
            len: visible.len(),
        })
    }

    fn key_for(&self, index: usize) -> Result<QuestionKey, SessionError> {
        let question = self.visible_question(index)?;
        Ok(question
            .number()
            .map_or(QuestionKey::Position(index), QuestionKey::Number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerRule, QuestionGroup};

    fn numbered(no: u32, answer: &str) -> QuestionRecord {
        QuestionRecord::new(format!("Q{no}"), ["p", "q", "r", "s"], answer)
            .with_number(QuestionNo::new(no))
    }

    fn bank() -> QuestionBank {
        QuestionBank::new(vec![
            QuestionGroup::new("CO1", (1..=60).map(|n| numbered(n, "r")).collect()),
            QuestionGroup::new("CO2", vec![numbered(1, "s"), numbered(2, "missing")]),
        ])
    }

    #[test]
    fn shows_first_page_of_initial_group() {
        let browser = ReviewBrowser::new(bank(), BrowseConfig::default());

        assert_eq!(browser.current_group(), "CO1");
        assert_eq!(browser.visible().len(), 50);
        assert_eq!(browser.total_questions(), 62);
        assert_eq!(browser.title(), "CO1 MCQ Questions");
        assert_eq!(browser.count_line(), "Displaying 50 of 60 available questions");
        assert_eq!(browser.groups().collect::<Vec<_>>(), vec!["CO1", "CO2"]);
    }

    #[test]
    fn unknown_group_is_empty() {
        let mut browser = ReviewBrowser::new(bank(), BrowseConfig::default());
        browser.select_group("CO9");

        assert!(browser.visible().is_empty());
        assert_eq!(browser.count_line(), "Displaying 0 of 0 available questions");
        assert!(browser.reveal(0).is_err());
    }

    #[test]
    fn reveal_uses_option_text() {
        let mut browser = ReviewBrowser::new(bank(), BrowseConfig::default());

        let answer = browser.reveal(0).unwrap().unwrap();

        assert_eq!(answer.to_string(), "Option C: r");
        assert!(browser.is_revealed(0));
        assert!(!browser.is_revealed(1));
    }

    #[test]
    fn reveal_without_match_returns_none() {
        let mut browser = ReviewBrowser::new(bank(), BrowseConfig::default());
        browser.select_group("CO2");

        assert_eq!(browser.reveal(1).unwrap(), None);
        assert!(browser.is_revealed(1));
    }

    #[test]
    fn letter_rule_can_be_configured() {
        let bank = QuestionBank::new(vec![QuestionGroup::new(
            "CO1",
            vec![QuestionRecord::new("q", ["x", "y"], "B")],
        )]);
        let config = BrowseConfig::default().with_answer_rule(AnswerRule::Letter);
        let mut browser = ReviewBrowser::new(bank, config);

        assert_eq!(browser.reveal(0).unwrap().unwrap().to_string(), "Option B: y");
    }

    #[test]
    fn selections_survive_group_switch_but_reveals_do_not() {
        let mut browser = ReviewBrowser::new(bank(), BrowseConfig::default());
        browser.select_option(0, 1).unwrap();
        assert_eq!(browser.select_option(0, 2).unwrap(), Some(1));
        browser.reveal(0).unwrap();

        browser.select_group("CO2");
        assert_eq!(browser.selection_for(0), None);

        browser.select_group("CO1");
        assert_eq!(browser.selection_for(0), Some(2));
        assert!(!browser.is_revealed(0));
    }

    #[test]
    fn selection_outside_page_is_rejected() {
        let mut browser = ReviewBrowser::new(bank(), BrowseConfig::default());
        let err = browser.select_option(55, 0).unwrap_err();
        assert!(matches!(err, SessionError::PositionOutOfRange { position: 55, len: 50 }));
    }

    #[test]
    fn unnumbered_questions_are_keyed_by_position() {
        let bank = QuestionBank::new(vec![
            QuestionGroup::new(
                "CO1",
                vec![
                    QuestionRecord::new("first", ["x", "y"], "x"),
                    QuestionRecord::new("second", ["x", "y"], "y"),
                ],
            ),
            QuestionGroup::new("CO2", vec![QuestionRecord::new("other", ["x", "y"], "y")]),
        ]);
        let mut browser = ReviewBrowser::new(bank, BrowseConfig::default());

        browser.select_option(1, 0).unwrap();
        assert_eq!(browser.selection_for(0), None);
        assert_eq!(browser.selection_for(1), Some(0));

        browser.select_group("CO2");
        assert_eq!(browser.selection_for(0), None);
        browser.select_option(0, 1).unwrap();

        browser.select_group("CO1");
        assert_eq!(browser.selection_for(0), None);
        assert_eq!(browser.selection_for(1), Some(0));
    }
}
