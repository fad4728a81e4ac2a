use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::question::QuestionRecord;

/// Questions sharing one group key (e.g. a course-outcome tag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionGroup {
    key: String,
    questions: Vec<QuestionRecord>,
}

impl QuestionGroup {
    #[must_use]
    pub fn new(key: impl Into<String>, questions: Vec<QuestionRecord>) -> Self {
        Self {
            key: key.into(),
            questions,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }
}

/// The full question bank, groups kept in document order.
///
/// Serialized as a JSON object of `group-key → [record]`. A repeated key
/// replaces the earlier group's questions but keeps its position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionBank {
    groups: Vec<QuestionGroup>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(groups: Vec<QuestionGroup>) -> Self {
        let mut bank = Self::default();
        for group in groups {
            bank.insert(group);
        }
        bank
    }

    fn insert(&mut self, group: QuestionGroup) {
        match self.groups.iter_mut().find(|g| g.key == group.key) {
            Some(existing) => existing.questions = group.questions,
            None => self.groups.push(group),
        }
    }

    #[must_use]
    pub fn groups(&self) -> &[QuestionGroup] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, key: &str) -> Option<&QuestionGroup> {
        self.groups.iter().find(|g| g.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(QuestionGroup::key)
    }

    /// Records across all groups, groups in key order, records in group order.
    pub fn records(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.groups.iter().flat_map(|g| g.questions.iter())
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.groups.iter().map(|g| g.questions.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_questions() == 0
    }
}

impl Serialize for QuestionBank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.key, &group.questions)?;
        }
        map.end()
    }
}

struct BankVisitor;

impl<'de> Visitor<'de> for BankVisitor {
    type Value = QuestionBank;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of group keys to question arrays")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut bank = QuestionBank::default();
        while let Some((key, questions)) = access.next_entry::<String, Vec<QuestionRecord>>()? {
            bank.insert(QuestionGroup::new(key, questions));
        }
        Ok(bank)
    }
}

impl<'de> Deserialize<'de> for QuestionBank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BankVisitor)
    }
}
