use crate::answer::AnswerValue;
use crate::error::QuestionId;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;

/// The answers collected so far in a survey session, keyed by question id.
///
/// Matches the expected JSON format for replay: a flat object mapping
/// question ids to answer values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    answers: AHashMap<QuestionId, AnswerValue>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an answer set from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let store = serde_json::from_str(&content)?;
        Ok(store)
    }

    /// Stores an answer, replacing any earlier answer to the same question.
    pub fn record(&mut self, question_id: impl Into<QuestionId>, value: impl Into<AnswerValue>) {
        self.answers.insert(question_id.into(), value.into());
    }

    /// Removes the answer to a question, returning it if one was stored.
    pub fn clear(&mut self, question_id: &str) -> Option<AnswerValue> {
        self.answers.remove(question_id)
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    /// Whether the question has a real answer. A stored `Null`, empty string
    /// or empty list counts the same as no entry at all.
    pub fn answered(&self, question_id: &str) -> bool {
        self.answers
            .get(question_id)
            .is_some_and(AnswerValue::is_answered)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerValue)> {
        self.answers.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerStore
where
    K: Into<QuestionId>,
    V: Into<AnswerValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let answers = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { answers }
    }
}
