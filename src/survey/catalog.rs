use crate::error::{QuestionId, SurveyBuildError};
use crate::survey::QuestionDefinition;
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The validated question list of a compiled survey.
///
/// Questions are kept sorted by ascending order, so positional queries are
/// binary searches over the sorted slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionCatalog {
    questions: Vec<QuestionDefinition>,
    index: AHashMap<QuestionId, usize>,
}

impl QuestionCatalog {
    /// Builds the catalog, rejecting duplicate ids and duplicate orders.
    pub fn from_questions(
        mut questions: Vec<QuestionDefinition>,
    ) -> Result<Self, SurveyBuildError> {
        questions.sort_by_key(|q| q.order);
        if let Some((first, second)) = questions
            .iter()
            .tuple_windows()
            .find(|(a, b)| a.order == b.order)
        {
            return Err(SurveyBuildError::DuplicateOrder {
                first: first.id.clone(),
                second: second.id.clone(),
                order: first.order,
            });
        }

        let mut index = AHashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            if index.insert(question.id.clone(), position).is_some() {
                return Err(SurveyBuildError::DuplicateQuestionId {
                    question_id: question.id.clone(),
                });
            }
        }

        Ok(Self { questions, index })
    }

    pub fn get(&self, question_id: &str) -> Option<&QuestionDefinition> {
        self.index.get(question_id).map(|&i| &self.questions[i])
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.index.contains_key(question_id)
    }

    pub fn order_of(&self, question_id: &str) -> Option<u32> {
        self.get(question_id).map(|q| q.order)
    }

    /// The question with the lowest order, hidden or not.
    pub fn first(&self) -> Option<&QuestionDefinition> {
        self.questions.first()
    }

    /// All questions in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, QuestionDefinition> {
        self.questions.iter()
    }

    /// Questions whose order is `order` or later, ascending.
    pub fn at_or_after(&self, order: u32) -> impl Iterator<Item = &QuestionDefinition> {
        let start = self.questions.partition_point(|q| q.order < order);
        self.questions[start..].iter()
    }

    /// Questions strictly after `order`, ascending.
    pub fn after(&self, order: u32) -> impl Iterator<Item = &QuestionDefinition> {
        let start = self.questions.partition_point(|q| q.order <= order);
        self.questions[start..].iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
