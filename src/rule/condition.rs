use crate::answer::AnswerValue;
use crate::error::QuestionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The comparison applied to one question's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    IsAnswered,
    IsNotAnswered,
    /// Catch-all for operator names this engine does not know, so newer
    /// authoring tools cannot make a survey unparseable. A condition with
    /// this operator never holds.
    #[serde(other)]
    Unknown,
}

impl ConditionOperator {
    /// Whether the operator compares against a literal. The answered checks
    /// only inspect presence and take no comparison value.
    pub fn requires_value(&self) -> bool {
        !matches!(
            self,
            ConditionOperator::IsAnswered
                | ConditionOperator::IsNotAnswered
                | ConditionOperator::Unknown
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOperator::Equals => "EQUALS",
            ConditionOperator::NotEquals => "NOT_EQUALS",
            ConditionOperator::Contains => "CONTAINS",
            ConditionOperator::NotContains => "NOT_CONTAINS",
            ConditionOperator::GreaterThan => "GREATER_THAN",
            ConditionOperator::LessThan => "LESS_THAN",
            ConditionOperator::IsAnswered => "IS_ANSWERED",
            ConditionOperator::IsNotAnswered => "IS_NOT_ANSWERED",
            ConditionOperator::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single predicate over one question's answer.
///
/// Conditions may reference any question in the survey, not just the one the
/// rule is attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// The question whose answer is tested.
    #[serde(alias = "questionId")]
    pub question_id: QuestionId,
    pub operator: ConditionOperator,
    /// The comparison literal. `None` for the answered checks.
    #[serde(default)]
    pub value: Option<AnswerValue>,
}

impl Condition {
    pub fn new(
        question_id: impl Into<QuestionId>,
        operator: ConditionOperator,
        value: Option<AnswerValue>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            operator,
            value,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${} {}", self.question_id, self.operator)?;
        if let Some(value) = &self.value {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}
