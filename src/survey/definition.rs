use crate::error::QuestionId;
use crate::rule::LogicRule;
use serde::{Deserialize, Serialize};

/// The complete, canonical definition of a survey, ready for compilation.
/// This is the target structure for any custom data model conversion.
#[derive(Debug, Clone, Default)]
pub struct SurveyDefinition {
    pub questions: Vec<QuestionDefinition>,
    pub rules: Vec<LogicRule>,
}

/// A single question, reduced to what navigation needs: identity, position,
/// and default visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    pub id: QuestionId,
    /// Position in the questionnaire. Orders must be unique within a survey
    /// but need not be contiguous.
    pub order: u32,
    /// Hidden questions are passed over by navigation until a SHOW_QUESTION
    /// action reveals them.
    #[serde(default)]
    pub hidden: bool,
}
