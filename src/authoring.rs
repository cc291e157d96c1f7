//! The JSON shape survey builders export: camelCase keys, the flat
//! `{action, targetQuestionId}` action pair, and millisecond timestamps.
//! Converting it through [`IntoSurvey`] is where loose authoring data is
//! tightened into the canonical model.

use crate::answer::AnswerValue;
use crate::error::SurveyConversionError;
use crate::rule::{
    Condition, ConditionOperator, LogicActionData, LogicRule, NavigationAction, RuleKind,
};
use crate::survey::{IntoSurvey, QuestionDefinition, SurveyDefinition};
use serde::{Deserialize, Serialize};

/// A question as exported by the survey builder.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthoringQuestion {
    pub id: String,
    pub order: u32,
    #[serde(default)]
    pub hidden: bool,
}

/// One predicate of an authoring rule.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthoringCondition {
    #[serde(alias = "questionId")]
    pub question_id: String,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub value: Option<AnswerValue>,
}

/// A logic rule as exported by the survey builder.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthoringRule {
    pub id: String,
    #[serde(alias = "sourceQuestionId")]
    pub source_question_id: String,
    #[serde(default, alias = "type")]
    pub kind: RuleKind,
    #[serde(default)]
    pub conditions: Vec<AuthoringCondition>,
    pub action: LogicActionData,
    #[serde(alias = "createdAt")]
    pub created_at: i64,
}

/// The complete authoring payload: the question list plus the rule table.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthoringSurvey {
    pub questions: Vec<AuthoringQuestion>,
    #[serde(default)]
    pub rules: Vec<AuthoringRule>,
}

impl AuthoringSurvey {
    /// Parses an authoring export from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, SurveyConversionError> {
        serde_json::from_str(json).map_err(|e| {
            SurveyConversionError::ValidationError(format!("Failed to parse survey JSON: {}", e))
        })
    }
}

impl IntoSurvey for AuthoringSurvey {
    fn into_survey(self) -> Result<SurveyDefinition, SurveyConversionError> {
        let questions = self
            .questions
            .into_iter()
            .map(|question| QuestionDefinition {
                id: question.id,
                order: question.order,
                hidden: question.hidden,
            })
            .collect();

        let mut rules = Vec::with_capacity(self.rules.len());
        for rule in self.rules {
            let action = NavigationAction::try_from(rule.action)?;
            let conditions = rule
                .conditions
                .into_iter()
                .map(|condition| Condition {
                    question_id: condition.question_id,
                    operator: condition.operator,
                    value: condition.value,
                })
                .collect();
            rules.push(LogicRule {
                id: rule.id,
                source_question_id: rule.source_question_id,
                kind: rule.kind,
                conditions,
                action,
                created_at: rule.created_at,
            });
        }

        Ok(SurveyDefinition { questions, rules })
    }
}
