use crate::error::{QuestionId, RuleId};
use crate::rule::{Condition, NavigationAction};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared intent of a rule. Advisory metadata for authoring tools;
/// resolution treats every rule identically regardless of kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    #[default]
    SkipLogic,
    Branching,
    DisplayLogic,
}

/// A declarative navigation rule attached to a source question.
///
/// When the respondent answers the source question and every condition holds,
/// the rule's action fires. Conditions are conjunctive; there is no OR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicRule {
    pub id: RuleId,
    /// The question whose submission triggers evaluation of this rule.
    #[serde(alias = "sourceQuestionId")]
    pub source_question_id: QuestionId,
    #[serde(default, alias = "type")]
    pub kind: RuleKind,
    /// All conditions must hold for the rule to match.
    pub conditions: Vec<Condition>,
    pub action: NavigationAction,
    /// Authoring timestamp in unix milliseconds. Older rules win ties.
    #[serde(alias = "createdAt")]
    pub created_at: i64,
}

impl fmt::Display for LogicRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            write!(f, "IF <nothing> THEN {}", self.action)
        } else {
            write!(
                f,
                "IF {} THEN {}",
                self.conditions.iter().join(" AND "),
                self.action
            )
        }
    }
}
