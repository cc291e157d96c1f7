use crate::rule::ConditionOperator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a question, as issued by the external question catalog.
pub type QuestionId = String;

/// Identifier of a logic rule, as issued by the external rule store.
pub type RuleId = String;

/// Errors that can occur while compiling a survey definition into a snapshot.
#[derive(Error, Debug, Clone)]
pub enum SurveyBuildError {
    #[error("Question '{question_id}' appears more than once in the survey")]
    DuplicateQuestionId { question_id: QuestionId },

    #[error(
        "Questions '{first}' and '{second}' both have order {order}; orders must be unique within a survey"
    )]
    DuplicateOrder {
        first: QuestionId,
        second: QuestionId,
        order: u32,
    },

    #[error(
        "Strict validation found {} rule violation(s); first: {}",
        violations.len(),
        violations[0]
    )]
    InvalidRules { violations: Vec<RuleViolation> },
}

/// A single defect found in a logic rule at authoring time.
///
/// Violations are collected, never raised: lenient compilation keeps the
/// survey and records each violation as a warning, while strict compilation
/// bundles them into [`SurveyBuildError::InvalidRules`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleViolation {
    #[error("Rule '{rule_id}' has an empty condition list")]
    EmptyConditions { rule_id: RuleId },

    #[error("Rule '{rule_id}' is attached to unknown question '{question_id}'")]
    UnknownSourceQuestion {
        rule_id: RuleId,
        question_id: QuestionId,
    },

    #[error("Rule '{rule_id}' tests the answer of unknown question '{question_id}'")]
    UnknownConditionQuestion {
        rule_id: RuleId,
        question_id: QuestionId,
    },

    #[error("Rule '{rule_id}' targets unknown question '{question_id}'")]
    UnknownTargetQuestion {
        rule_id: RuleId,
        question_id: QuestionId,
    },

    #[error(
        "Rule '{rule_id}' targets '{target_id}' (order {target_order}), which does not come after its source question (order {source_order})"
    )]
    BackwardTarget {
        rule_id: RuleId,
        target_id: QuestionId,
        source_order: u32,
        target_order: u32,
    },

    #[error(
        "Rule '{rule_id}' uses {operator} on question '{question_id}' without a comparison value"
    )]
    MissingComparisonValue {
        rule_id: RuleId,
        question_id: QuestionId,
        operator: ConditionOperator,
    },

    #[error(
        "Rule '{rule_id}' uses an operator this engine does not recognize on question '{question_id}'"
    )]
    UnknownOperator {
        rule_id: RuleId,
        question_id: QuestionId,
    },
}

impl RuleViolation {
    /// Whether this violation prevents the rule from ever matching during
    /// resolution. Violations that return `false` here are handled later:
    /// a missing comparison value fails its condition, and a backward target
    /// is rerouted to a default advance by the navigator.
    pub fn disqualifies(&self) -> bool {
        match self {
            RuleViolation::EmptyConditions { .. }
            | RuleViolation::UnknownSourceQuestion { .. }
            | RuleViolation::UnknownConditionQuestion { .. }
            | RuleViolation::UnknownTargetQuestion { .. } => true,
            RuleViolation::BackwardTarget { .. }
            | RuleViolation::MissingComparisonValue { .. }
            | RuleViolation::UnknownOperator { .. } => false,
        }
    }

    /// The rule the violation was found in.
    pub fn rule_id(&self) -> &str {
        match self {
            RuleViolation::EmptyConditions { rule_id }
            | RuleViolation::UnknownSourceQuestion { rule_id, .. }
            | RuleViolation::UnknownConditionQuestion { rule_id, .. }
            | RuleViolation::UnknownTargetQuestion { rule_id, .. }
            | RuleViolation::BackwardTarget { rule_id, .. }
            | RuleViolation::MissingComparisonValue { rule_id, .. }
            | RuleViolation::UnknownOperator { rule_id, .. } => rule_id,
        }
    }
}

/// Errors raised when a caller violates the navigation contract.
///
/// These are rejected operations, not evaluation faults. Rule and data
/// problems never surface here; they degrade to a default advance instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("The survey session is already terminated")]
    AlreadyTerminated,

    #[error("Answer submitted for question '{submitted}', but the current question is '{current}'")]
    NotCurrentQuestion {
        submitted: QuestionId,
        current: QuestionId,
    },

    #[error("Question '{question_id}' is not part of the compiled survey")]
    UnknownQuestion { question_id: QuestionId },
}

/// Errors that can occur when converting a custom authoring format into a
/// [`SurveyDefinition`](crate::survey::SurveyDefinition).
#[derive(Error, Debug, Clone)]
pub enum SurveyConversionError {
    #[error("Invalid survey data: {0}")]
    ValidationError(String),

    #[error("Action '{action}' requires a target question id, but none was provided")]
    MissingTarget { action: String },
}

/// Errors that can occur while encoding or decoding snapshots.
#[derive(Error, Debug, Clone)]
pub enum SnapshotError {
    #[error("Snapshot serialization failed: {0}")]
    Encode(String),

    #[error("Snapshot deserialization failed: {0}")]
    Decode(String),

    #[error("Could not access snapshot file '{path}': {message}")]
    Io { path: String, message: String },
}
