//! Common test utilities for building survey definitions and rules.
use bunki::prelude::*;
use std::path::PathBuf;

/// Creates a visible question at the given order.
#[allow(dead_code)]
pub fn question(id: &str, order: u32) -> QuestionDefinition {
    QuestionDefinition {
        id: id.to_string(),
        order,
        hidden: false,
    }
}

/// Creates a question that is hidden until a SHOW_QUESTION action reveals it.
#[allow(dead_code)]
pub fn hidden_question(id: &str, order: u32) -> QuestionDefinition {
    QuestionDefinition {
        id: id.to_string(),
        order,
        hidden: true,
    }
}

/// Shorthand for an EQUALS condition.
#[allow(dead_code)]
pub fn equals(question_id: &str, value: impl Into<AnswerValue>) -> Condition {
    Condition::new(question_id, ConditionOperator::Equals, Some(value.into()))
}

/// Shorthand for a GREATER_THAN condition.
#[allow(dead_code)]
pub fn greater_than(question_id: &str, value: f64) -> Condition {
    Condition::new(
        question_id,
        ConditionOperator::GreaterThan,
        Some(AnswerValue::Number(value)),
    )
}

/// Shorthand for an IS_ANSWERED condition.
#[allow(dead_code)]
pub fn answered(question_id: &str) -> Condition {
    Condition::new(question_id, ConditionOperator::IsAnswered, None)
}

/// A condition with an arbitrary operator and optional literal.
#[allow(dead_code)]
pub fn condition(
    question_id: &str,
    operator: ConditionOperator,
    value: Option<AnswerValue>,
) -> Condition {
    Condition::new(question_id, operator, value)
}

#[allow(dead_code)]
pub fn skip_to(target: &str) -> NavigationAction {
    NavigationAction::SkipToQuestion {
        target: target.to_string(),
    }
}

#[allow(dead_code)]
pub fn skip_to_end() -> NavigationAction {
    NavigationAction::SkipToEnd
}

#[allow(dead_code)]
pub fn show_question(target: &str) -> NavigationAction {
    NavigationAction::ShowQuestion {
        target: target.to_string(),
    }
}

#[allow(dead_code)]
pub fn hide_question(target: &str) -> NavigationAction {
    NavigationAction::HideQuestion {
        target: target.to_string(),
    }
}

/// Creates a SKIP_LOGIC rule with the given parts.
#[allow(dead_code)]
pub fn rule(
    id: &str,
    source: &str,
    conditions: Vec<Condition>,
    action: NavigationAction,
    created_at: i64,
) -> LogicRule {
    LogicRule {
        id: id.to_string(),
        source_question_id: source.to_string(),
        kind: RuleKind::SkipLogic,
        conditions,
        action,
        created_at,
    }
}

/// Compiles a survey leniently, panicking on catalog defects.
#[allow(dead_code)]
pub fn compile(questions: Vec<QuestionDefinition>, rules: Vec<LogicRule>) -> CompiledSurvey {
    SurveyCompiler::builder(SurveyDefinition { questions, rules })
        .build()
        .compile()
        .expect("Failed to compile survey")
}

/// Compiles a survey and wraps it in a navigator.
#[allow(dead_code)]
pub fn navigator(questions: Vec<QuestionDefinition>, rules: Vec<LogicRule>) -> Navigator {
    Navigator::new(compile(questions, rules))
}

/// A scratch directory for tests that write files.
#[allow(dead_code)]
pub fn setup_test_dir() -> PathBuf {
    std::env::temp_dir().join("bunki_tests")
}
