//! Pure condition evaluation.
//!
//! Everything in this module is a total function over the answer store:
//! malformed conditions, type mismatches and unparseable numbers all
//! evaluate to `false` rather than erroring, so one bad rule can never
//! take a live session down.

use crate::answer::{AnswerStore, AnswerValue};
use crate::rule::{Condition, ConditionOperator, LogicRule};
use crate::trace::ConditionTrace;
use std::cmp::Ordering;

/// Evaluates a single condition against the current answers.
///
/// An unanswered question satisfies only `IS_NOT_ANSWERED`; every
/// comparison on it is `false`, including the negated ones.
pub fn evaluate_condition(condition: &Condition, answers: &AnswerStore) -> bool {
    let answer = answers
        .get(&condition.question_id)
        .filter(|value| value.is_answered());

    let Some(answer) = answer else {
        return matches!(condition.operator, ConditionOperator::IsNotAnswered);
    };

    match condition.operator {
        ConditionOperator::IsAnswered => true,
        ConditionOperator::IsNotAnswered => false,
        ConditionOperator::Unknown => false,
        ConditionOperator::Equals => {
            with_value(condition, |literal| equals_matches(answer, literal))
        }
        ConditionOperator::NotEquals => {
            with_value(condition, |literal| !equals_matches(answer, literal))
        }
        ConditionOperator::Contains => {
            with_value(condition, |literal| contains_matches(answer, literal))
        }
        ConditionOperator::NotContains => {
            with_value(condition, |literal| !contains_matches(answer, literal))
        }
        ConditionOperator::GreaterThan => with_value(condition, |literal| {
            numeric_ordering(answer, literal) == Some(Ordering::Greater)
        }),
        ConditionOperator::LessThan => with_value(condition, |literal| {
            numeric_ordering(answer, literal) == Some(Ordering::Less)
        }),
    }
}

/// Evaluates a whole rule: `true` only if it has conditions and every one
/// of them holds.
pub fn evaluate_rule(rule: &LogicRule, answers: &AnswerStore) -> bool {
    !rule.conditions.is_empty()
        && rule
            .conditions
            .iter()
            .all(|condition| evaluate_condition(condition, answers))
}

/// Like [`evaluate_condition`], but also captures the answer that was
/// observed, for explain-style output.
pub fn trace_condition(condition: &Condition, answers: &AnswerStore) -> ConditionTrace {
    ConditionTrace {
        condition: condition.clone(),
        observed: answers.get(&condition.question_id).cloned(),
        satisfied: evaluate_condition(condition, answers),
    }
}

fn with_value(condition: &Condition, check: impl FnOnce(&AnswerValue) -> bool) -> bool {
    // A value-requiring operator without a value fails the condition, it
    // does not fail the session.
    condition.value.as_ref().map(check).unwrap_or(false)
}

/// Strict equality, with one widening: a multi-select answer equals a
/// scalar literal when any selected option matches it.
fn equals_matches(answer: &AnswerValue, literal: &AnswerValue) -> bool {
    match (answer, literal) {
        (AnswerValue::Multi(_), AnswerValue::Multi(_)) => answer == literal,
        (AnswerValue::Multi(selected), scalar) => scalar
            .as_match_text()
            .is_some_and(|text| selected.iter().any(|item| item == text.as_ref())),
        _ => answer == literal,
    }
}

/// Membership for multi-select answers, substring for text answers.
/// Other answer shapes have nothing to contain.
fn contains_matches(answer: &AnswerValue, literal: &AnswerValue) -> bool {
    match answer {
        AnswerValue::Multi(selected) => literal
            .as_match_text()
            .is_some_and(|text| selected.iter().any(|item| item == text.as_ref())),
        AnswerValue::Text(text) => literal
            .as_match_text()
            .is_some_and(|needle| text.contains(needle.as_ref())),
        _ => false,
    }
}

/// Orders answer against literal numerically, coercing numeric text.
/// `None` when either side is not a number, which fails the condition.
fn numeric_ordering(answer: &AnswerValue, literal: &AnswerValue) -> Option<Ordering> {
    let lhs = answer.as_number()?;
    let rhs = literal.as_number()?;
    lhs.partial_cmp(&rhs)
}
