use crate::error::RuleViolation;
use crate::rule::{ConditionOperator, LogicRule};
use crate::survey::QuestionCatalog;

/// Checks one rule against the catalog and returns every violation found.
///
/// Checks are exhaustive rather than fail-fast, so authors see the full list
/// in one pass instead of fixing defects one compile at a time. The authoring
/// layer can call this on a single rule before persisting it; compilation
/// runs the same checks across the whole rule set.
pub fn validate_rule(rule: &LogicRule, catalog: &QuestionCatalog) -> Vec<RuleViolation> {
    let mut violations = Vec::new();

    if rule.conditions.is_empty() {
        violations.push(RuleViolation::EmptyConditions {
            rule_id: rule.id.clone(),
        });
    }

    let source_order = catalog.order_of(&rule.source_question_id);
    if source_order.is_none() {
        violations.push(RuleViolation::UnknownSourceQuestion {
            rule_id: rule.id.clone(),
            question_id: rule.source_question_id.clone(),
        });
    }

    for condition in &rule.conditions {
        if !catalog.contains(&condition.question_id) {
            violations.push(RuleViolation::UnknownConditionQuestion {
                rule_id: rule.id.clone(),
                question_id: condition.question_id.clone(),
            });
        }
        if condition.operator == ConditionOperator::Unknown {
            violations.push(RuleViolation::UnknownOperator {
                rule_id: rule.id.clone(),
                question_id: condition.question_id.clone(),
            });
        }
        if condition.operator.requires_value() && condition.value.is_none() {
            violations.push(RuleViolation::MissingComparisonValue {
                rule_id: rule.id.clone(),
                question_id: condition.question_id.clone(),
                operator: condition.operator,
            });
        }
    }

    if let Some(target) = rule.action.target() {
        match catalog.order_of(target) {
            None => violations.push(RuleViolation::UnknownTargetQuestion {
                rule_id: rule.id.clone(),
                question_id: target.clone(),
            }),
            Some(target_order) => {
                // Surveys only move forward, so a target at or before the
                // source can never be reached the way the author intended.
                if let Some(source_order) = source_order {
                    if target_order <= source_order {
                        violations.push(RuleViolation::BackwardTarget {
                            rule_id: rule.id.clone(),
                            target_id: target.clone(),
                            source_order,
                            target_order,
                        });
                    }
                }
            }
        }
    }

    violations
}
