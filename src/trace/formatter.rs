use crate::trace::{ConditionTrace, ResolutionTrace, RuleTrace, RuleVerdict};

/// Formats resolution traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format a full resolution trace into a multi-line report: one header
    /// line with the outcome, then one line per rule in tie-break order.
    pub fn format_trace(trace: &ResolutionTrace) -> String {
        let header = match trace.action() {
            Some(action) => format!(
                "'{}' resolved to {} via rule '{}'",
                trace.source_question_id,
                action,
                trace.matched_rule_id().unwrap_or("?"),
            ),
            None => format!(
                "'{}' resolved to the default advance (no rule matched)",
                trace.source_question_id
            ),
        };

        let mut lines = vec![header];
        for rule in &trace.rules {
            lines.push(format!("  {}", Self::format_rule(rule)));
        }
        lines.join("\n")
    }

    /// Format a single rule's verdict as one line.
    pub fn format_rule(rule: &RuleTrace) -> String {
        match &rule.verdict {
            RuleVerdict::Matched => format!(
                "[{}] matched: {} -> {}",
                rule.rule_id,
                Self::join_conditions(&rule.conditions),
                rule.action,
            ),
            RuleVerdict::ConditionFailed { index } => format!(
                "[{}] failed on condition {}: {}",
                rule.rule_id,
                index + 1,
                Self::join_conditions(&rule.conditions),
            ),
            RuleVerdict::Disqualified => {
                format!("[{}] disqualified at compile time", rule.rule_id)
            }
            RuleVerdict::NotEvaluated => format!("[{}] not evaluated", rule.rule_id),
        }
    }

    /// Format a condition together with the answer it observed.
    pub fn format_condition(trace: &ConditionTrace) -> String {
        let observed = match &trace.observed {
            Some(value) => format!("was {}", value),
            None => "unanswered".to_string(),
        };
        format!("{} ({})", trace.condition, observed)
    }

    fn join_conditions(conditions: &[ConditionTrace]) -> String {
        conditions
            .iter()
            .map(Self::format_condition)
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}
