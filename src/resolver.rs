use crate::answer::AnswerStore;
use crate::evaluator::{evaluate_rule, trace_condition};
use crate::rule::{LogicRule, NavigationAction};
use crate::survey::CompiledSurvey;
use crate::trace::{ConditionTrace, ResolutionTrace, RuleTrace, RuleVerdict};

/// Picks the winning rule for a source question.
///
/// Rules are scanned in the order the compiler stored them, oldest
/// `created_at` first with the rule id breaking exact ties, and the first
/// fully satisfied rule wins. The scan never mutates anything: resolving
/// the same question against the same answers always yields the same
/// action, no matter how often it runs.
pub struct RuleResolver<'a> {
    survey: &'a CompiledSurvey,
}

impl<'a> RuleResolver<'a> {
    pub fn new(survey: &'a CompiledSurvey) -> Self {
        Self { survey }
    }

    /// Resolves the action for a source question, or `None` for the default
    /// advance. Rules the compiler disqualified are passed over without
    /// evaluation.
    pub fn resolve(
        &self,
        source_question_id: &str,
        answers: &AnswerStore,
    ) -> Option<&'a NavigationAction> {
        self.survey
            .rules_for(source_question_id)
            .iter()
            .filter(|rule| !self.survey.is_disqualified(&rule.id))
            .find(|rule| evaluate_rule(rule, answers))
            .map(|rule| &rule.action)
    }

    /// Like [`resolve`](Self::resolve), but records how every attached rule
    /// fared. Rules after the winner are reported as not evaluated.
    pub fn resolve_traced(
        &self,
        source_question_id: &str,
        answers: &AnswerStore,
    ) -> ResolutionTrace {
        let mut rules = Vec::new();
        let mut selected = None;

        for rule in self.survey.rules_for(source_question_id) {
            let trace = if selected.is_some() {
                Self::rule_trace(rule, RuleVerdict::NotEvaluated, Vec::new())
            } else if self.survey.is_disqualified(&rule.id) {
                Self::rule_trace(rule, RuleVerdict::Disqualified, Vec::new())
            } else {
                let (verdict, conditions) = Self::evaluate_traced(rule, answers);
                if matches!(verdict, RuleVerdict::Matched) {
                    selected = Some(rules.len());
                }
                Self::rule_trace(rule, verdict, conditions)
            };
            rules.push(trace);
        }

        ResolutionTrace::new(source_question_id.to_string(), rules, selected)
    }

    fn evaluate_traced(
        rule: &LogicRule,
        answers: &AnswerStore,
    ) -> (RuleVerdict, Vec<ConditionTrace>) {
        if rule.conditions.is_empty() {
            return (RuleVerdict::Disqualified, Vec::new());
        }

        let mut conditions = Vec::new();
        for (index, condition) in rule.conditions.iter().enumerate() {
            let trace = trace_condition(condition, answers);
            let satisfied = trace.satisfied;
            conditions.push(trace);
            if !satisfied {
                return (RuleVerdict::ConditionFailed { index }, conditions);
            }
        }
        (RuleVerdict::Matched, conditions)
    }

    fn rule_trace(
        rule: &LogicRule,
        verdict: RuleVerdict,
        conditions: Vec<ConditionTrace>,
    ) -> RuleTrace {
        RuleTrace {
            rule_id: rule.id.clone(),
            action: rule.action.clone(),
            created_at: rule.created_at,
            verdict,
            conditions,
        }
    }
}
