use crate::answer::AnswerValue;
use crate::error::{QuestionId, RuleId};
use crate::rule::{Condition, NavigationAction};

/// The answer a condition saw and whether the condition held.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionTrace {
    pub condition: Condition,
    /// The stored answer at evaluation time, if any was stored at all.
    pub observed: Option<AnswerValue>,
    pub satisfied: bool,
}

/// How one rule fared during a resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleVerdict {
    /// Every condition held; this rule supplies the action.
    Matched,
    /// The condition at `index` was the first to fail.
    ConditionFailed { index: usize },
    /// Compilation flagged the rule as unable to ever fire.
    Disqualified,
    /// An earlier rule already matched, so this one was never looked at.
    NotEvaluated,
}

/// The record of one rule's evaluation, in tie-break position.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTrace {
    pub rule_id: RuleId,
    pub action: NavigationAction,
    pub created_at: i64,
    pub verdict: RuleVerdict,
    /// Traces for the conditions that were actually evaluated. Conditions
    /// after the first failure are skipped and have no entry.
    pub conditions: Vec<ConditionTrace>,
}

/// The complete record of resolving one source question against the
/// current answers.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionTrace {
    pub source_question_id: QuestionId,
    /// One entry per attached rule, oldest first.
    pub rules: Vec<RuleTrace>,
    selected: Option<usize>,
}

impl ResolutionTrace {
    pub(crate) fn new(
        source_question_id: QuestionId,
        rules: Vec<RuleTrace>,
        selected: Option<usize>,
    ) -> Self {
        Self {
            source_question_id,
            rules,
            selected,
        }
    }

    /// The action of the winning rule, if any rule matched.
    pub fn action(&self) -> Option<&NavigationAction> {
        self.selected.map(|i| &self.rules[i].action)
    }

    pub fn matched_rule_id(&self) -> Option<&str> {
        self.selected.map(|i| self.rules[i].rule_id.as_str())
    }

    pub fn is_match(&self) -> bool {
        self.selected.is_some()
    }
}
