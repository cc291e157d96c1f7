use crate::error::QuestionId;
use crate::rule::NavigationAction;
use crate::survey::QuestionDefinition;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// The SHOW and HIDE decisions accumulated over a session.
///
/// Only the overrides are stored; a question without one falls back to its
/// catalog default. When the same question is shown and hidden repeatedly,
/// the most recent action wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisibilityTracker {
    overrides: AHashMap<QuestionId, bool>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, question_id: impl Into<QuestionId>) {
        self.overrides.insert(question_id.into(), true);
    }

    pub fn hide(&mut self, question_id: impl Into<QuestionId>) {
        self.overrides.insert(question_id.into(), false);
    }

    /// Applies the visibility effect of an action, if it has one. Skip
    /// actions pass through untouched.
    pub fn apply(&mut self, action: &NavigationAction) {
        match action {
            NavigationAction::ShowQuestion { target } => self.show(target.clone()),
            NavigationAction::HideQuestion { target } => self.hide(target.clone()),
            NavigationAction::SkipToQuestion { .. } | NavigationAction::SkipToEnd => {}
        }
    }

    pub fn is_visible(&self, question: &QuestionDefinition) -> bool {
        self.overrides
            .get(&question.id)
            .copied()
            .unwrap_or(!question.hidden)
    }
}
