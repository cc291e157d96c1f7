use crate::error::{QuestionId, SurveyConversionError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a matched rule does to the session.
///
/// This is the canonical internal shape: actions that need a target carry it,
/// actions that do not cannot. The looser authoring wire shape is
/// [`LogicActionData`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavigationAction {
    /// Jump forward to the target question, skipping everything between.
    SkipToQuestion { target: QuestionId },
    /// Terminate the session immediately.
    SkipToEnd,
    /// Reveal a question that is hidden by default.
    ShowQuestion { target: QuestionId },
    /// Conceal a question so navigation passes over it.
    HideQuestion { target: QuestionId },
}

impl NavigationAction {
    /// The question the action points at, if it points at one.
    pub fn target(&self) -> Option<&QuestionId> {
        match self {
            NavigationAction::SkipToQuestion { target }
            | NavigationAction::ShowQuestion { target }
            | NavigationAction::HideQuestion { target } => Some(target),
            NavigationAction::SkipToEnd => None,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            NavigationAction::SkipToQuestion { .. } => ActionKind::SkipToQuestion,
            NavigationAction::SkipToEnd => ActionKind::SkipToEnd,
            NavigationAction::ShowQuestion { .. } => ActionKind::ShowQuestion,
            NavigationAction::HideQuestion { .. } => ActionKind::HideQuestion,
        }
    }
}

impl fmt::Display for NavigationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target() {
            Some(target) => write!(f, "{} '{}'", self.kind(), target),
            None => write!(f, "{}", self.kind()),
        }
    }
}

/// The action discriminant as it appears in authoring data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    SkipToQuestion,
    SkipToEnd,
    ShowQuestion,
    HideQuestion,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::SkipToQuestion => "SKIP_TO_QUESTION",
            ActionKind::SkipToEnd => "SKIP_TO_END",
            ActionKind::ShowQuestion => "SHOW_QUESTION",
            ActionKind::HideQuestion => "HIDE_QUESTION",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The flat action shape used by authoring tools: a discriminant plus an
/// optional target, with no guarantee the two agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicActionData {
    pub action: ActionKind,
    #[serde(default, alias = "targetQuestionId")]
    pub target_question_id: Option<QuestionId>,
}

fn require_target(
    action: ActionKind,
    target: Option<QuestionId>,
) -> Result<QuestionId, SurveyConversionError> {
    target.ok_or_else(|| SurveyConversionError::MissingTarget {
        action: action.to_string(),
    })
}

impl TryFrom<LogicActionData> for NavigationAction {
    type Error = SurveyConversionError;

    /// Tightens the flat shape into the canonical one. A missing target is an
    /// error for the actions that need one; a stray target on `SKIP_TO_END`
    /// is ignored.
    fn try_from(data: LogicActionData) -> Result<Self, Self::Error> {
        let LogicActionData {
            action,
            target_question_id,
        } = data;
        Ok(match action {
            ActionKind::SkipToQuestion => NavigationAction::SkipToQuestion {
                target: require_target(action, target_question_id)?,
            },
            ActionKind::SkipToEnd => NavigationAction::SkipToEnd,
            ActionKind::ShowQuestion => NavigationAction::ShowQuestion {
                target: require_target(action, target_question_id)?,
            },
            ActionKind::HideQuestion => NavigationAction::HideQuestion {
                target: require_target(action, target_question_id)?,
            },
        })
    }
}

impl From<&NavigationAction> for LogicActionData {
    fn from(action: &NavigationAction) -> Self {
        Self {
            action: action.kind(),
            target_question_id: action.target().cloned(),
        }
    }
}
