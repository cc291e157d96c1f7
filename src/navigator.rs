use crate::answer::{AnswerStore, AnswerValue};
use crate::error::{QuestionId, SnapshotError, TransitionError};
use crate::resolver::RuleResolver;
use crate::rule::NavigationAction;
use crate::survey::CompiledSurvey;
use crate::visibility::VisibilityTracker;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};

/// Where a session currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    /// Waiting for an answer to this question.
    Answering(QuestionId),
    /// The session is over. Terminal: no transition leaves this state.
    Terminated,
}

/// A survey session: the cursor, the answers so far, and the visibility
/// overrides accumulated along the way.
///
/// States are plain values. The [`Navigator`] never mutates one in place;
/// each submission produces a fresh state, so callers can keep history,
/// replay, or throw branches away freely. A state can be frozen with
/// [`to_bytes`](NavigationState::to_bytes) and resumed later against the
/// same compiled survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    position: Position,
    answers: AnswerStore,
    visibility: VisibilityTracker,
}

impl NavigationState {
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The question awaiting an answer, or `None` once terminated.
    pub fn current_question_id(&self) -> Option<&str> {
        match &self.position {
            Position::Answering(id) => Some(id),
            Position::Terminated => None,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.position, Position::Terminated)
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn visibility(&self) -> &VisibilityTracker {
        &self.visibility
    }

    /// Serializes the session to a byte buffer using bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        encode_to_vec(self, standard()).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    /// Deserializes a session from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        decode_from_slice(bytes, standard())
            .map(|(state, _)| state) // bincode 2 returns a tuple (data, bytes_read)
            .map_err(|e| SnapshotError::Decode(e.to_string()))
    }
}

/// Drives sessions through a compiled survey.
///
/// The navigator owns the survey and is itself stateless; one instance can
/// serve any number of concurrent sessions. Every transition is
/// deterministic: the same state and the same answer always produce the
/// same next state.
pub struct Navigator {
    survey: CompiledSurvey,
}

impl Navigator {
    pub fn new(survey: CompiledSurvey) -> Self {
        Self { survey }
    }

    pub fn survey(&self) -> &CompiledSurvey {
        &self.survey
    }

    /// Opens a fresh session positioned on the first question that is
    /// visible by default. A survey with no visible questions starts
    /// terminated.
    pub fn start(&self) -> NavigationState {
        let visibility = VisibilityTracker::new();
        let position = self.first_visible_at_or_after(&visibility, 0);
        NavigationState {
            position,
            answers: AnswerStore::new(),
            visibility,
        }
    }

    /// Answers the current question and advances the session.
    ///
    /// The transition, in order: reject the submission if the session is
    /// terminated or the answer is not for the current question, record the
    /// answer, resolve the rules attached to the question, apply the winning
    /// action, and move the cursor to the next visible question. With no
    /// matching rule the cursor simply advances; running out of questions
    /// terminates the session.
    pub fn submit(
        &self,
        state: &NavigationState,
        question_id: &str,
        answer: impl Into<AnswerValue>,
    ) -> Result<NavigationState, TransitionError> {
        let current = match &state.position {
            Position::Terminated => return Err(TransitionError::AlreadyTerminated),
            Position::Answering(id) => id.as_str(),
        };
        if question_id != current {
            return Err(TransitionError::NotCurrentQuestion {
                submitted: question_id.to_string(),
                current: current.to_string(),
            });
        }
        let source_order = self.survey.catalog().order_of(current).ok_or_else(|| {
            TransitionError::UnknownQuestion {
                question_id: current.to_string(),
            }
        })?;

        let mut next = state.clone();
        next.answers.record(current, answer);

        let action = RuleResolver::new(&self.survey).resolve(current, &next.answers);

        next.position = match action {
            Some(NavigationAction::SkipToEnd) => Position::Terminated,
            Some(NavigationAction::SkipToQuestion { target }) => {
                match self.survey.catalog().order_of(target) {
                    Some(target_order) if target_order > source_order => {
                        // The target itself may be hidden right now; land on
                        // the first visible question at or past it.
                        self.first_visible_at_or_after(&next.visibility, target_order)
                    }
                    // Backward targets degrade to the default advance.
                    // Authoring validation has already flagged them.
                    _ => self.first_visible_after(&next.visibility, source_order),
                }
            }
            Some(
                action @ (NavigationAction::ShowQuestion { .. }
                | NavigationAction::HideQuestion { .. }),
            ) => {
                next.visibility.apply(action);
                self.first_visible_after(&next.visibility, source_order)
            }
            None => self.first_visible_after(&next.visibility, source_order),
        };

        Ok(next)
    }

    /// The questions a respondent can still reach: the current question and
    /// every visible question after it. Empty once the session terminates.
    pub fn visible_questions(&self, state: &NavigationState) -> Vec<QuestionId> {
        let Some(current) = state.current_question_id() else {
            return Vec::new();
        };
        let Some(order) = self.survey.catalog().order_of(current) else {
            return Vec::new();
        };
        self.survey
            .catalog()
            .at_or_after(order)
            .filter(|question| state.visibility.is_visible(question))
            .map(|question| question.id.clone())
            .collect()
    }

    fn first_visible_at_or_after(&self, visibility: &VisibilityTracker, order: u32) -> Position {
        self.survey
            .catalog()
            .at_or_after(order)
            .find(|question| visibility.is_visible(question))
            .map(|question| Position::Answering(question.id.clone()))
            .unwrap_or(Position::Terminated)
    }

    fn first_visible_after(&self, visibility: &VisibilityTracker, order: u32) -> Position {
        self.survey
            .catalog()
            .after(order)
            .find(|question| visibility.is_visible(question))
            .map(|question| Position::Answering(question.id.clone()))
            .unwrap_or(Position::Terminated)
    }
}
