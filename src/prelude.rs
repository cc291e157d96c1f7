//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! bunki crate. Import this module to get access to the core functionality
//! without having to import each type individually.
//!
//! # Example
//!
//! ```rust
//! // Use the prelude to get easy access to all the core types.
//! use bunki::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let definition = SurveyDefinition {
//!         questions: vec![
//!             QuestionDefinition { id: "q1".into(), order: 1, hidden: false },
//!             QuestionDefinition { id: "q2".into(), order: 2, hidden: false },
//!         ],
//!         rules: vec![],
//!     };
//!
//!     let compiled = SurveyCompiler::builder(definition).build().compile()?;
//!     let navigator = Navigator::new(compiled);
//!
//!     let session = navigator.start();
//!     let session = navigator.submit(&session, "q1", "hello")?;
//!     assert_eq!(session.current_question_id(), Some("q2"));
//!     Ok(())
//! }
//! ```

// Core compilation and navigation
pub use crate::compiler::{SurveyCompiler, validate_rule};
pub use crate::navigator::{NavigationState, Navigator, Position};

// Survey model
pub use crate::survey::{
    CompiledSurvey, IntoSurvey, QuestionCatalog, QuestionDefinition, SurveyDefinition,
};

// Rule model
pub use crate::rule::{
    ActionKind, Condition, ConditionOperator, LogicActionData, LogicRule, NavigationAction,
    RuleKind,
};

// Answers and visibility
pub use crate::answer::{AnswerStore, AnswerValue};
pub use crate::visibility::VisibilityTracker;

// Resolution and trace formatting
pub use crate::resolver::RuleResolver;
pub use crate::trace::{ResolutionTrace, TraceFormatter};

// Authoring wire format
pub use crate::authoring::AuthoringSurvey;

// Error types
pub use crate::error::{RuleViolation, SurveyBuildError, TransitionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
