//! # Bunki - Survey Navigation Logic Engine
//!
//! **Bunki** is a deterministic rule-resolution and navigation engine for
//! branching surveys. It compiles a survey's question list and authored skip
//! logic into a validated snapshot, then drives respondent sessions through
//! it: every answer submission resolves the attached rules and moves the
//! cursor forward, with hidden questions, jumps and early termination all
//! handled the same way every time.
//!
//! ## Core Workflow
//!
//! The engine is designed to be format-agnostic. It operates on a canonical
//! internal model of a "survey definition." The primary workflow is:
//!
//! 1.  **Load Your Data**: Parse your survey platform's export into your own
//!     Rust structs, or use the bundled [`authoring`] format.
//! 2.  **Convert to Bunki's Model**: Implement the `IntoSurvey` trait for your
//!     structs to provide a translation layer into bunki's `SurveyDefinition`.
//! 3.  **Compile**: Use `SurveyCompiler::builder` to validate the definition
//!     and produce an immutable `CompiledSurvey`. Lenient compilation keeps
//!     defective rules out of the way; strict compilation rejects them
//!     outright.
//! 4.  **Navigate**: Create a `Navigator` and run sessions against it.
//!     Sessions are plain values that can be snapshotted, resumed and
//!     replayed.
//!
//! ## Quick Start
//!
//! ```rust
//! use bunki::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // A minimal authoring export: three questions, one skip rule.
//!     let json = r#"{
//!         "questions": [
//!             { "id": "q1", "order": 1 },
//!             { "id": "q2", "order": 2 },
//!             { "id": "q3", "order": 3 }
//!         ],
//!         "rules": [{
//!             "id": "r1",
//!             "sourceQuestionId": "q1",
//!             "type": "SKIP_LOGIC",
//!             "conditions": [
//!                 { "questionId": "q1", "operator": "EQUALS", "value": "yes" }
//!             ],
//!             "action": { "action": "SKIP_TO_QUESTION", "targetQuestionId": "q3" },
//!             "createdAt": 1700000000000
//!         }]
//!     }"#;
//!
//!     let definition = AuthoringSurvey::from_json(json)?.into_survey()?;
//!     let compiled = SurveyCompiler::builder(definition).build().compile()?;
//!     let navigator = Navigator::new(compiled);
//!
//!     // Answering "yes" fires the rule and jumps over q2.
//!     let session = navigator.start();
//!     let session = navigator.submit(&session, "q1", "yes")?;
//!     assert_eq!(session.current_question_id(), Some("q3"));
//!
//!     // Ask the resolver why.
//!     let resolver = RuleResolver::new(navigator.survey());
//!     let trace = resolver.resolve_traced("q1", session.answers());
//!     println!("{}", TraceFormatter::format_trace(&trace));
//!
//!     Ok(())
//! }
//! ```

pub mod answer;
pub mod authoring;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod navigator;
pub mod prelude;
pub mod resolver;
pub mod rule;
pub mod survey;
pub mod trace;
pub mod visibility;
