use super::definition::SurveyDefinition;
use crate::error::SurveyConversionError;

/// A trait for custom data models that can be converted into a bunki
/// `SurveyDefinition`.
///
/// This is the primary extension point for making bunki format-agnostic. By
/// implementing this trait on your own configuration structs, you provide a
/// translation layer that allows the bunki compiler to process whatever
/// shape your survey platform stores.
///
/// # Example
///
/// ```rust
/// use bunki::prelude::*;
/// use bunki::error::SurveyConversionError;
/// // The bunki prelude's `Result<T>` alias shadows std's two-parameter
/// // `Result`; re-import std's so the trait signature below resolves.
/// use std::result::Result;
///
/// // 1. Define your custom structs for parsing your format.
/// struct MyPage { slug: String, position: u32 }
/// struct MyForm { pages: Vec<MyPage> }
///
/// // 2. Implement `IntoSurvey` for your top-level struct.
/// impl IntoSurvey for MyForm {
///     fn into_survey(self) -> Result<SurveyDefinition, SurveyConversionError> {
///         let questions = self
///             .pages
///             .into_iter()
///             .map(|page| QuestionDefinition {
///                 id: page.slug,
///                 order: page.position,
///                 hidden: false,
///             })
///             .collect();
///
///         Ok(SurveyDefinition {
///             questions,
///             rules: vec![], // Convert your skip logic here as well
///         })
///     }
/// }
/// ```
pub trait IntoSurvey {
    /// Consumes the object and converts it into a bunki-compatible survey.
    fn into_survey(self) -> Result<SurveyDefinition, SurveyConversionError>;
}

impl IntoSurvey for SurveyDefinition {
    fn into_survey(self) -> Result<SurveyDefinition, SurveyConversionError> {
        Ok(self)
    }
}
