use crate::error::{QuestionId, RuleId, SurveyBuildError};
use crate::rule::LogicRule;
use crate::survey::{CompiledSurvey, QuestionCatalog, SurveyDefinition};
use ahash::{AHashMap, AHashSet};

mod validate;

pub use validate::validate_rule;

/// Compiles a [`SurveyDefinition`] into an immutable [`CompiledSurvey`].
///
/// Compilation validates the question catalog, checks every rule against it,
/// and groups the rules for fast resolution. Catalog defects (duplicate ids
/// or orders) always fail. How rule defects are handled depends on the mode:
/// the default lenient mode keeps every rule and records violations as
/// warnings, while strict mode fails compilation on the first pass.
pub struct SurveyCompiler {
    definition: SurveyDefinition,
    strict: bool,
}

pub struct SurveyCompilerBuilder {
    definition: SurveyDefinition,
    strict: bool,
}

impl SurveyCompilerBuilder {
    pub fn new(definition: SurveyDefinition) -> Self {
        Self {
            definition,
            strict: false,
        }
    }

    /// Rejects the whole survey if any rule violation is found. This is the
    /// authoring-time posture; runtime consumers should stay lenient so one
    /// stale rule cannot take a published survey down.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn build(self) -> SurveyCompiler {
        SurveyCompiler {
            definition: self.definition,
            strict: self.strict,
        }
    }
}

impl SurveyCompiler {
    pub fn builder(definition: SurveyDefinition) -> SurveyCompilerBuilder {
        SurveyCompilerBuilder::new(definition)
    }

    pub fn compile(self) -> Result<CompiledSurvey, SurveyBuildError> {
        let catalog = QuestionCatalog::from_questions(self.definition.questions)?;

        let mut warnings = Vec::new();
        for rule in &self.definition.rules {
            warnings.extend(validate_rule(rule, &catalog));
        }

        if self.strict && !warnings.is_empty() {
            return Err(SurveyBuildError::InvalidRules {
                violations: warnings,
            });
        }

        let disqualified: AHashSet<RuleId> = warnings
            .iter()
            .filter(|violation| violation.disqualifies())
            .map(|violation| violation.rule_id().to_string())
            .collect();

        let mut rules_by_source: AHashMap<QuestionId, Vec<LogicRule>> = AHashMap::new();
        for rule in self.definition.rules {
            rules_by_source
                .entry(rule.source_question_id.clone())
                .or_default()
                .push(rule);
        }

        // Tie-break order is baked in here so resolution is a plain scan:
        // oldest rule first, rule id as the deterministic fallback for
        // identical timestamps.
        for rules in rules_by_source.values_mut() {
            rules.sort_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.id.cmp(&b.id))
            });
        }

        Ok(CompiledSurvey::new(
            catalog,
            rules_by_source,
            disqualified,
            warnings,
        ))
    }
}
