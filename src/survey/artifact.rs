use crate::error::{QuestionId, RuleId, RuleViolation, SnapshotError};
use crate::rule::LogicRule;
use crate::survey::QuestionCatalog;
use ahash::{AHashMap, AHashSet};
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::io::{Read, Write};

/// The immutable output of survey compilation.
///
/// Holds the validated question catalog and the rules grouped by source
/// question, pre-sorted so resolution is a single forward scan. A compiled
/// survey can be persisted with [`save`](CompiledSurvey::save) and shipped to
/// another process, where sessions are run against it without recompiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledSurvey {
    catalog: QuestionCatalog,
    /// Rules keyed by source question, each group sorted by
    /// `(created_at, id)` ascending.
    rules_by_source: AHashMap<QuestionId, Vec<LogicRule>>,
    /// Rules that can never fire. They stay in their groups for inspection
    /// but resolution passes over them.
    disqualified: AHashSet<RuleId>,
    /// Everything lenient validation found wrong with the rule set.
    warnings: Vec<RuleViolation>,
}

impl CompiledSurvey {
    pub(crate) fn new(
        catalog: QuestionCatalog,
        rules_by_source: AHashMap<QuestionId, Vec<LogicRule>>,
        disqualified: AHashSet<RuleId>,
        warnings: Vec<RuleViolation>,
    ) -> Self {
        Self {
            catalog,
            rules_by_source,
            disqualified,
            warnings,
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// The rules attached to a source question, oldest first.
    pub fn rules_for(&self, source_question_id: &str) -> &[LogicRule] {
        self.rules_by_source
            .get(source_question_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_disqualified(&self, rule_id: &str) -> bool {
        self.disqualified.contains(rule_id)
    }

    pub fn warnings(&self) -> &[RuleViolation] {
        &self.warnings
    }

    pub fn rule_count(&self) -> usize {
        self.rules_by_source.values().map(Vec::len).sum()
    }

    /// Renders the survey as an indented text map, one line per question
    /// with its rules beneath. Intended for debugging and CLI output.
    pub fn flow_map(&self) -> String {
        let mut out = String::new();
        for question in self.catalog.iter() {
            let marker = if question.hidden { " (hidden)" } else { "" };
            let _ = writeln!(out, "{}. {}{}", question.order, question.id, marker);
            for rule in self.rules_for(&question.id) {
                let flag = if self.is_disqualified(&rule.id) {
                    " [disqualified]"
                } else {
                    ""
                };
                let _ = writeln!(out, "     [{}]{} {}", rule.id, flag, rule);
            }
        }
        out
    }

    /// Serializes the compiled survey to a byte buffer using bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        encode_to_vec(self, standard()).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    /// Saves the compiled survey to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), SnapshotError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| SnapshotError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        file.write_all(&bytes).map_err(|e| SnapshotError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Loads a compiled survey from a file.
    pub fn from_file(path: &str) -> Result<Self, SnapshotError> {
        let mut file = fs::File::open(path).map_err(|e| SnapshotError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| SnapshotError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes a compiled survey from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        decode_from_slice(bytes, standard())
            .map(|(survey, _)| survey) // bincode 2 returns a tuple (data, bytes_read)
            .map_err(|e| SnapshotError::Decode(e.to_string()))
    }
}
