use crate::analysis::purpose::PurposeTag;
use crate::error::Result;
use crate::model::{SourceFile, TRIVIAL_IMPORTS};

use super::Summarizer;

const MAX_LISTED_DEPENDENCIES: usize = 5;

/// Deterministic description built from purpose tags, symbol counts and
/// imports.
pub struct RuleBasedSummarizer;

impl RuleBasedSummarizer {
    pub fn describe(file: &SourceFile) -> String {
        let mut parts = Vec::new();

        let purpose = file.main_purpose();
        if purpose != PurposeTag::General {
            parts.push(format!("**Purpose**: {}", purpose.description()));
        }

        let classes = file.classes.len();
        let functions = file.functions.len();
        match (classes, functions) {
            (0, 0) => {}
            (c, 0) => parts.push(format!("**Architecture**: Class-based with {} class(es)", c)),
            (0, f) => parts.push(format!("**Architecture**: Functional with {} function(s)", f)),
            (c, f) => parts.push(format!(
                "**Architecture**: Object-oriented with {} class(es) and {} function(s)",
                c, f
            )),
        }

        let dependencies: Vec<String> = file
            .imports
            .iter()
            .filter(|import| !import.starts_with('.') && !TRIVIAL_IMPORTS.contains(&import.as_str()))
            .take(MAX_LISTED_DEPENDENCIES)
            .map(|import| format!("`{}`", import))
            .collect();
        if !dependencies.is_empty() {
            parts.push(format!("**Dependencies**: {}", dependencies.join(", ")));
        }

        if parts.is_empty() {
            format!("**Purpose**: General {} module", file.language.display_name())
        } else {
            parts.join("\n")
        }
    }
}

impl Summarizer for RuleBasedSummarizer {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    fn summarize(&self, file: &SourceFile) -> Result<String> {
        Ok(Self::describe(file))
    }
}
