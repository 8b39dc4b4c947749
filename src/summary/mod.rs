//! Per-file descriptions produced from a finished [`SourceFile`].
//!
//! Summaries are computed after the model is built and never feed back into
//! it. [`RuleBasedSummarizer`] is deterministic and always available;
//! [`GenerativeSummarizer`] calls an OpenAI-compatible endpoint and is
//! normally wrapped in a [`FallbackSummarizer`].

pub mod generative;
pub mod rule_based;

use tracing::warn;

use crate::config::SummarizerConfig;
use crate::error::Result;
use crate::model::SourceFile;

pub use generative::{ChatMessage, GenerativeSummarizer};
pub use rule_based::RuleBasedSummarizer;

/// Turns a file's structural record into a short description.
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &'static str;

    fn summarize(&self, file: &SourceFile) -> Result<String>;
}

/// Tries `primary` and answers with `fallback` when it fails.
pub struct FallbackSummarizer {
    primary: Box<dyn Summarizer>,
    fallback: Box<dyn Summarizer>,
}

impl FallbackSummarizer {
    pub fn new(primary: Box<dyn Summarizer>, fallback: Box<dyn Summarizer>) -> Self {
        Self { primary, fallback }
    }
}

impl Summarizer for FallbackSummarizer {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn summarize(&self, file: &SourceFile) -> Result<String> {
        match self.primary.summarize(file) {
            Ok(summary) => Ok(summary),
            Err(e) => {
                warn!(
                    "{} summarizer failed for {}: {}; using {}",
                    self.primary.name(),
                    file.path,
                    e,
                    self.fallback.name()
                );
                self.fallback.summarize(file)
            }
        }
    }
}

/// Generative summaries with rule-based fallback when an endpoint is
/// configured, rule-based only otherwise.
pub fn summarizer_from_config(config: &SummarizerConfig) -> Result<Box<dyn Summarizer>> {
    match config.endpoint.as_deref() {
        Some(endpoint) if !endpoint.trim().is_empty() => {
            let generative = GenerativeSummarizer::from_config(config)?;
            Ok(Box::new(FallbackSummarizer::new(
                Box::new(generative),
                Box::new(RuleBasedSummarizer),
            )))
        }
        _ => Ok(Box::new(RuleBasedSummarizer)),
    }
}
