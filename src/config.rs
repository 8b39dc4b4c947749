use std::path::Path;

use serde::Deserialize;

use crate::error::{AnalyzerError, Result};

/// Name of the per-project configuration file looked up in the scan root.
pub const CONFIG_FILE_NAME: &str = ".code-doc.toml";

/// Contents of `.code-doc.toml`. Every section and field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub ignore: IgnoreConfig,
    pub scan: ScanSection,
    pub summarizer: SummarizerConfig,
}

/// Extra ignore rules appended to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IgnoreConfig {
    pub dirs: Vec<String>,
    pub files: Vec<String>,
    pub suffixes: Vec<String>,
    pub globs: Vec<String>,
    pub respect_gitignore: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanSection {
    /// Worker threads; `None` uses one per CPU.
    pub jobs: Option<usize>,
    /// Files larger than this are skipped instead of analysed.
    pub max_file_bytes: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummarizerConfig {
    /// Base URL of an OpenAI-compatible API. Without it only the rule-based
    /// summarizer is used.
    pub endpoint: Option<String>,
    pub model: String,
    /// Environment variable holding the bearer token.
    pub api_key_env: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: "gpt-4o-mini".to_string(),
            api_key_env: None,
            timeout_secs: 30,
        }
    }
}

impl SummarizerConfig {
    /// Reads the API key from the configured environment variable, if any.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

impl ScanConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| AnalyzerError::Config(format!("Invalid {}: {}", CONFIG_FILE_NAME, e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalyzerError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Loads `<root>/.code-doc.toml` when present, defaults otherwise.
    pub fn discover(root: &Path) -> Result<Self> {
        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}
