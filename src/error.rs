use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Project root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Project root not readable: {}: {source}", path.display())]
    RootNotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scan cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Summarizer error: {0}")]
    Summarizer(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
