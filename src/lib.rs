pub mod analysis;
pub mod config;
pub mod error;
pub mod indexer;
pub mod languages;
pub mod model;
pub mod summary;
pub mod workspace;

pub use analysis::{ArchitectureStyle, DesignPattern, PurposeClassifier, PurposeTag};
pub use config::ScanConfig;
pub use error::{AnalyzerError, Result};
pub use indexer::{
    strip_comments, Extraction, FileWalker, IgnoreRules, PathFilter, ScanProgress,
    StructuralExtractor,
};
pub use languages::{LanguageRegistry, LanguageTag};
pub use model::{
    build_project_model, DependencyEdge, DependencyGraph, DependencyTarget, FileMetrics,
    LanguageStats, ProjectModel, ProjectModelBuilder, SkipReason, SkippedFile, SourceFile,
};
pub use summary::{FallbackSummarizer, GenerativeSummarizer, RuleBasedSummarizer, Summarizer};
pub use workspace::{BuildArtifactDetector, Ecosystem};
