//! Project model: per-file records plus project-wide aggregates.

pub mod builder;
pub mod graph;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::architecture::{ArchitectureStyle, DesignPattern};
use crate::analysis::purpose::{PurposeClassifier, PurposeTag};
use crate::languages::LanguageTag;

pub use builder::{build_project_model, ProjectModelBuilder};
pub use graph::{DependencyEdge, DependencyGraph, DependencyTarget};

/// Imports too common to say anything about a project.
pub(crate) const TRIVIAL_IMPORTS: &[&str] = &["os", "sys", "re", "json", "typing"];

/// Libraries listed ahead of the rest in [`ProjectModel::external_dependencies`].
const WELL_KNOWN_LIBRARIES: &[&str] = &[
    "flask", "django", "fastapi", "streamlit", "pandas", "numpy", "matplotlib", "sklearn",
    "tensorflow", "torch", "requests", "react", "vue", "express", "spring", "tokio", "serde",
];

/// Structural record of one scanned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path relative to the project root, `/`-separated
    pub path: String,
    pub language: LanguageTag,
    pub line_count: usize,
    pub functions: Vec<String>,
    /// How many of `functions` sit outside any type or function body
    pub top_level_functions: usize,
    pub classes: Vec<String>,
    pub imports: Vec<String>,
    pub purposes: BTreeSet<PurposeTag>,
    pub is_build_artifact: bool,
}

/// Per-file numbers consumed by complexity heatmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetrics {
    pub lines: usize,
    pub functions: usize,
    pub classes: usize,
    pub imports: usize,
}

impl SourceFile {
    pub fn metrics(&self) -> FileMetrics {
        FileMetrics {
            lines: self.line_count,
            functions: self.functions.len(),
            classes: self.classes.len(),
            imports: self.imports.len(),
        }
    }

    pub fn main_purpose(&self) -> PurposeTag {
        PurposeClassifier::main_purpose(&self.purposes)
    }

    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Why a file produced no [`SourceFile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "kebab-case")]
pub enum SkipReason {
    /// Permission or I/O failure while walking or reading
    Unreadable(String),
    /// Content is not valid UTF-8
    InvalidEncoding(String),
    /// Size in bytes exceeded the configured cap
    TooLarge(u64),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(detail) => write!(f, "unreadable: {}", detail),
            SkipReason::InvalidEncoding(detail) => write!(f, "invalid encoding: {}", detail),
            SkipReason::TooLarge(bytes) => write!(f, "too large: {} bytes", bytes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStats {
    pub files: usize,
    pub lines: usize,
}

/// Result of one scan. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectModel {
    root: PathBuf,
    files: Vec<SourceFile>,
    total_lines: usize,
    architecture: ArchitectureStyle,
    dependency_graph: DependencyGraph,
    build_artifacts: BTreeSet<String>,
    skipped: Vec<SkippedFile>,
}

impl ProjectModel {
    pub(crate) fn assemble(
        root: PathBuf,
        files: Vec<SourceFile>,
        dependency_graph: DependencyGraph,
        skipped: Vec<SkippedFile>,
    ) -> Self {
        let total_lines = files.iter().map(|f| f.line_count).sum();
        let classes = files.iter().map(|f| f.classes.len()).sum();
        let functions = files.iter().map(|f| f.top_level_functions).sum();
        let build_artifacts = files
            .iter()
            .filter(|f| f.is_build_artifact)
            .map(|f| f.path.clone())
            .collect();

        Self {
            root,
            files,
            total_lines,
            architecture: ArchitectureStyle::classify(classes, functions),
            dependency_graph,
            build_artifacts,
            skipped,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files in traversal order.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn file(&self, path: &str) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn architecture(&self) -> ArchitectureStyle {
        self.architecture
    }

    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.dependency_graph
    }

    pub fn build_artifacts(&self) -> &BTreeSet<String> {
        &self.build_artifacts
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn class_count(&self) -> usize {
        self.files.iter().map(|f| f.classes.len()).sum()
    }

    pub fn function_count(&self) -> usize {
        self.files.iter().map(|f| f.functions.len()).sum()
    }

    /// Functions declared outside type and function bodies; this is what
    /// [`ArchitectureStyle`] weighs against classes.
    pub fn top_level_function_count(&self) -> usize {
        self.files.iter().map(|f| f.top_level_functions).sum()
    }

    pub fn language_breakdown(&self) -> BTreeMap<LanguageTag, LanguageStats> {
        let mut breakdown: BTreeMap<LanguageTag, LanguageStats> = BTreeMap::new();
        for file in &self.files {
            let stats = breakdown.entry(file.language).or_default();
            stats.files += 1;
            stats.lines += file.line_count;
        }
        breakdown
    }

    /// Roots of imports that resolved to no project file. Well-known
    /// libraries come first, the rest follow alphabetically.
    pub fn external_dependencies(&self) -> Vec<String> {
        let roots: BTreeSet<String> = self
            .dependency_graph
            .external_edges()
            .filter_map(|edge| import_root(&edge.import))
            .filter(|root| !TRIVIAL_IMPORTS.contains(&root.as_str()))
            .collect();

        let (mut known, rest): (Vec<String>, Vec<String>) = roots
            .into_iter()
            .partition(|root| WELL_KNOWN_LIBRARIES.contains(&root.to_ascii_lowercase().as_str()));
        known.extend(rest);
        known
    }

    pub fn design_patterns(&self) -> BTreeSet<DesignPattern> {
        DesignPattern::detect(
            self.files
                .iter()
                .flat_map(|f| f.classes.iter().map(String::as_str)),
        )
    }
}

/// Package-level root of an import identifier, `None` for relative imports.
///
/// `numpy.linalg` -> `numpy`, `@scope/pkg/sub` -> `@scope/pkg`,
/// `github.com/org/repo/pkg` -> `github.com/org/repo`, `serde::Deserialize`
/// -> `serde`, `Illuminate\Http` -> `Illuminate`.
pub fn import_root(import: &str) -> Option<String> {
    let import = import.trim();
    if import.is_empty() || import.starts_with('.') || import.starts_with('/') {
        return None;
    }

    if import.starts_with('@') {
        let parts: Vec<&str> = import.splitn(3, '/').collect();
        return Some(parts[..parts.len().min(2)].join("/"));
    }

    if import.contains('/') {
        let parts: Vec<&str> = import.split('/').collect();
        let take = if parts[0].contains('.') { 3 } else { 1 };
        return Some(parts[..parts.len().min(take)].join("/"));
    }

    let root = import
        .trim_start_matches("::")
        .split("::")
        .next()
        .and_then(|s| s.split('\\').next())
        .and_then(|s| s.split('.').next())
        .unwrap_or(import);
    if root.is_empty() {
        None
    } else {
        Some(root.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, language: LanguageTag, lines: usize, classes: &[&str], functions: &[&str]) -> SourceFile {
        SourceFile {
            path: path.to_string(),
            language,
            line_count: lines,
            functions: functions.iter().map(|s| s.to_string()).collect(),
            top_level_functions: functions.len(),
            classes: classes.iter().map(|s| s.to_string()).collect(),
            imports: Vec::new(),
            purposes: BTreeSet::from([PurposeTag::General]),
            is_build_artifact: false,
        }
    }

    #[test]
    fn test_import_root() {
        assert_eq!(import_root("numpy.linalg").as_deref(), Some("numpy"));
        assert_eq!(import_root("@angular/core/testing").as_deref(), Some("@angular/core"));
        assert_eq!(
            import_root("github.com/sirupsen/logrus/hooks").as_deref(),
            Some("github.com/sirupsen/logrus")
        );
        assert_eq!(import_root("lodash/fp").as_deref(), Some("lodash"));
        assert_eq!(import_root("serde::Deserialize").as_deref(), Some("serde"));
        assert_eq!(import_root(r"Illuminate\Http\Request").as_deref(), Some("Illuminate"));
        assert_eq!(import_root("stdio.h").as_deref(), Some("stdio"));
        assert_eq!(import_root("./local"), None);
        assert_eq!(import_root(".."), None);
    }

    #[test]
    fn test_assemble_aggregates() {
        let mut cargo = file("Cargo.toml", LanguageTag::Unknown, 5, &[], &[]);
        cargo.is_build_artifact = true;
        let files = vec![
            file("a.py", LanguageTag::Python, 10, &["UserRepository", "Cart"], &["main"]),
            file("b.py", LanguageTag::Python, 4, &["Item"], &[]),
            cargo,
        ];
        let model = ProjectModel::assemble(
            PathBuf::from("/tmp/p"),
            files,
            DependencyGraph::default(),
            Vec::new(),
        );

        assert_eq!(model.total_lines(), 19);
        assert_eq!(model.class_count(), 3);
        assert_eq!(model.function_count(), 1);
        assert_eq!(model.architecture(), ArchitectureStyle::ObjectOriented);
        assert_eq!(
            model.build_artifacts().iter().collect::<Vec<_>>(),
            vec!["Cargo.toml"]
        );
        assert_eq!(
            model.design_patterns().into_iter().collect::<Vec<_>>(),
            vec![DesignPattern::Repository]
        );

        let breakdown = model.language_breakdown();
        assert_eq!(breakdown[&LanguageTag::Python], LanguageStats { files: 2, lines: 14 });
        assert_eq!(breakdown[&LanguageTag::Unknown], LanguageStats { files: 1, lines: 5 });
    }

    #[test]
    fn test_architecture_weighs_top_level_functions() {
        let mut shop = file("shop.py", LanguageTag::Python, 12, &["Cart", "Order"], &["add", "total", "submit", "main"]);
        shop.top_level_functions = 1;
        let model = ProjectModel::assemble(PathBuf::from("/p"), vec![shop], DependencyGraph::default(), Vec::new());

        assert_eq!(model.function_count(), 4);
        assert_eq!(model.top_level_function_count(), 1);
        assert_eq!(model.architecture(), ArchitectureStyle::ObjectOriented);
    }

    #[test]
    fn test_external_dependencies_order() {
        let mut graph = DependencyGraph::new(vec!["app.py".into()]);
        for import in ["zlib_wrapper", "os", "flask.views", "alembic", "requests", ".local", "typing"] {
            graph.add_edge("app.py", DependencyTarget::External, import);
        }
        let model = ProjectModel::assemble(PathBuf::from("/p"), Vec::new(), graph, Vec::new());
        assert_eq!(
            model.external_dependencies(),
            vec!["flask", "requests", "alembic", "zlib_wrapper"]
        );
    }

    #[test]
    fn test_metrics_and_file_name() {
        let f = file("src/pkg/mod.py", LanguageTag::Python, 7, &["A"], &["f", "g"]);
        assert_eq!(
            f.metrics(),
            FileMetrics { lines: 7, functions: 2, classes: 1, imports: 0 }
        );
        assert_eq!(f.file_name(), "mod.py");
        assert_eq!(f.main_purpose(), PurposeTag::General);
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::TooLarge(42).to_string(), "too large: 42 bytes");
        assert_eq!(
            serde_json::to_string(&SkipReason::InvalidEncoding("bad byte".into())).unwrap(),
            r#"{"kind":"invalid-encoding","detail":"bad byte"}"#
        );
    }
}
