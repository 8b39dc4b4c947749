//! Scan orchestration: traversal, parallel per-file analysis, aggregation.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, info, warn};

use crate::analysis::purpose::{PurposeClassifier, PurposeInput};
use crate::config::ScanConfig;
use crate::error::{AnalyzerError, Result};
use crate::indexer::{
    parse_go_module, relative_key, FileWalker, IgnoreRules, ImportResolverRegistry, PathFilter,
    ProjectFiles, ScanProgress, StructuralExtractor,
};
use crate::languages::LanguageRegistry;
use crate::workspace::BuildArtifactDetector;

use super::{DependencyGraph, DependencyTarget, ProjectModel, SkipReason, SkippedFile, SourceFile};

/// Scans `root` with default settings.
pub fn build_project_model(root: &Path, rules: &IgnoreRules) -> Result<ProjectModel> {
    ProjectModelBuilder::new(rules.clone()).build(root)
}

enum FileOutcome {
    Analyzed(SourceFile),
    Skipped(SkippedFile),
}

/// Configurable scan. Per-file analysis runs on a bounded rayon pool; the
/// merge into a [`ProjectModel`] runs on the calling thread afterwards.
pub struct ProjectModelBuilder {
    rules: IgnoreRules,
    jobs: Option<usize>,
    respect_gitignore: bool,
    max_file_bytes: Option<u64>,
    progress: ScanProgress,
}

impl ProjectModelBuilder {
    pub fn new(rules: IgnoreRules) -> Self {
        Self {
            rules,
            jobs: None,
            respect_gitignore: false,
            max_file_bytes: None,
            progress: ScanProgress::new(),
        }
    }

    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        let mut builder = Self::new(IgnoreRules::from_config(&config.ignore)?)
            .respect_gitignore(config.ignore.respect_gitignore)
            .max_file_bytes(config.scan.max_file_bytes);
        builder.jobs = config.scan.jobs;
        Ok(builder)
    }

    /// Worker count; 0 means one per CPU.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.respect_gitignore = yes;
        self
    }

    pub fn max_file_bytes(mut self, limit: Option<u64>) -> Self {
        self.max_file_bytes = limit;
        self
    }

    /// Shares counters and the cancel flag with the caller.
    pub fn progress(mut self, progress: ScanProgress) -> Self {
        self.progress = progress;
        self
    }

    pub fn progress_handle(&self) -> ScanProgress {
        self.progress.clone()
    }

    pub fn build(&self, root: &Path) -> Result<ProjectModel> {
        let root = check_root(root)?;
        let registry = LanguageRegistry::new()?;

        if self.progress.is_cancelled() {
            return Err(AnalyzerError::Cancelled);
        }

        let walker = FileWalker::new(PathFilter::new(self.rules.clone()))
            .respect_gitignore(self.respect_gitignore);
        let walked = walker.walk(&root);
        info!("Found {} files to analyze in {}", walked.files.len(), root.display());

        self.progress.start(walked.files.len());
        let pool = self.thread_pool()?;
        let outcomes: Result<Vec<FileOutcome>> = pool.install(|| {
            walked
                .files
                .par_iter()
                .map(|relative| {
                    if self.progress.is_cancelled() {
                        return Err(AnalyzerError::Cancelled);
                    }
                    let outcome = self.analyze_file(&root, relative, &registry);
                    match outcome {
                        FileOutcome::Analyzed(_) => self.progress.inc(),
                        FileOutcome::Skipped(_) => self.progress.inc_skipped(),
                    }
                    Ok(outcome)
                })
                .collect()
        });
        self.progress.finish();
        let outcomes = outcomes?;

        let mut files = Vec::with_capacity(outcomes.len());
        let mut skipped = walked.skipped;
        for outcome in outcomes {
            match outcome {
                FileOutcome::Analyzed(file) => files.push(file),
                FileOutcome::Skipped(skip) => skipped.push(skip),
            }
        }
        skipped.sort_by(|a, b| a.path.cmp(&b.path));

        let graph = build_dependency_graph(&root, &files);
        let model = ProjectModel::assemble(root, files, graph, skipped);
        info!(
            "Analyzed {} files ({} lines), skipped {}, architecture: {}",
            model.files().len(),
            model.total_lines(),
            model.skipped().len(),
            model.architecture()
        );
        Ok(model)
    }

    fn thread_pool(&self) -> Result<rayon::ThreadPool> {
        let mut builder = ThreadPoolBuilder::new();
        if let Some(jobs) = self.jobs {
            builder = builder.num_threads(jobs);
        }
        builder
            .build()
            .map_err(|e| AnalyzerError::ThreadPool(e.to_string()))
    }

    fn analyze_file(&self, root: &Path, relative: &Path, registry: &LanguageRegistry) -> FileOutcome {
        let path = relative_key(relative);
        match self.read_source(&root.join(relative)) {
            Ok(text) => {
                let file = analyze_source(registry, path, &text);
                debug!(
                    "{}: {} ({} lines, {} classes, {} functions, {} imports)",
                    file.path,
                    file.language,
                    file.line_count,
                    file.classes.len(),
                    file.functions.len(),
                    file.imports.len()
                );
                FileOutcome::Analyzed(file)
            }
            Err(reason) => {
                warn!("Skipping {}: {}", path, reason);
                FileOutcome::Skipped(SkippedFile { path, reason })
            }
        }
    }

    fn read_source(&self, path: &Path) -> std::result::Result<String, SkipReason> {
        if let Some(limit) = self.max_file_bytes {
            let len = fs::metadata(path)
                .map_err(|e| SkipReason::Unreadable(e.to_string()))?
                .len();
            if len > limit {
                return Err(SkipReason::TooLarge(len));
            }
        }
        let bytes = fs::read(path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| SkipReason::InvalidEncoding(e.utf8_error().to_string()))
    }
}

/// Structural record for already-decoded file content.
pub fn analyze_source(registry: &LanguageRegistry, path: String, text: &str) -> SourceFile {
    let file_name = path.rsplit('/').next().unwrap_or(&path);
    let language = registry.detect(file_name);
    let is_build_artifact = BuildArtifactDetector::is_build_artifact(file_name);

    let extraction = StructuralExtractor::new(registry).extract(text, language);
    let purposes = PurposeClassifier::classify(&PurposeInput {
        path: &path,
        functions: &extraction.functions,
        classes: &extraction.classes,
        imports: &extraction.imports,
        text,
    });

    SourceFile {
        path,
        language,
        line_count: extraction.line_count,
        functions: extraction.functions,
        top_level_functions: extraction.top_level_functions,
        classes: extraction.classes,
        imports: extraction.imports,
        purposes,
        is_build_artifact,
    }
}

fn check_root(root: &Path) -> Result<PathBuf> {
    if !root.exists() {
        return Err(AnalyzerError::RootNotFound(root.to_path_buf()));
    }
    let not_readable = |source| AnalyzerError::RootNotReadable {
        path: root.to_path_buf(),
        source,
    };
    fs::read_dir(root).map_err(not_readable)?;
    root.canonicalize().map_err(not_readable)
}

fn build_dependency_graph(root: &Path, files: &[SourceFile]) -> DependencyGraph {
    let paths: Vec<String> = files.iter().map(|f| f.path.clone()).collect();
    let go_module = fs::read_to_string(root.join("go.mod"))
        .ok()
        .and_then(|content| parse_go_module(&content));
    let project = ProjectFiles::new(paths.clone()).with_go_module(go_module);
    let resolvers = ImportResolverRegistry::new();

    let mut graph = DependencyGraph::new(paths);
    for file in files {
        for import in &file.imports {
            let target = match resolvers.resolve(file.language, import, &file.path, &project) {
                Some(path) => DependencyTarget::Internal(path),
                None => DependencyTarget::External,
            };
            graph.add_edge(&file.path, target, import);
        }
    }
    debug!(
        "Dependency graph: {} internal edges, {} external edges",
        graph.internal_edges().count(),
        graph.external_edges().count()
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::purpose::PurposeTag;
    use crate::languages::LanguageTag;
    use tempfile::TempDir;

    fn create_file(dir: &Path, name: &str, content: &[u8]) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_analyze_source() {
        let registry = LanguageRegistry::new().unwrap();
        let file = analyze_source(
            &registry,
            "tests/test_cart.py".to_string(),
            "import pytest\n\nclass Cart:\n    pass\n\ndef test_total():\n    pass\n",
        );

        assert_eq!(file.language, LanguageTag::Python);
        assert_eq!(file.line_count, 8);
        assert_eq!(file.classes, vec!["Cart"]);
        assert_eq!(file.functions, vec!["test_total"]);
        assert_eq!(file.imports, vec!["pytest"]);
        assert!(file.purposes.contains(&PurposeTag::Test));
        assert!(!file.is_build_artifact);
    }

    #[test]
    fn test_build_artifact_flag() {
        let registry = LanguageRegistry::new().unwrap();
        let file = analyze_source(&registry, "api/package.json".to_string(), "{}\n");
        assert!(file.is_build_artifact);
        assert_eq!(file.language, LanguageTag::Unknown);
        assert!(file.functions.is_empty());
    }

    #[test]
    fn test_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let err = build_project_model(&missing, &IgnoreRules::default()).unwrap_err();
        assert!(matches!(err, AnalyzerError::RootNotFound(_)));
    }

    #[test]
    fn test_file_root_is_not_readable() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "a.py", b"x = 1\n");
        let err = build_project_model(&temp_dir.path().join("a.py"), &IgnoreRules::default())
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::RootNotReadable { .. }));
    }

    #[test]
    fn test_size_cap_skips_file() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "big.py", &vec![b'x'; 64]);
        create_file(temp_dir.path(), "small.py", b"def f():\n    pass\n");

        let model = ProjectModelBuilder::new(IgnoreRules::default())
            .max_file_bytes(Some(32))
            .build(temp_dir.path())
            .unwrap();

        assert_eq!(model.files().len(), 1);
        assert_eq!(model.files()[0].path, "small.py");
        assert_eq!(
            model.skipped(),
            &[SkippedFile {
                path: "big.py".to_string(),
                reason: SkipReason::TooLarge(64),
            }]
        );
    }

    #[test]
    fn test_cancelled_scan_returns_no_model() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "a.py", b"def a():\n    pass\n");

        let progress = ScanProgress::new();
        progress.cancel();
        let result = ProjectModelBuilder::new(IgnoreRules::default())
            .progress(progress)
            .build(temp_dir.path());

        assert!(matches!(result, Err(AnalyzerError::Cancelled)));
    }

    #[test]
    fn test_progress_counts() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "a.py", b"def a():\n    pass\n");
        create_file(temp_dir.path(), "b.bin", &[0xff, 0xfe, 0x00]);

        let builder = ProjectModelBuilder::new(IgnoreRules::default()).jobs(2);
        let handle = builder.progress_handle();
        builder.build(temp_dir.path()).unwrap();

        let snapshot = handle.snapshot();
        assert!(!snapshot.is_active);
        assert_eq!(snapshot.files_total, 2);
        assert_eq!(snapshot.files_processed, 2);
        assert_eq!(snapshot.files_skipped, 1);
    }

    #[test]
    fn test_go_module_imports_resolve() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "go.mod", b"module example.com/shop\n\ngo 1.22\n");
        create_file(
            temp_dir.path(),
            "main.go",
            b"package main\n\nimport (\n\t\"fmt\"\n\t\"example.com/shop/store\"\n)\n\nfunc main() {}\n",
        );
        create_file(temp_dir.path(), "store/store.go", b"package store\n\nfunc Open() {}\n");

        let model = build_project_model(temp_dir.path(), &IgnoreRules::default()).unwrap();
        let graph = model.dependency_graph();

        assert_eq!(graph.dependencies_of("main.go"), vec!["store/store.go"]);
        let external: Vec<_> = graph.external_edges().map(|e| e.import.as_str()).collect();
        assert_eq!(external, vec!["fmt"]);
        assert!(model.build_artifacts().contains("go.mod"));
    }
}
