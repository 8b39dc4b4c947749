use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;

use crate::indexer::filter::PathFilter;
use crate::model::{SkipReason, SkippedFile};

/// Outcome of one traversal: retained files and entries that could not be
/// visited. Both lists are sorted by relative path.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub files: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

/// Deterministic directory traversal with [`PathFilter`] pruning.
pub struct FileWalker {
    filter: PathFilter,
    respect_gitignore: bool,
}

impl FileWalker {
    pub fn new(filter: PathFilter) -> Self {
        Self {
            filter,
            respect_gitignore: false,
        }
    }

    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.respect_gitignore = yes;
        self
    }

    /// Returned file paths are relative to `root`.
    pub fn walk(&self, root: &Path) -> WalkOutcome {
        let filter = self.filter.clone();
        let prune_root = root.to_path_buf();

        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .git_ignore(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| match entry.path().strip_prefix(&prune_root) {
                Ok(relative) => !filter.should_ignore(relative),
                Err(_) => true,
            });

        let mut outcome = WalkOutcome::default();
        for result in builder.build() {
            match result {
                Ok(entry) => {
                    if !entry.file_type().is_some_and(|t| t.is_file()) {
                        continue;
                    }
                    if let Ok(relative) = entry.path().strip_prefix(root) {
                        outcome.files.push(relative.to_path_buf());
                    }
                }
                Err(err) => {
                    let path = error_path(&err)
                        .map(|p| relative_key(p.strip_prefix(root).unwrap_or(p)))
                        .unwrap_or_default();
                    tracing::warn!("Cannot walk {}: {}", path, err);
                    outcome.skipped.push(SkippedFile {
                        path,
                        reason: SkipReason::Unreadable(err.to_string()),
                    });
                }
            }
        }

        outcome.files.sort_by_key(|p| relative_key(p));
        outcome.skipped.sort_by(|a, b| a.path.cmp(&b.path));
        outcome
    }
}

/// `/`-joined form of a relative path, used as the file identity.
pub fn relative_key(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}
