use std::collections::BTreeSet;
use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};

use crate::config::IgnoreConfig;
use crate::error::{AnalyzerError, Result};

pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    ".venv", "venv", ".env", "env", "node_modules", ".git", ".hg", ".svn", ".idea",
    "__pycache__", ".pytest_cache", ".mypy_cache", ".tox", "build", "dist", "target", ".gradle",
    ".mvn", "bin", "obj", ".vs", ".vscode", "coverage", ".nyc_output", "logs", "log", "tmp",
    "temp", ".tmp",
];

pub const DEFAULT_IGNORED_FILES: &[&str] = &[
    ".gitignore", ".DS_Store", "Thumbs.db", ".env", ".env.local", ".env.development",
    ".env.production", ".code-doc.toml",
];

pub const DEFAULT_IGNORED_SUFFIXES: &[&str] = &[
    ".pyc", ".pyo", ".class", ".o", ".obj", ".so", ".dll", ".dylib", ".exe", ".a", ".lib",
    ".egg-info", ".min.js",
];

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
struct GlobRule {
    pattern: Pattern,
    /// Patterns containing `/` match the whole relative path, others match
    /// any single segment.
    whole_path: bool,
}

/// Ignore table consulted by [`PathFilter`]. Built once per scan.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    dirs: BTreeSet<String>,
    files: BTreeSet<String>,
    suffixes: BTreeSet<String>,
    globs: Vec<GlobRule>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            dirs: DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            files: DEFAULT_IGNORED_FILES.iter().map(|s| s.to_string()).collect(),
            suffixes: DEFAULT_IGNORED_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            globs: Vec::new(),
        }
    }
}

impl IgnoreRules {
    /// A table that ignores nothing.
    pub fn empty() -> Self {
        Self {
            dirs: BTreeSet::new(),
            files: BTreeSet::new(),
            suffixes: BTreeSet::new(),
            globs: Vec::new(),
        }
    }

    /// Defaults extended with the `[ignore]` section of a config file.
    pub fn from_config(config: &IgnoreConfig) -> Result<Self> {
        let mut rules = Self::default();
        rules.dirs.extend(config.dirs.iter().cloned());
        rules.files.extend(config.files.iter().cloned());
        rules.suffixes.extend(config.suffixes.iter().cloned());
        for glob in &config.globs {
            rules.add_glob(glob)?;
        }
        Ok(rules)
    }

    pub fn with_dir(mut self, name: impl Into<String>) -> Self {
        self.dirs.insert(name.into());
        self
    }

    pub fn with_file(mut self, name: impl Into<String>) -> Self {
        self.files.insert(name.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffixes.insert(suffix.into());
        self
    }

    pub fn add_glob(&mut self, glob: &str) -> Result<()> {
        let pattern = Pattern::new(glob)
            .map_err(|e| AnalyzerError::Config(format!("Invalid ignore glob '{}': {}", glob, e)))?;
        self.globs.push(GlobRule {
            pattern,
            whole_path: glob.contains('/'),
        });
        Ok(())
    }

    fn matches_segment(&self, segment: &str) -> bool {
        self.dirs.contains(segment)
            || self.files.contains(segment)
            || self.suffixes.iter().any(|suffix| segment.ends_with(suffix.as_str()))
            || self
                .globs
                .iter()
                .any(|g| !g.whole_path && g.pattern.matches_with(segment, GLOB_OPTIONS))
    }

    fn matches_whole_path(&self, relative: &str) -> bool {
        self.globs
            .iter()
            .any(|g| g.whole_path && g.pattern.matches_with(relative, GLOB_OPTIONS))
    }
}

/// Decides whether a path below the scan root is excluded from analysis.
///
/// Rules align to full path segments: a `.git` rule excludes `.git/config`
/// but not `gitignore.py` or `my.git.notes`.
#[derive(Debug, Clone)]
pub struct PathFilter {
    rules: IgnoreRules,
}

impl PathFilter {
    pub fn new(rules: IgnoreRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &IgnoreRules {
        &self.rules
    }

    /// `relative` is interpreted relative to the scan root.
    pub fn should_ignore(&self, relative: &Path) -> bool {
        let mut joined = String::new();
        for component in relative.components() {
            let Component::Normal(segment) = component else {
                continue;
            };
            let segment = segment.to_string_lossy();
            if self.rules.matches_segment(&segment) {
                return true;
            }
            if !joined.is_empty() {
                joined.push('/');
            }
            joined.push_str(&segment);
        }
        !joined.is_empty() && self.rules.matches_whole_path(&joined)
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new(IgnoreRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> PathFilter {
        PathFilter::default()
    }

    #[test]
    fn test_ignores_default_directories() {
        let filter = filter();
        assert!(filter.should_ignore(Path::new("node_modules/react/index.js")));
        assert!(filter.should_ignore(Path::new(".git/config")));
        assert!(filter.should_ignore(Path::new("pkg/__pycache__/mod.cpython-311.pyc")));
        assert!(filter.should_ignore(Path::new("app/.venv/lib/site.py")));
        assert!(filter.should_ignore(Path::new("target")));
    }

    #[test]
    fn test_segments_not_substrings() {
        let filter = filter();
        assert!(!filter.should_ignore(Path::new("gitignore.py")));
        assert!(!filter.should_ignore(Path::new("src/my.git.notes.py")));
        assert!(!filter.should_ignore(Path::new("src/environment.py")));
        assert!(!filter.should_ignore(Path::new("src/builders/build_utils.py")));
        assert!(!filter.should_ignore(Path::new("targets/main.rs")));
    }

    #[test]
    fn test_ignores_files_and_suffixes() {
        let filter = filter();
        assert!(filter.should_ignore(Path::new(".DS_Store")));
        assert!(filter.should_ignore(Path::new("conf/.env.local")));
        assert!(filter.should_ignore(Path::new("pkg/mod.pyc")));
        assert!(filter.should_ignore(Path::new("static/app.min.js")));
        assert!(filter.should_ignore(Path::new("mypkg.egg-info/PKG-INFO")));
        assert!(!filter.should_ignore(Path::new("static/app.js")));
    }

    #[test]
    fn test_case_sensitive() {
        let filter = filter();
        assert!(!filter.should_ignore(Path::new("Build/main.c")));
        assert!(filter.should_ignore(Path::new("build/main.c")));
    }

    #[test]
    fn test_idempotent_and_order_independent() {
        let filter = filter();
        let paths = ["a/node_modules/x.js", "src/main.py", "dist/out.js", "lib/util.go"];
        let first: Vec<bool> = paths.iter().map(|p| filter.should_ignore(Path::new(p))).collect();
        let reversed: Vec<bool> = paths
            .iter()
            .rev()
            .map(|p| filter.should_ignore(Path::new(p)))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        assert_eq!(first, reversed);
        assert_eq!(first, vec![true, false, true, false]);
    }

    #[test]
    fn test_empty_rules_ignore_nothing() {
        let filter = PathFilter::new(IgnoreRules::empty());
        assert!(!filter.should_ignore(Path::new("node_modules/x.js")));
        assert!(!filter.should_ignore(Path::new("")));
    }

    #[test]
    fn test_builder_additions() {
        let rules = IgnoreRules::empty()
            .with_dir("vendor")
            .with_file("secrets.py")
            .with_suffix(".generated.ts");
        let filter = PathFilter::new(rules);
        assert!(filter.should_ignore(Path::new("vendor/lib.php")));
        assert!(filter.should_ignore(Path::new("app/secrets.py")));
        assert!(filter.should_ignore(Path::new("api/client.generated.ts")));
        assert!(!filter.should_ignore(Path::new("api/client.ts")));
    }

    #[test]
    fn test_glob_rules() {
        let mut rules = IgnoreRules::empty();
        rules.add_glob("*_pb2.py").unwrap();
        rules.add_glob("docs/**/*.py").unwrap();
        let filter = PathFilter::new(rules);
        assert!(filter.should_ignore(Path::new("proto/service_pb2.py")));
        assert!(filter.should_ignore(Path::new("docs/source/conf.py")));
        assert!(!filter.should_ignore(Path::new("src/docs/conf.py")));
        assert!(!filter.should_ignore(Path::new("src/service.py")));
    }

    #[test]
    fn test_invalid_glob_is_config_error() {
        let mut rules = IgnoreRules::empty();
        let err = rules.add_glob("[unclosed").unwrap_err();
        assert!(matches!(err, AnalyzerError::Config(_)));
    }

    #[test]
    fn test_from_config_extends_defaults() {
        let config = IgnoreConfig {
            dirs: vec!["third_party".to_string()],
            globs: vec!["*.gen.go".to_string()],
            ..IgnoreConfig::default()
        };
        let filter = PathFilter::new(IgnoreRules::from_config(&config).unwrap());
        assert!(filter.should_ignore(Path::new("third_party/x.c")));
        assert!(filter.should_ignore(Path::new("node_modules/x.js")));
        assert!(filter.should_ignore(Path::new("api/types.gen.go")));
    }
}
