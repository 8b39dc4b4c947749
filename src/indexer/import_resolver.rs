//! Import resolution: maps import identifiers, as written, to files of the
//! scanned project.
//!
//! Each resolver follows the module-path-to-file-path convention of its
//! language family. Anything a resolver cannot map is external.

use std::collections::HashSet;

use crate::languages::LanguageTag;

/// Relative paths of every scanned file, in traversal order.
pub struct ProjectFiles {
    paths: Vec<String>,
    lookup: HashSet<String>,
    go_module: Option<String>,
}

impl ProjectFiles {
    pub fn new(paths: Vec<String>) -> Self {
        let lookup = paths.iter().cloned().collect();
        Self {
            paths,
            lookup,
            go_module: None,
        }
    }

    /// Module path declared by the project's root `go.mod`.
    pub fn with_go_module(mut self, module: Option<String>) -> Self {
        self.go_module = module;
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.lookup.contains(path)
    }

    fn existing(&self, path: String) -> Option<String> {
        self.contains(&path).then_some(path)
    }

    /// First file equal to `suffix` or ending in `/suffix`.
    fn first_with_suffix(&self, suffix: &str) -> Option<String> {
        let slashed = format!("/{}", suffix);
        self.paths
            .iter()
            .find(|p| *p == suffix || p.ends_with(&slashed))
            .cloned()
    }

    /// The only file ending in `/suffix`; ambiguous matches resolve to none.
    fn unique_with_suffix(&self, suffix: &str) -> Option<String> {
        let slashed = format!("/{}", suffix);
        let mut matches = self
            .paths
            .iter()
            .filter(|p| *p == suffix || p.ends_with(&slashed));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.clone()),
            _ => None,
        }
    }

    /// First file directly inside `dir` with one of `extensions`, preferring
    /// files not matching `exclude_suffix`.
    fn first_in_dir(&self, dir: &str, extensions: &[&str], exclude_suffix: Option<&str>) -> Option<String> {
        let mut fallback = None;
        for path in &self.paths {
            if parent_dir(path) != dir || !has_extension(path, extensions) {
                continue;
            }
            match exclude_suffix {
                Some(excluded) if path.ends_with(excluded) => {
                    fallback.get_or_insert_with(|| path.clone());
                }
                _ => return Some(path.clone()),
            }
        }
        fallback
    }

    /// First file whose directory equals `dir_suffix` or ends in `/dir_suffix`.
    fn first_in_dir_suffix(&self, dir_suffix: &str, extensions: &[&str]) -> Option<String> {
        let slashed = format!("/{}", dir_suffix);
        self.paths
            .iter()
            .find(|p| {
                let dir = parent_dir(p);
                (dir == dir_suffix || dir.ends_with(&slashed)) && has_extension(p, extensions)
            })
            .cloned()
    }
}

/// Trait for language-specific import resolution
pub trait ImportResolver: Send + Sync {
    /// Project file imported by `import` from the file at `importer`.
    fn resolve(&self, import: &str, importer: &str, files: &ProjectFiles) -> Option<String>;

    /// Languages this resolver handles
    fn languages(&self) -> &'static [LanguageTag];
}

/// Python resolver
///
/// Handles dotted modules and relative dot-prefixes, resolving to `mod.py`
/// or `mod/__init__.py` below the importer's directory, the root, or `src/`.
pub struct PythonImportResolver;

impl ImportResolver for PythonImportResolver {
    fn resolve(&self, import: &str, importer: &str, files: &ProjectFiles) -> Option<String> {
        let dots = import.chars().take_while(|c| *c == '.').count();
        let module_path = import[dots..].replace('.', "/");

        if dots > 0 {
            let mut base = parent_dir(importer).to_string();
            for _ in 1..dots {
                base = parent_of_dir(&base)?.to_string();
            }
            return python_module_file(files, &base, &module_path);
        }

        if module_path.is_empty() {
            return None;
        }
        [parent_dir(importer), "", "src"]
            .into_iter()
            .find_map(|base| python_module_file(files, base, &module_path))
    }

    fn languages(&self) -> &'static [LanguageTag] {
        &[LanguageTag::Python]
    }
}

fn python_module_file(files: &ProjectFiles, base: &str, module_path: &str) -> Option<String> {
    let stem = join_normalize(base, module_path)?;
    if !module_path.is_empty() {
        if let Some(found) = files.existing(format!("{}.py", stem)) {
            return Some(found);
        }
    }
    files.existing(join_path(&stem, "__init__.py"))
}

const SCRIPT_EXTENSIONS: &[&str] = &["ts", "tsx", "d.ts", "js", "jsx", "mjs", "cjs", "mts", "cts"];

/// JavaScript / TypeScript resolver
///
/// Only relative specifiers are resolved; bare specifiers are packages.
/// Probes the exact path, added extensions, and `index.*`.
pub struct ScriptImportResolver;

impl ImportResolver for ScriptImportResolver {
    fn resolve(&self, import: &str, importer: &str, files: &ProjectFiles) -> Option<String> {
        if !(import.starts_with("./") || import.starts_with("../") || import == "." || import == "..") {
            return None;
        }
        let target = join_normalize(parent_dir(importer), import)?;

        if let Some(found) = files.existing(target.clone()) {
            return Some(found);
        }
        // ESM TypeScript imports name the emitted `.js` file
        if let Some(stem) = target.strip_suffix(".js") {
            for ext in ["ts", "tsx"] {
                if let Some(found) = files.existing(format!("{}.{}", stem, ext)) {
                    return Some(found);
                }
            }
        }
        SCRIPT_EXTENSIONS
            .iter()
            .find_map(|ext| files.existing(format!("{}.{}", target, ext)))
            .or_else(|| {
                SCRIPT_EXTENSIONS
                    .iter()
                    .find_map(|ext| files.existing(join_path(&target, &format!("index.{}", ext))))
            })
    }

    fn languages(&self) -> &'static [LanguageTag] {
        &[LanguageTag::JavaScript, LanguageTag::TypeScript]
    }
}

/// C / C++ resolver
///
/// Includes are tried against the importer's directory, the root, `include/`
/// and `src/`, then by a path suffix that only one project file carries.
pub struct NativeImportResolver;

impl ImportResolver for NativeImportResolver {
    fn resolve(&self, import: &str, importer: &str, files: &ProjectFiles) -> Option<String> {
        [parent_dir(importer), "", "include", "src"]
            .into_iter()
            .filter_map(|base| join_normalize(base, import))
            .find_map(|candidate| files.existing(candidate))
            .or_else(|| files.unique_with_suffix(import.trim_start_matches("./")))
    }

    fn languages(&self) -> &'static [LanguageTag] {
        &[LanguageTag::C, LanguageTag::Cpp]
    }
}

const JVM_EXTENSIONS: &[&str] = &["java", "kt", "kts"];

/// Java / Kotlin resolver
///
/// `com.example.Foo` matches any file ending in `com/example/Foo.java` (or
/// `.kt`), so source-set prefixes such as `src/main/java` need no
/// configuration. Static and nested imports fall back to the enclosing type;
/// wildcards pick the first file of the package directory.
pub struct JvmImportResolver;

impl ImportResolver for JvmImportResolver {
    fn resolve(&self, import: &str, _importer: &str, files: &ProjectFiles) -> Option<String> {
        if let Some(package) = import.strip_suffix(".*") {
            return files.first_in_dir_suffix(&package.replace('.', "/"), JVM_EXTENSIONS);
        }

        let path = import.replace('.', "/");
        let parent = parent_dir(&path);
        for candidate in [path.as_str(), parent] {
            if candidate.is_empty() {
                continue;
            }
            for ext in JVM_EXTENSIONS {
                if let Some(found) = files.first_with_suffix(&format!("{}.{}", candidate, ext)) {
                    return Some(found);
                }
            }
        }
        // Kotlin top-level functions live in arbitrarily named files
        if parent.contains('/') {
            return files.first_in_dir_suffix(parent, &["kt"]);
        }
        None
    }

    fn languages(&self) -> &'static [LanguageTag] {
        &[LanguageTag::Java, LanguageTag::Kotlin]
    }
}

/// C# resolver
///
/// `using A.B.C` matches a file `A/B/C.cs` or the first file of a directory
/// ending in `A/B/C`; the leading segment is dropped once since the root
/// namespace is usually the project name rather than a folder.
pub struct CSharpImportResolver;

impl ImportResolver for CSharpImportResolver {
    fn resolve(&self, import: &str, _importer: &str, files: &ProjectFiles) -> Option<String> {
        let full = import.replace('.', "/");
        let mut candidates = vec![full.clone()];
        if let Some((_, rest)) = full.split_once('/') {
            candidates.push(rest.to_string());
        }

        candidates.iter().find_map(|candidate| {
            files
                .first_with_suffix(&format!("{}.cs", candidate))
                .or_else(|| files.first_in_dir_suffix(candidate, &["cs"]))
        })
    }

    fn languages(&self) -> &'static [LanguageTag] {
        &[LanguageTag::CSharp]
    }
}

/// Go resolver
///
/// A package import resolves to the first non-test file of the package
/// directory. With a root `go.mod` the module prefix is stripped; without
/// one the import path is matched by its trailing segments.
pub struct GoImportResolver;

impl ImportResolver for GoImportResolver {
    fn resolve(&self, import: &str, _importer: &str, files: &ProjectFiles) -> Option<String> {
        let package_file = |dir: &str| files.first_in_dir(dir, &["go"], Some("_test.go"));

        if let Some(module) = files.go_module.as_deref() {
            if import == module {
                return package_file("");
            }
            return import
                .strip_prefix(module)
                .and_then(|rest| rest.strip_prefix('/'))
                .and_then(package_file);
        }

        let segments: Vec<&str> = import.split('/').collect();
        (0..segments.len())
            .map(|start| segments[start..].join("/"))
            .take_while(|dir| dir.contains('/') || segments.len() == 1)
            .find_map(|dir| package_file(&dir))
    }

    fn languages(&self) -> &'static [LanguageTag] {
        &[LanguageTag::Go]
    }
}

/// Module path declared in a `go.mod` file.
pub fn parse_go_module(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("module "))
        .map(|module| module.trim().trim_matches('"').to_string())
        .filter(|module| !module.is_empty())
}

/// Rust resolver
///
/// Handles `crate::`, `self::` and `super::` paths against the crate's `src/`
/// directory, taking the longest module prefix that exists as `a/b.rs` or
/// `a/b/mod.rs` and falling back to the module file of the prefix itself.
/// Bare paths from a crate root (`main.rs`, `lib.rs`) are tried as crate
/// paths; everything else is another crate.
pub struct RustImportResolver;

impl ImportResolver for RustImportResolver {
    fn resolve(&self, import: &str, importer: &str, files: &ProjectFiles) -> Option<String> {
        let (src_dir, importer_module) = rust_module_of(importer);
        let mut segments: Vec<&str> = import.trim_start_matches("::").split("::").collect();

        let base: Vec<String> = match segments.first().copied() {
            Some("crate") => {
                segments.remove(0);
                Vec::new()
            }
            Some("self") => {
                segments.remove(0);
                importer_module.clone()
            }
            Some("super") => {
                let mut module = importer_module.clone();
                while segments.first() == Some(&"super") {
                    segments.remove(0);
                    module.pop();
                }
                module
            }
            _ if importer_module.is_empty() && !import.starts_with("::") => Vec::new(),
            _ => return None,
        };
        let bare = base.is_empty() && segments.len() == import.split("::").count();

        for k in (1..=segments.len()).rev() {
            let module: Vec<&str> = base
                .iter()
                .map(String::as_str)
                .chain(segments[..k].iter().copied())
                .collect();
            if let Some(found) = rust_module_file(files, src_dir, &module) {
                return Some(found);
            }
        }
        if bare {
            return None;
        }
        let module: Vec<&str> = base.iter().map(String::as_str).collect();
        rust_module_file(files, src_dir, &module)
    }

    fn languages(&self) -> &'static [LanguageTag] {
        &[LanguageTag::Rust]
    }
}

/// Source directory of the enclosing crate and the module path of `importer`
/// inside it.
fn rust_module_of(importer: &str) -> (&str, Vec<String>) {
    let (src_dir, inner) = match importer.rfind("src/") {
        Some(idx) if idx == 0 || importer[..idx].ends_with('/') => {
            (&importer[..idx + 3], &importer[idx + 4..])
        }
        _ => ("", importer),
    };

    let mut module: Vec<String> = inner.split('/').map(str::to_string).collect();
    if let Some(last) = module.pop() {
        let stem = last.strip_suffix(".rs").unwrap_or(&last);
        let is_root = module.is_empty() && (stem == "lib" || stem == "main");
        if stem != "mod" && !is_root {
            module.push(stem.to_string());
        }
    }
    (src_dir, module)
}

fn rust_module_file(files: &ProjectFiles, src_dir: &str, module: &[&str]) -> Option<String> {
    if module.is_empty() {
        return ["lib.rs", "main.rs"]
            .into_iter()
            .find_map(|root| files.existing(join_path(src_dir, root)));
    }
    let path = join_path(src_dir, &module.join("/"));
    files
        .existing(format!("{}.rs", path))
        .or_else(|| files.existing(join_path(&path, "mod.rs")))
}

/// Ruby resolver: the importer's directory (`require_relative`), then the
/// root and `lib/` (`require`).
pub struct RubyImportResolver;

impl ImportResolver for RubyImportResolver {
    fn resolve(&self, import: &str, importer: &str, files: &ProjectFiles) -> Option<String> {
        let file = if import.ends_with(".rb") {
            import.to_string()
        } else {
            format!("{}.rb", import)
        };
        [parent_dir(importer), "", "lib"]
            .into_iter()
            .filter_map(|base| join_normalize(base, &file))
            .find_map(|candidate| files.existing(candidate))
    }

    fn languages(&self) -> &'static [LanguageTag] {
        &[LanguageTag::Ruby]
    }
}

/// PHP resolver
///
/// Namespaces follow PSR-4: `App\Models\User` matches `App/Models/User.php`,
/// `app/Models/User.php` or `Models/User.php` below any directory. Include
/// paths are relative to the importer, then the root.
pub struct PhpImportResolver;

impl ImportResolver for PhpImportResolver {
    fn resolve(&self, import: &str, importer: &str, files: &ProjectFiles) -> Option<String> {
        if import.ends_with(".php") || import.contains('/') {
            let relative = import.trim_start_matches('/');
            return [parent_dir(importer), ""]
                .into_iter()
                .filter_map(|base| join_normalize(base, relative))
                .find_map(|candidate| files.existing(candidate));
        }

        let path = import.trim_start_matches('\\').replace('\\', "/");
        let mut candidates = vec![path.clone()];
        if let Some((vendor, rest)) = path.split_once('/') {
            candidates.push(format!("{}/{}", vendor.to_lowercase(), rest));
            candidates.push(rest.to_string());
        }
        candidates
            .iter()
            .find_map(|candidate| files.first_with_suffix(&format!("{}.php", candidate)))
    }

    fn languages(&self) -> &'static [LanguageTag] {
        &[LanguageTag::Php]
    }
}

/// Swift resolver: a module import resolves to the first file of the
/// SwiftPM target directory `Sources/<Module>`.
pub struct SwiftImportResolver;

impl ImportResolver for SwiftImportResolver {
    fn resolve(&self, import: &str, _importer: &str, files: &ProjectFiles) -> Option<String> {
        let module = import.split('.').next()?;
        files.first_in_dir_suffix(&format!("Sources/{}", module), &["swift"])
    }

    fn languages(&self) -> &'static [LanguageTag] {
        &[LanguageTag::Swift]
    }
}

/// Registry of import resolvers
pub struct ImportResolverRegistry {
    resolvers: Vec<Box<dyn ImportResolver>>,
}

impl Default for ImportResolverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportResolverRegistry {
    pub fn new() -> Self {
        Self {
            resolvers: vec![
                Box::new(PythonImportResolver),
                Box::new(ScriptImportResolver),
                Box::new(NativeImportResolver),
                Box::new(JvmImportResolver),
                Box::new(CSharpImportResolver),
                Box::new(GoImportResolver),
                Box::new(RustImportResolver),
                Box::new(RubyImportResolver),
                Box::new(PhpImportResolver),
                Box::new(SwiftImportResolver),
            ],
        }
    }

    pub fn get(&self, language: LanguageTag) -> Option<&dyn ImportResolver> {
        self.resolvers
            .iter()
            .find(|r| r.languages().contains(&language))
            .map(|r| r.as_ref())
    }

    /// `None` means the import is external to the project.
    pub fn resolve(
        &self,
        language: LanguageTag,
        import: &str,
        importer: &str,
        files: &ProjectFiles,
    ) -> Option<String> {
        self.get(language)?.resolve(import, importer, files)
    }
}

fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Parent of a directory; `None` above the root.
fn parent_of_dir(dir: &str) -> Option<&str> {
    if dir.is_empty() {
        None
    } else {
        Some(parent_dir(dir))
    }
}

fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Joins `relative` onto `base` resolving `.` and `..`; `None` when the
/// result would leave the project root.
fn join_normalize(base: &str, relative: &str) -> Option<String> {
    let mut parts: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            s => parts.push(s),
        }
    }
    Some(parts.join("/"))
}

fn has_extension(path: &str, extensions: &[&str]) -> bool {
    path.rsplit_once('.')
        .is_some_and(|(_, ext)| extensions.contains(&ext))
}
