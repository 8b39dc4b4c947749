pub mod cpp;
pub mod csharp;
pub mod go;
pub mod java;
pub mod kotlin;
pub mod php;
pub mod python;
pub mod ruby;
pub mod rust;
pub mod swift;
pub mod typescript;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Source language of a scanned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Kotlin,
    C,
    Cpp,
    CSharp,
    Go,
    Rust,
    Ruby,
    Php,
    Swift,
    Dart,
    Scala,
    Shell,
    PowerShell,
    Unknown,
}

impl LanguageTag {
    pub const ALL: [LanguageTag; 18] = [
        LanguageTag::Python,
        LanguageTag::JavaScript,
        LanguageTag::TypeScript,
        LanguageTag::Java,
        LanguageTag::Kotlin,
        LanguageTag::C,
        LanguageTag::Cpp,
        LanguageTag::CSharp,
        LanguageTag::Go,
        LanguageTag::Rust,
        LanguageTag::Ruby,
        LanguageTag::Php,
        LanguageTag::Swift,
        LanguageTag::Dart,
        LanguageTag::Scala,
        LanguageTag::Shell,
        LanguageTag::PowerShell,
        LanguageTag::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::Python => "python",
            LanguageTag::JavaScript => "javascript",
            LanguageTag::TypeScript => "typescript",
            LanguageTag::Java => "java",
            LanguageTag::Kotlin => "kotlin",
            LanguageTag::C => "c",
            LanguageTag::Cpp => "cpp",
            LanguageTag::CSharp => "csharp",
            LanguageTag::Go => "go",
            LanguageTag::Rust => "rust",
            LanguageTag::Ruby => "ruby",
            LanguageTag::Php => "php",
            LanguageTag::Swift => "swift",
            LanguageTag::Dart => "dart",
            LanguageTag::Scala => "scala",
            LanguageTag::Shell => "shell",
            LanguageTag::PowerShell => "powershell",
            LanguageTag::Unknown => "unknown",
        }
    }

    /// Human-readable name used in reports and summaries
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageTag::Python => "Python",
            LanguageTag::JavaScript => "JavaScript",
            LanguageTag::TypeScript => "TypeScript",
            LanguageTag::Java => "Java",
            LanguageTag::Kotlin => "Kotlin",
            LanguageTag::C => "C",
            LanguageTag::Cpp => "C++",
            LanguageTag::CSharp => "C#",
            LanguageTag::Go => "Go",
            LanguageTag::Rust => "Rust",
            LanguageTag::Ruby => "Ruby",
            LanguageTag::Php => "PHP",
            LanguageTag::Swift => "Swift",
            LanguageTag::Dart => "Dart",
            LanguageTag::Scala => "Scala",
            LanguageTag::Shell => "Shell Script",
            LanguageTag::PowerShell => "PowerShell",
            LanguageTag::Unknown => "Unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tag| tag.as_str() == s)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comment and string-literal syntax of a language.
#[derive(Debug, Clone, Copy)]
pub struct CommentSyntax {
    /// Markers that comment out the rest of the line
    pub line: &'static [&'static str],
    /// Block comment delimiters (open, close); also used for doc-strings
    pub block: &'static [(&'static str, &'static str)],
    /// String delimiters that end at the closing quote or the end of the line
    pub strings: &'static [char],
    /// String delimiters that may span lines
    pub multiline_strings: &'static [char],
}

impl CommentSyntax {
    pub const C_STYLE: CommentSyntax = CommentSyntax {
        line: &["//"],
        block: &[("/*", "*/")],
        strings: &['"', '\''],
        multiline_strings: &[],
    };

    pub const NONE: CommentSyntax = CommentSyntax {
        line: &[],
        block: &[],
        strings: &[],
        multiline_strings: &[],
    };
}

/// Multi-line import group such as Go's `import ( ... )`.
#[derive(Debug, Clone, Copy)]
pub struct ImportBlockSpec {
    pub open: &'static str,
    pub entry: &'static str,
    pub close: &'static str,
}

/// How declarations nest, which decides whether a function is top-level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    /// Column zero is the top level
    Indentation,
    /// Top level is anything outside type and function bodies
    Braces,
}

/// Uncompiled extraction rule of one language.
///
/// Pattern lists are ordered; capture group 1 holds the extracted name.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub language: LanguageTag,
    pub extensions: &'static [&'static str],
    pub classes: &'static [&'static str],
    pub functions: &'static [&'static str],
    pub imports: &'static [&'static str],
    pub import_block: Option<ImportBlockSpec>,
    /// Captured names that are keywords, never declarations
    pub reserved: &'static [&'static str],
    pub nesting: Nesting,
    /// Lines opening a body whose functions are members, although the line
    /// itself declares no class (`impl Foo {`, `extension Foo {`)
    pub member_scopes: &'static [&'static str],
    /// Function lines that declare a member wherever they appear
    /// (Go receivers, out-of-class C++ definitions)
    pub methods: &'static [&'static str],
    pub comments: CommentSyntax,
}

/// Languages recognised by extension only; they get line counts but no
/// structural extraction.
const GENERIC_LANGUAGES: &[(LanguageTag, &[&str])] = &[
    (LanguageTag::Dart, &["dart"]),
    (LanguageTag::Scala, &["scala", "sc"]),
    (LanguageTag::Shell, &["sh", "bash", "zsh"]),
    (LanguageTag::PowerShell, &["ps1", "psm1", "psd1"]),
];

/// Registration order doubles as the tie-break priority for extensions
/// claimed by more than one language.
const RULE_SPECS: &[&RuleSpec] = &[
    &python::PYTHON,
    &typescript::TYPESCRIPT,
    &typescript::JAVASCRIPT,
    &java::JAVA,
    &kotlin::KOTLIN,
    &cpp::CPP,
    &cpp::C,
    &csharp::CSHARP,
    &go::GO,
    &rust::RUST,
    &ruby::RUBY,
    &php::PHP,
    &swift::SWIFT,
];

#[derive(Debug)]
pub struct ImportBlock {
    open: Regex,
    entry: Regex,
    close: &'static str,
}

impl ImportBlock {
    pub fn opens(&self, line: &str) -> bool {
        self.open.is_match(line)
    }

    pub fn closes(&self, line: &str) -> bool {
        line.trim_start().starts_with(self.close)
    }

    pub fn entry(&self) -> &Regex {
        &self.entry
    }
}

/// Compiled extraction rule for one language.
#[derive(Debug)]
pub struct ExtractionRule {
    language: LanguageTag,
    classes: Vec<Regex>,
    functions: Vec<Regex>,
    imports: Vec<Regex>,
    import_block: Option<ImportBlock>,
    reserved: &'static [&'static str],
    nesting: Nesting,
    member_scopes: Vec<Regex>,
    methods: Vec<Regex>,
    comments: CommentSyntax,
}

impl ExtractionRule {
    pub fn compile(spec: &RuleSpec) -> Result<Self> {
        let compile_all = |patterns: &[&str]| -> Result<Vec<Regex>> {
            patterns
                .iter()
                .map(|p| Regex::new(p).map_err(Into::into))
                .collect()
        };

        let import_block = match spec.import_block {
            Some(block) => Some(ImportBlock {
                open: Regex::new(block.open)?,
                entry: Regex::new(block.entry)?,
                close: block.close,
            }),
            None => None,
        };

        Ok(Self {
            language: spec.language,
            classes: compile_all(spec.classes)?,
            functions: compile_all(spec.functions)?,
            imports: compile_all(spec.imports)?,
            import_block,
            reserved: spec.reserved,
            nesting: spec.nesting,
            member_scopes: compile_all(spec.member_scopes)?,
            methods: compile_all(spec.methods)?,
            comments: spec.comments,
        })
    }

    pub fn language(&self) -> LanguageTag {
        self.language
    }

    pub fn classes(&self) -> &[Regex] {
        &self.classes
    }

    pub fn functions(&self) -> &[Regex] {
        &self.functions
    }

    pub fn imports(&self) -> &[Regex] {
        &self.imports
    }

    pub fn import_block(&self) -> Option<&ImportBlock> {
        self.import_block.as_ref()
    }

    pub fn comments(&self) -> &CommentSyntax {
        &self.comments
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(&name)
    }

    pub fn nesting(&self) -> Nesting {
        self.nesting
    }

    pub fn opens_member_scope(&self, line: &str) -> bool {
        self.member_scopes.iter().any(|re| re.is_match(line))
    }

    pub fn is_method(&self, line: &str) -> bool {
        self.methods.iter().any(|re| re.is_match(line))
    }
}

/// Extension table plus compiled extraction rules, built once per scan and
/// shared read-only between workers.
pub struct LanguageRegistry {
    rules: HashMap<LanguageTag, ExtractionRule>,
    extension_map: HashMap<&'static str, LanguageTag>,
}

impl LanguageRegistry {
    pub fn new() -> Result<Self> {
        let mut registry = Self {
            rules: HashMap::new(),
            extension_map: HashMap::new(),
        };

        for spec in RULE_SPECS {
            registry.register_extensions(spec.language, spec.extensions);
            registry
                .rules
                .insert(spec.language, ExtractionRule::compile(spec)?);
        }

        for (language, extensions) in GENERIC_LANGUAGES {
            registry.register_extensions(*language, extensions);
        }

        Ok(registry)
    }

    /// First registration of an extension wins.
    fn register_extensions(&mut self, language: LanguageTag, extensions: &[&'static str]) {
        for ext in extensions {
            self.extension_map.entry(*ext).or_insert(language);
        }
    }

    /// Detects the language of a file name by its longest known extension.
    pub fn detect(&self, file_name: &str) -> LanguageTag {
        for (idx, _) in file_name.match_indices('.') {
            let candidate = &file_name[idx + 1..];
            if candidate.is_empty() {
                continue;
            }
            if let Some(language) = self.lookup(candidate) {
                return language;
            }
        }
        LanguageTag::Unknown
    }

    pub fn detect_path(&self, path: &Path) -> LanguageTag {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| self.detect(n))
            .unwrap_or(LanguageTag::Unknown)
    }

    fn lookup(&self, ext: &str) -> Option<LanguageTag> {
        if let Some(language) = self.extension_map.get(ext) {
            return Some(*language);
        }
        if !ext.bytes().any(|b| b.is_ascii_uppercase()) {
            return None;
        }
        self.extension_map
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(ext))
            .map(|(_, language)| *language)
    }

    /// Extraction rule for a language, `None` for the generic fallback.
    pub fn rule(&self, language: LanguageTag) -> Option<&ExtractionRule> {
        self.rules.get(&language)
    }

    pub fn has_structural_rules(&self, language: LanguageTag) -> bool {
        self.rules.contains_key(&language)
    }

    pub fn extensions_for(&self, language: LanguageTag) -> Vec<&'static str> {
        let mut exts: Vec<&'static str> = self
            .extension_map
            .iter()
            .filter(|(_, l)| **l == language)
            .map(|(ext, _)| *ext)
            .collect();
        exts.sort_unstable();
        exts
    }

    pub fn supported_extensions(&self) -> Vec<&'static str> {
        let mut exts: Vec<&'static str> = self.extension_map.keys().copied().collect();
        exts.sort_unstable();
        exts
    }

    pub fn supported_languages(&self) -> Vec<LanguageTag> {
        LanguageTag::ALL
            .iter()
            .copied()
            .filter(|l| *l != LanguageTag::Unknown)
            .collect()
    }
}
