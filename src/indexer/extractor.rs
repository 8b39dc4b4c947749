use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::indexer::comments::strip_comments;
use crate::languages::{CommentSyntax, ExtractionRule, LanguageRegistry, LanguageTag, Nesting};

/// Names recovered from one file, in source order, de-duplicated by first
/// occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub imports: Vec<String>,
    /// Distinct function names declared outside any type or function body
    pub top_level_functions: usize,
    pub line_count: usize,
}

#[derive(Default)]
struct OrderedNames {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedNames {
    fn push(&mut self, name: &str) {
        if self.seen.insert(name.to_string()) {
            self.names.push(name.to_string());
        }
    }

    fn len(&self) -> usize {
        self.names.len()
    }

    fn into_vec(self) -> Vec<String> {
        self.names
    }
}

/// Heuristic, line-oriented extractor driven by the registry's rule tables.
pub struct StructuralExtractor<'a> {
    registry: &'a LanguageRegistry,
}

impl<'a> StructuralExtractor<'a> {
    pub fn new(registry: &'a LanguageRegistry) -> Self {
        Self { registry }
    }

    pub fn extract(&self, text: &str, language: LanguageTag) -> Extraction {
        let line_count = count_lines(text);

        let Some(rule) = self.registry.rule(language) else {
            return Extraction {
                line_count,
                ..Extraction::default()
            };
        };

        let stripped = strip_comments(text, rule.comments());
        let mut functions = OrderedNames::default();
        let mut classes = OrderedNames::default();
        let mut imports = OrderedNames::default();
        let mut top_level = OrderedNames::default();
        let mut scopes = ScopeTracker::default();
        let mut in_import_block = false;

        for line in stripped.lines() {
            if let Some(block) = rule.import_block() {
                if in_import_block {
                    if block.closes(line) {
                        in_import_block = false;
                    } else if let Some(name) = capture(block.entry(), line) {
                        imports.push(name);
                    }
                    continue;
                }
                if block.opens(line) {
                    in_import_block = true;
                    continue;
                }
            }

            // Classes win over functions, functions over imports.
            if let Some(name) = first_declaration(rule, rule.classes(), line) {
                classes.push(name);
                scopes.declare(Scope::Type);
            } else if let Some(name) = first_declaration(rule, rule.functions(), line) {
                functions.push(name);
                let is_top_level = match rule.nesting() {
                    Nesting::Indentation => !line.starts_with(char::is_whitespace),
                    Nesting::Braces => scopes.at_top_level() && !rule.is_method(line),
                };
                if is_top_level {
                    top_level.push(name);
                }
                scopes.declare(Scope::Callable);
            } else if let Some(list) = rule.imports().iter().find_map(|re| capture(re, line)) {
                for name in import_list(list) {
                    imports.push(name);
                }
            } else if rule.opens_member_scope(line) {
                scopes.declare(Scope::Type);
            }

            if rule.nesting() == Nesting::Braces {
                scopes.advance(line, rule.comments());
            }
        }

        Extraction {
            functions: functions.into_vec(),
            classes: classes.into_vec(),
            imports: imports.into_vec(),
            top_level_functions: top_level.len(),
            line_count,
        }
    }
}

/// Number of `'\n'`-separated segments; an empty file counts as one line.
pub fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}

/// Body kinds opened by `{`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Type,
    Callable,
    Block,
}

/// Open braces of a brace-nested file, each tagged with what opened it.
#[derive(Debug, Default)]
struct ScopeTracker {
    open: Vec<Scope>,
    /// Declaration seen whose body has not opened yet
    pending: Option<Scope>,
}

impl ScopeTracker {
    fn at_top_level(&self) -> bool {
        !self
            .open
            .iter()
            .any(|scope| matches!(scope, Scope::Type | Scope::Callable))
    }

    fn declare(&mut self, scope: Scope) {
        self.pending = Some(scope);
    }

    /// Consumes the braces of one comment-free line. Braces inside string
    /// literals do not count.
    fn advance(&mut self, line: &str, syntax: &CommentSyntax) {
        let mut quote: Option<char> = None;
        let mut escaped = false;

        for c in line.chars() {
            if let Some(open) = quote {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == open {
                    quote = None;
                }
                continue;
            }
            if syntax.strings.contains(&c) || syntax.multiline_strings.contains(&c) {
                quote = Some(c);
                continue;
            }
            match c {
                '{' => {
                    let scope = self.pending.take().unwrap_or(Scope::Block);
                    self.open.push(scope);
                }
                '}' => {
                    self.open.pop();
                }
                ';' => self.pending = None,
                _ => {}
            }
        }

        if self.pending == Some(Scope::Callable) && !continues_signature(line) {
            self.pending = None;
        }
    }
}

/// A function header without its body may still open one on a later line
/// (wrapped parameters, Allman braces). Expression bodies never do.
fn continues_signature(line: &str) -> bool {
    let trimmed = line.trim_end();
    trimmed.ends_with(['(', ','])
        || (trimmed.ends_with([')', '>']) && !trimmed.contains('='))
}

/// Splits a captured `a, b as c` list into module names.
fn import_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').filter_map(|item| item.split_whitespace().next())
}

fn capture<'t>(re: &Regex, line: &'t str) -> Option<&'t str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
}

fn first_declaration<'t>(rule: &ExtractionRule, patterns: &[Regex], line: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .filter_map(|re| capture(re, line))
        .find(|name| !rule.is_reserved(name))
}
