use super::{CommentSyntax, LanguageTag, Nesting, RuleSpec};

pub const PYTHON: RuleSpec = RuleSpec {
    language: LanguageTag::Python,
    extensions: &["py", "pyi", "pyw"],
    classes: &[r"^\s*class\s+([A-Za-z_]\w*)\s*[:(]"],
    functions: &[r"^\s*(?:async\s+)?def\s+([A-Za-z_]\w*)\s*\("],
    imports: &[
        r"^\s*from\s+(\.+[\w.]*|[A-Za-z_][\w.]*)\s+import\b",
        r"^\s*import\s+([A-Za-z_][\w.]*(?:\s+as\s+\w+)?(?:\s*,\s*[A-Za-z_][\w.]*(?:\s+as\s+\w+)?)*)",
    ],
    import_block: None,
    reserved: &[],
    nesting: Nesting::Indentation,
    member_scopes: &[],
    methods: &[],
    comments: CommentSyntax {
        line: &["#"],
        block: &[("\"\"\"", "\"\"\""), ("'''", "'''")],
        strings: &['"', '\''],
        multiline_strings: &[],
    },
};

#[cfg(test)]
mod tests {
    use crate::indexer::extractor::StructuralExtractor;
    use crate::languages::{LanguageRegistry, LanguageTag};

    fn extract(source: &str) -> crate::indexer::Extraction {
        let registry = LanguageRegistry::new().unwrap();
        StructuralExtractor::new(&registry).extract(source, LanguageTag::Python)
    }

    #[test]
    fn test_python_class_and_function() {
        let result = extract("class Foo:\n    pass\n\ndef bar():\n    return 1\n");
        assert_eq!(result.classes, vec!["Foo"]);
        assert_eq!(result.functions, vec!["bar"]);
    }

    #[test]
    fn test_python_methods_are_flat() {
        let source = r#"
class Service(Base):
    def __init__(self):
        pass

    async def handle(self, request):
        def inner():
            pass
"#;
        let result = extract(source);
        assert_eq!(result.classes, vec!["Service"]);
        assert_eq!(result.functions, vec!["__init__", "handle", "inner"]);
    }

    #[test]
    fn test_python_imports_as_written() {
        let source = r#"
import os
import numpy.linalg as la
from flask import Flask
from .models import User
from .. import settings
from . import views
"#;
        let result = extract(source);
        assert_eq!(
            result.imports,
            vec!["os", "numpy.linalg", "flask", ".models", "..", "."]
        );
    }

    #[test]
    fn test_python_import_lists_are_split() {
        let result = extract("import os, sys as system, json\nimport numpy as np\n");
        assert_eq!(result.imports, vec!["os", "sys", "json", "numpy"]);
    }

    #[test]
    fn test_python_top_level_functions() {
        let source = r#"
class Cart:
    def add(self, item):
        pass

    def total(self):
        def inner():
            pass

class Order:
    def submit(self):
        pass

def main():
    pass

async def serve():
    pass
"#;
        let result = extract(source);
        assert_eq!(result.functions, vec!["add", "total", "inner", "submit", "main", "serve"]);
        assert_eq!(result.top_level_functions, 2);
    }

    #[test]
    fn test_python_docstrings_and_comments_ignored() {
        let source = r##"
"""
class NotAClass:
def not_a_function():
"""
# def commented_out():
def real():
    '''def in_docstring(): '''
    return "# not a comment def fake():"
"##;
        let result = extract(source);
        assert!(result.classes.is_empty());
        assert_eq!(result.functions, vec!["real"]);
    }
}
