use super::{CommentSyntax, LanguageTag, Nesting, RuleSpec};

const SCRIPT_COMMENTS: CommentSyntax = CommentSyntax {
    line: &["//"],
    block: &[("/*", "*/")],
    strings: &['"', '\''],
    multiline_strings: &['`'],
};

const SCRIPT_RESERVED: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "function", "with", "else", "do", "new",
    "typeof", "await", "super", "constructor",
];

const SCRIPT_FUNCTIONS: &[&str] = &[
    r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)\s*[(<]",
    r"^\s*(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::[^=]+)?=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*(?::[^=]+)?=>|[A-Za-z_$][\w$]*\s*=>)",
    r"^\s*([A-Za-z_$][\w$]*)\s*:\s*(?:async\s+)?function\s*\(",
    // Parameter lists holding parens or quotes are calls taking callbacks.
    r#"^\s*(?:(?:public|private|protected|static|async|readonly|override|get|set)\s+)*([A-Za-z_$][\w$]*)\s*(?:<[^>]*>)?\s*\([^()'"`]*\)\s*(?::\s*[^{=;]+)?\{\s*$"#,
];

const SCRIPT_IMPORTS: &[&str] = &[
    r#"^\s*import\s+(?:type\s+)?(?:[^'"]*?\s+from\s+)?['"]([^'"]+)['"]"#,
    r#"^\s*\}\s*from\s+['"]([^'"]+)['"]"#,
    r#"^\s*export\s+[^'"]*?\s+from\s+['"]([^'"]+)['"]"#,
    r#"\brequire\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
    r#"\bimport\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
];

pub const JAVASCRIPT: RuleSpec = RuleSpec {
    language: LanguageTag::JavaScript,
    extensions: &["js", "jsx", "mjs", "cjs"],
    classes: &[r"^\s*(?:export\s+)?(?:default\s+)?class\s+([A-Za-z_$][\w$]*)"],
    functions: SCRIPT_FUNCTIONS,
    imports: SCRIPT_IMPORTS,
    import_block: None,
    reserved: SCRIPT_RESERVED,
    nesting: Nesting::Braces,
    member_scopes: &[],
    methods: &[],
    comments: SCRIPT_COMMENTS,
};

pub const TYPESCRIPT: RuleSpec = RuleSpec {
    language: LanguageTag::TypeScript,
    extensions: &["ts", "tsx", "mts", "cts", "d.ts"],
    classes: &[
        r"^\s*(?:export\s+)?(?:default\s+)?(?:declare\s+)?(?:abstract\s+)?class\s+([A-Za-z_$][\w$]*)",
        r"^\s*(?:export\s+)?(?:declare\s+)?(?:const\s+)?(?:interface|enum)\s+([A-Za-z_$][\w$]*)",
    ],
    functions: SCRIPT_FUNCTIONS,
    imports: SCRIPT_IMPORTS,
    import_block: None,
    reserved: SCRIPT_RESERVED,
    nesting: Nesting::Braces,
    member_scopes: &[],
    methods: &[],
    comments: SCRIPT_COMMENTS,
};

#[cfg(test)]
mod tests {
    use crate::indexer::extractor::StructuralExtractor;
    use crate::indexer::Extraction;
    use crate::languages::{LanguageRegistry, LanguageTag};

    fn extract(source: &str, language: LanguageTag) -> Extraction {
        let registry = LanguageRegistry::new().unwrap();
        StructuralExtractor::new(&registry).extract(source, language)
    }

    #[test]
    fn test_javascript_function_forms() {
        let source = r#"
function load(path) {
  return fetch(path);
}
export async function save(data) {}
const handler = (req, res) => {
  res.send("ok");
};
const square = x => x * x;
let legacy = function () {};
const helpers = {
  format: function (value) {},
};
"#;
        let result = extract(source, LanguageTag::JavaScript);
        assert_eq!(
            result.functions,
            vec!["load", "save", "handler", "square", "legacy", "format"]
        );
    }

    #[test]
    fn test_control_flow_is_not_a_method() {
        let source = r#"
class Cart {
  constructor(items) {
    this.items = items;
  }
  total() {
    if (this.items) {
      for (const item of this.items) {
      }
    }
    while (false) {
    }
  }
}
"#;
        let result = extract(source, LanguageTag::JavaScript);
        assert_eq!(result.classes, vec!["Cart"]);
        assert_eq!(result.functions, vec!["total"]);
    }

    #[test]
    fn test_javascript_imports() {
        let source = r#"
import React, { useState } from 'react';
import './styles.css';
import {
  a,
  b,
} from "../lib/util";
export { default as Button } from './Button';
const fs = require('fs');
const lazy = import('./lazy');
"#;
        let result = extract(source, LanguageTag::JavaScript);
        assert_eq!(
            result.imports,
            vec!["react", "./styles.css", "../lib/util", "./Button", "fs", "./lazy"]
        );
    }

    #[test]
    fn test_typescript_types_are_classes() {
        let source = r#"
export interface User {
  id: number;
}
export enum Role { Admin, Guest }
export abstract class Repo<T> {
  abstract find(id: number): T;
}
export function createUser(name: string): User {
  return { id: 1 };
}
const parse = (input: string): number => Number(input);
"#;
        let result = extract(source, LanguageTag::TypeScript);
        assert_eq!(result.classes, vec!["User", "Role", "Repo"]);
        assert_eq!(result.functions, vec!["createUser", "parse"]);
    }

    #[test]
    fn test_callback_calls_are_not_methods() {
        let source = r#"
describe('cart', function () {
  it('adds', function () {
    setTimeout(function () {
    }, 10);
  });
  items.forEach((item) => {
  });
});

function real() {}
"#;
        let result = extract(source, LanguageTag::JavaScript);
        assert_eq!(result.functions, vec!["real"]);
    }

    #[test]
    fn test_class_methods_are_not_top_level() {
        let source = r#"
export class Cart {
  private items: string[] = [];

  add(item: string): void {
    this.items.push(item);
  }
}

export function total(cart: Cart): number {
  const sum = (a: number, b: number) => a + b;
  return 0;
}

export const format = (value: number): string => {
  return value.toFixed(2);
};
"#;
        let result = extract(source, LanguageTag::TypeScript);
        assert_eq!(result.functions, vec!["add", "total", "sum", "format"]);
        assert_eq!(result.top_level_functions, 2);
    }

    #[test]
    fn test_template_literal_hides_comment_markers() {
        let source = "const url = `http://example.com\n// still string`;\nfunction after() {}\n";
        let result = extract(source, LanguageTag::JavaScript);
        assert_eq!(result.functions, vec!["after"]);
    }
}
