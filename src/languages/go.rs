use super::{CommentSyntax, ImportBlockSpec, LanguageTag, Nesting, RuleSpec};

pub const GO: RuleSpec = RuleSpec {
    language: LanguageTag::Go,
    extensions: &["go"],
    classes: &[r"^\s*type\s+([A-Za-z_]\w*)(?:\[[^\]]*\])?\s+(?:struct|interface)\b"],
    functions: &[r"^\s*func\s+(?:\([^)]*\)\s*)?([A-Za-z_]\w*)\s*[(\[]"],
    imports: &[r#"^\s*import\s+(?:[\w.]+\s+)?"([^"]+)""#],
    import_block: Some(ImportBlockSpec {
        open: r"^\s*import\s*\(\s*$",
        entry: r#"^\s*(?:[\w.]+\s+)?"([^"]+)""#,
        close: ")",
    }),
    reserved: &[],
    nesting: Nesting::Braces,
    member_scopes: &[],
    methods: &[r"^\s*func\s*\("],
    comments: CommentSyntax {
        line: &["//"],
        block: &[("/*", "*/")],
        strings: &['"', '\''],
        multiline_strings: &['`'],
    },
};

#[cfg(test)]
mod tests {
    use crate::indexer::extractor::StructuralExtractor;
    use crate::indexer::Extraction;
    use crate::languages::{LanguageRegistry, LanguageTag};

    fn extract(source: &str) -> Extraction {
        let registry = LanguageRegistry::new().unwrap();
        StructuralExtractor::new(&registry).extract(source, LanguageTag::Go)
    }

    #[test]
    fn test_go_import_block() {
        let source = r#"
package main

import (
	"fmt"
	log "github.com/sirupsen/logrus"
	_ "net/http/pprof"

	"example.com/app/internal/store"
)

import "os"
"#;
        let result = extract(source);
        assert_eq!(
            result.imports,
            vec![
                "fmt",
                "github.com/sirupsen/logrus",
                "net/http/pprof",
                "example.com/app/internal/store",
                "os"
            ]
        );
    }

    #[test]
    fn test_go_types_and_funcs() {
        let source = r#"
type Server struct {
	addr string
}

type Handler interface {
	Serve() error
}

type ID int

func NewServer(addr string) *Server {
	return &Server{addr: addr}
}

func (s *Server) Start() error {
	return nil
}

func Map[T any](items []T) []T { return items }
"#;
        let result = extract(source);
        assert_eq!(result.classes, vec!["Server", "Handler"]);
        assert_eq!(result.functions, vec!["NewServer", "Start", "Map"]);
    }
}
