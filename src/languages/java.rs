use super::{CommentSyntax, LanguageTag, Nesting, RuleSpec};

pub const JAVA: RuleSpec = RuleSpec {
    language: LanguageTag::Java,
    extensions: &["java"],
    classes: &[
        r"^\s*(?:(?:public|private|protected|static|final|abstract|sealed|non-sealed|strictfp)\s+)*(?:class|interface|enum|record|@interface)\s+([A-Za-z_$][\w$]*)",
    ],
    functions: &[
        // The return type is a primitive or a capitalised (possibly qualified)
        // type, so statements such as `return call(a,` never match.
        r"^\s*(?:(?:public|private|protected|static|final|abstract|synchronized|native|default|strictfp)\s+)*(?:<[^>]+>\s+)?(?:void|boolean|byte|char|short|int|long|float|double|var|(?:[a-z_$][\w$]*\.)*[A-Z_$][\w$]*)(?:<[^()]*>)?(?:\[\])*\s+([A-Za-z_$][\w$]*)\s*\([^;]*$",
        r"^\s*(?:public|private|protected)\s+([A-Z][\w$]*)\s*\([^;]*$",
    ],
    imports: &[r"^\s*import\s+(?:static\s+)?([\w.]+(?:\.\*)?)\s*;"],
    import_block: None,
    reserved: &[
        "if", "for", "while", "switch", "catch", "return", "new", "else", "throw", "synchronized",
        "try",
    ],
    nesting: Nesting::Braces,
    member_scopes: &[],
    methods: &[],
    comments: CommentSyntax::C_STYLE,
};

#[cfg(test)]
mod tests {
    use crate::indexer::extractor::StructuralExtractor;
    use crate::indexer::Extraction;
    use crate::languages::{LanguageRegistry, LanguageTag};

    fn extract(source: &str) -> Extraction {
        let registry = LanguageRegistry::new().unwrap();
        StructuralExtractor::new(&registry).extract(source, LanguageTag::Java)
    }

    #[test]
    fn test_java_class_methods_and_imports() {
        let source = r#"
package com.example.service;

import java.util.List;
import static org.junit.Assert.assertEquals;
import com.example.repo.*;

public class UserService implements Service {
    private final UserRepository repository;

    public UserService(UserRepository repository) {
        this.repository = repository;
    }

    @Override
    public List<User> findAll() {
        if (repository.isEmpty()) {
            return List.of();
        }
        return repository.findAll();
    }

    private static int count(String[] names) {
        for (String name : names) {
        }
        return 0;
    }
}

interface Service {}
enum Status { ACTIVE, INACTIVE }
"#;
        let result = extract(source);
        assert_eq!(result.classes, vec!["UserService", "Service", "Status"]);
        assert_eq!(result.functions, vec!["UserService", "findAll", "count"]);
        assert_eq!(
            result.imports,
            vec!["java.util.List", "org.junit.Assert.assertEquals", "com.example.repo.*"]
        );
    }

    #[test]
    fn test_java_wrapped_statements_are_not_methods() {
        let source = r#"
public class Runner {
    public int run() {
        return compute(a,
            b);
    }

    void check() {
        throw new IllegalStateException(
            "closed");
    }
}
"#;
        let result = extract(source);
        assert_eq!(result.functions, vec!["run", "check"]);
        assert_eq!(result.top_level_functions, 0);
    }

    #[test]
    fn test_java_abstract_declarations_are_skipped() {
        let source = "interface Repo {\n    User find(long id);\n}\n";
        let result = extract(source);
        assert_eq!(result.classes, vec!["Repo"]);
        assert!(result.functions.is_empty());
    }
}
