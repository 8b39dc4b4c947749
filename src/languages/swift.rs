use super::{CommentSyntax, LanguageTag, Nesting, RuleSpec};

pub const SWIFT: RuleSpec = RuleSpec {
    language: LanguageTag::Swift,
    extensions: &["swift"],
    classes: &[
        r"^\s*(?:@\w+\s+)*(?:(?:public|private|fileprivate|internal|open|final|indirect)\s+)*(?:class|struct|enum|protocol|actor)\s+([A-Za-z_]\w*)",
    ],
    functions: &[
        r"^\s*(?:@\w+\s+)*(?:(?:public|private|fileprivate|internal|open|final|static|class|override|mutating|nonmutating|convenience|required|dynamic)\s+)*func\s+([A-Za-z_]\w*)",
    ],
    imports: &[
        r"^\s*(?:@testable\s+)?import\s+(?:(?:class|struct|enum|protocol|func|var|typealias)\s+)?([A-Za-z_][\w.]*)",
    ],
    import_block: None,
    // `class func` and `class var` look like class declarations.
    reserved: &["func", "var", "let"],
    nesting: Nesting::Braces,
    member_scopes: &[r"^\s*(?:(?:public|private|fileprivate|internal|open)\s+)?extension\s"],
    methods: &[],
    comments: CommentSyntax {
        line: &["//"],
        block: &[("/*", "*/"), ("\"\"\"", "\"\"\"")],
        strings: &['"'],
        multiline_strings: &[],
    },
};

#[cfg(test)]
mod tests {
    use crate::indexer::extractor::StructuralExtractor;
    use crate::indexer::Extraction;
    use crate::languages::{LanguageRegistry, LanguageTag};

    fn extract(source: &str) -> Extraction {
        let registry = LanguageRegistry::new().unwrap();
        StructuralExtractor::new(&registry).extract(source, LanguageTag::Swift)
    }

    #[test]
    fn test_swift_declarations() {
        let source = r#"
import UIKit
@testable import AppCore

protocol Loader {
    func load() async throws -> Data
}

final class ProfileViewController: UIViewController {
    class func make() -> ProfileViewController {
        return ProfileViewController()
    }

    override func viewDidLoad() {
        super.viewDidLoad()
    }
}

extension ProfileViewController: Loader {
    func load() async throws -> Data { Data() }
}

struct Point { var x: Int }
"#;
        let result = extract(source);
        assert_eq!(result.classes, vec!["Loader", "ProfileViewController", "Point"]);
        assert_eq!(result.functions, vec!["load", "make", "viewDidLoad"]);
        assert_eq!(result.imports, vec!["UIKit", "AppCore"]);
    }
}
