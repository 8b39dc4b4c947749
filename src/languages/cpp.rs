use super::{CommentSyntax, LanguageTag, Nesting, RuleSpec};

const NATIVE_RESERVED: &[&str] = &[
    "if", "for", "while", "switch", "return", "sizeof", "else", "catch", "delete", "new",
    "operator", "defined",
];

const INCLUDE: &str = r#"^\s*#\s*include\s*[<"]([^>"]+)[>"]"#;

pub const C: RuleSpec = RuleSpec {
    language: LanguageTag::C,
    extensions: &["c", "h"],
    classes: &[r"^\s*(?:typedef\s+)?(?:struct|union|enum)\s+([A-Za-z_]\w*)\s*(?:\{\s*)?$"],
    functions: &[
        r"^\s*(?:(?:static|inline|extern|const|unsigned|signed|struct|enum|volatile)\s+)*[A-Za-z_]\w*[\s*]+([A-Za-z_]\w*)\s*\([^;]*\)\s*\{?\s*$",
    ],
    imports: &[INCLUDE],
    import_block: None,
    reserved: NATIVE_RESERVED,
    nesting: Nesting::Braces,
    member_scopes: &[],
    methods: &[],
    comments: CommentSyntax::C_STYLE,
};

pub const CPP: RuleSpec = RuleSpec {
    language: LanguageTag::Cpp,
    extensions: &["cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx", "h", "ipp", "inl"],
    classes: &[
        r"^\s*(?:template\s*<[^>]*>\s*)?(?:class|struct|union)\s+(?:[A-Z_]+\s+)?([A-Za-z_]\w*)\s*(?:final\s*)?(?::[^;]*)?(?:\{.*)?$",
        r"^\s*enum\s+(?:class\s+|struct\s+)?([A-Za-z_]\w*)\s*(?::\s*[\w:]+\s*)?(?:\{.*)?$",
    ],
    functions: &[
        r"^\s*(?:template\s*<[^>]*>\s*)?(?:(?:static|inline|virtual|extern|constexpr|explicit|friend|const|unsigned|signed)\s+)*[A-Za-z_][\w:<>,]*[\s*&]+([A-Za-z_]\w*)\s*\([^;]*\)\s*(?:const\s*)?(?:noexcept\s*)?(?:override\s*)?(?:final\s*)?\{?\s*$",
        r"^\s*(?:[\w:<>,]+[\s*&]+)?(?:[A-Za-z_]\w*::)+~?([A-Za-z_]\w*)\s*\([^;]*$",
    ],
    imports: &[INCLUDE],
    import_block: None,
    reserved: NATIVE_RESERVED,
    nesting: Nesting::Braces,
    member_scopes: &[],
    methods: &[r"^\s*(?:[\w:<>,]+[\s*&]+)?(?:[A-Za-z_]\w*::)+~?[A-Za-z_]\w*\s*\("],
    comments: CommentSyntax::C_STYLE,
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
    fn test_c_functions_structs_and_includes() {
        let source = r#"
#include <stdio.h>
#include "util/list.h"

struct node {
    int value;
};

static int add(int a, int b) {
    if (a > b) {
        return a;
    }
    return add(b, a);
}

int main(void)
{
    printf("int fake(void) {\n");
    return 0;
}
"#;
        let result = extract(source, LanguageTag::C);
        assert_eq!(result.classes, vec!["node"]);
        assert_eq!(result.functions, vec!["add", "main"]);
        assert_eq!(result.imports, vec!["stdio.h", "util/list.h"]);
    }

    #[test]
    fn test_c_prototypes_are_not_definitions() {
        let result = extract("int helper(int x);\nstruct opaque;\n", LanguageTag::C);
        assert!(result.functions.is_empty());
        assert!(result.classes.is_empty());
    }

    #[test]
    fn test_cpp_classes_and_qualified_methods() {
        let source = r#"
#include "widget.hpp"

namespace ui {

template <typename T>
class Widget : public Base {
public:
    virtual void draw() const override;
};

enum class Color : int { Red, Green };

Widget::Widget(int size) : size_(size) {
}

void Widget::draw() const {
}

std::vector<int> collect(const std::string& name) {
    return {};
}

}
"#;
        let result = extract(source, LanguageTag::Cpp);
        assert_eq!(result.classes, vec!["Widget", "Color"]);
        assert_eq!(result.functions, vec!["Widget", "draw", "collect"]);
        assert_eq!(result.imports, vec!["widget.hpp"]);
    }
}
