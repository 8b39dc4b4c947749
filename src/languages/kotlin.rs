use super::{CommentSyntax, LanguageTag, Nesting, RuleSpec};

pub const KOTLIN: RuleSpec = RuleSpec {
    language: LanguageTag::Kotlin,
    extensions: &["kt", "kts"],
    classes: &[
        r"^\s*(?:(?:public|private|protected|internal|open|abstract|sealed|data|enum|annotation|inner|value|final|expect|actual)\s+)*(?:class|interface|object)\s+([A-Za-z_]\w*)",
    ],
    functions: &[
        r"^\s*(?:(?:public|private|protected|internal|open|override|abstract|final|suspend|inline|operator|infix|tailrec|external|actual|expect)\s+)*fun\s+(?:<[^>]+>\s*)?(?:[\w.<>?]+\.)?([A-Za-z_]\w*)\s*\(",
    ],
    imports: &[r"^\s*import\s+([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*(?:\.\*)?)"],
    import_block: None,
    reserved: &[],
    nesting: Nesting::Braces,
    member_scopes: &[r"^\s*(?:(?:public|private|protected|internal)\s+)?companion\s+object\b"],
    methods: &[],
    comments: CommentSyntax {
        line: &["//"],
        block: &[("/*", "*/"), ("\"\"\"", "\"\"\"")],
        strings: &['"', '\''],
        multiline_strings: &[],
    },
};
