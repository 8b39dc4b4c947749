use super::{CommentSyntax, LanguageTag, Nesting, RuleSpec};

pub const PHP: RuleSpec = RuleSpec {
    language: LanguageTag::Php,
    extensions: &["php", "phtml"],
    classes: &[
        r"^\s*(?:(?:abstract|final|readonly)\s+)*(?:class|interface|trait|enum)\s+([A-Za-z_]\w*)",
    ],
    functions: &[
        r"^\s*(?:(?:public|private|protected|static|abstract|final)\s+)*function\s+&?\s*([A-Za-z_]\w*)\s*\(",
    ],
    imports: &[
        r"^\s*use\s+(?:function\s+|const\s+)?\\?([A-Za-z_][\w\\]*)",
        r#"^\s*(?:require|require_once|include|include_once)\s*\(?\s*(?:__DIR__\s*\.\s*)?['"]([^'"]+)['"]"#,
    ],
    import_block: None,
    reserved: &[],
    nesting: Nesting::Braces,
    member_scopes: &[],
    methods: &[],
    comments: CommentSyntax {
        line: &["//", "#"],
        block: &[("/*", "*/")],
        strings: &['"', '\''],
        multiline_strings: &[],
    },
};
