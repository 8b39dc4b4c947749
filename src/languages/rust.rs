use super::{CommentSyntax, LanguageTag, Nesting, RuleSpec};

pub const RUST: RuleSpec = RuleSpec {
    language: LanguageTag::Rust,
    extensions: &["rs"],
    classes: &[
        r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:unsafe\s+)?(?:struct|enum|trait|union)\s+([A-Za-z_]\w*)",
    ],
    functions: &[
        r#"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:default\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+(?:"[^"]*"\s+)?)?fn\s+([A-Za-z_]\w*)"#,
    ],
    imports: &[
        r"^\s*(?:pub(?:\([^)]*\))?\s+)?use\s+((?:::)?[A-Za-z_]\w*(?:::[A-Za-z_]\w*)*)",
        r"^\s*extern\s+crate\s+([A-Za-z_]\w*)",
    ],
    import_block: None,
    reserved: &[],
    // `'` also opens lifetimes, so only double quotes delimit strings.
    nesting: Nesting::Braces,
    member_scopes: &[r"^\s*(?:unsafe\s+)?impl\b"],
    methods: &[],
    comments: CommentSyntax {
        line: &["//"],
        block: &[("/*", "*/")],
        strings: &['"'],
        multiline_strings: &[],
    },
};
