use super::{CommentSyntax, LanguageTag, Nesting, RuleSpec};

pub const CSHARP: RuleSpec = RuleSpec {
    language: LanguageTag::CSharp,
    extensions: &["cs", "csx"],
    classes: &[
        r"^\s*(?:\[[^\]]*\]\s*)*(?:(?:public|private|protected|internal|static|sealed|abstract|partial|readonly|ref|unsafe|new|file)\s+)*(?:class|interface|struct|enum|record(?:\s+struct|\s+class)?)\s+([A-Za-z_]\w*)",
    ],
    functions: &[
        r"^\s*(?:(?:public|private|protected|internal|static|virtual|override|abstract|sealed|async|extern|unsafe|new|partial|readonly)\s+)*[\w.<>\[\],?]+\s+([A-Za-z_]\w*)\s*(?:<[^>]*>)?\s*\([^;]*$",
        r"^\s*(?:public|private|protected|internal|static)\s+([A-Z]\w*)\s*\([^;]*$",
    ],
    imports: &[r"^\s*(?:global\s+)?using\s+(?:static\s+)?(?:[A-Za-z_]\w*\s*=\s*)?([A-Za-z_][\w.]*)\s*;"],
    import_block: None,
    reserved: &[
        "if", "for", "foreach", "while", "switch", "catch", "return", "using", "lock", "new",
        "nameof", "typeof", "else", "await", "throw", "fixed",
    ],
    nesting: Nesting::Braces,
    member_scopes: &[],
    methods: &[],
    comments: CommentSyntax::C_STYLE,
};
