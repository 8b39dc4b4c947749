use crate::languages::CommentSyntax;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment(&'static str),
    Str { quote: char, multiline: bool },
}

/// Blanks comments (and doc-strings declared as block delimiters) out of
/// `text`, keeping every line break so line numbers stay aligned.
///
/// String literals are copied through untouched: comment markers inside them
/// are not comments, and import paths live inside them.
pub fn strip_comments(text: &str, syntax: &CommentSyntax) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = State::Code;
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        match state {
            State::Code => {
                if let Some((open, close)) = syntax
                    .block
                    .iter()
                    .find(|(open, _)| rest.starts_with(open))
                {
                    out.push(' ');
                    rest = &rest[open.len()..];
                    state = State::BlockComment(*close);
                    continue;
                }
                if syntax.line.iter().any(|marker| rest.starts_with(marker)) {
                    state = State::LineComment;
                    continue;
                }
                if syntax.strings.contains(&c) {
                    state = State::Str {
                        quote: c,
                        multiline: false,
                    };
                } else if syntax.multiline_strings.contains(&c) {
                    state = State::Str {
                        quote: c,
                        multiline: true,
                    };
                }
                out.push(c);
            }
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                }
            }
            State::BlockComment(close) => {
                if rest.starts_with(close) {
                    rest = &rest[close.len()..];
                    state = State::Code;
                    continue;
                }
                if c == '\n' {
                    out.push('\n');
                }
            }
            State::Str { quote, multiline } => {
                out.push(c);
                if c == '\\' {
                    rest = &rest[c.len_utf8()..];
                    if let Some(escaped) = rest.chars().next() {
                        out.push(escaped);
                        rest = &rest[escaped.len_utf8()..];
                    }
                    continue;
                }
                if c == quote || (c == '\n' && !multiline) {
                    state = State::Code;
                }
            }
        }
        rest = &rest[c.len_utf8()..];
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::python::PYTHON;

    #[test]
    fn test_line_comments_removed() {
        let out = strip_comments("let a = 1; // note\nlet b = 2;", &CommentSyntax::C_STYLE);
        assert_eq!(out, "let a = 1; \nlet b = 2;");
    }

    #[test]
    fn test_block_comment_keeps_newlines() {
        let source = "a /* one\ntwo\nthree */ b\nc";
        let out = strip_comments(source, &CommentSyntax::C_STYLE);
        assert_eq!(out, "a  \n\n b\nc");
        assert_eq!(out.lines().count(), source.lines().count());
    }

    #[test]
    fn test_markers_inside_strings_survive() {
        let source = r#"url = "http://example.com/*x*/"; // gone"#;
        let out = strip_comments(source, &CommentSyntax::C_STYLE);
        assert_eq!(out, r#"url = "http://example.com/*x*/"; "#);
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let source = r#"s = "a \" // still string"; // comment"#;
        let out = strip_comments(source, &CommentSyntax::C_STYLE);
        assert_eq!(out, r#"s = "a \" // still string"; "#);
    }

    #[test]
    fn test_unterminated_string_ends_at_newline() {
        let source = "x = 'it\n// comment\ny";
        let out = strip_comments(source, &CommentSyntax::C_STYLE);
        assert_eq!(out, "x = 'it\n\ny");
    }

    #[test]
    fn test_python_docstrings_blanked() {
        let source = "def f():\n    \"\"\"Doc\n    def g():\n    \"\"\"\n    return '#'  # real\n";
        let out = strip_comments(source, &PYTHON.comments);
        assert_eq!(out, "def f():\n     \n\n\n    return '#'  \n");
    }

    #[test]
    fn test_no_syntax_is_identity() {
        let source = "# not a comment\n// neither";
        assert_eq!(strip_comments(source, &CommentSyntax::NONE), source);
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        let source = "名前 = \"値\" # コメント\n";
        let out = strip_comments(source, &PYTHON.comments);
        assert_eq!(out, "名前 = \"値\" \n");
    }
}
