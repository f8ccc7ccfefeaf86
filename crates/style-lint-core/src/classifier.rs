//! Syntax-kind classification as an injected capability.
//!
//! The correction engine must never let a textual pattern fire on non-code
//! text. Rather than depending on a full parser, it consumes a classifier
//! that labels byte ranges as code, comment, or string. The engine can be
//! tested with [`AllCode`] independent of any real lexer.

use std::ops::Range;

/// Kind of a classified source range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// Plain source code.
    Code,
    /// Line or block comment, including delimiters and shebang lines.
    Comment,
    /// String literal, including quotes.
    String,
}

/// A classified byte range of a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxSpan {
    /// Byte range over the buffer contents.
    pub range: Range<usize>,
    /// Kind of the range.
    pub kind: SyntaxKind,
}

impl SyntaxSpan {
    fn new(range: Range<usize>, kind: SyntaxKind) -> Self {
        Self { range, kind }
    }
}

/// Labels source text with covering, non-overlapping [`SyntaxSpan`]s.
pub trait SyntaxClassifier: Send + Sync {
    /// Classifies the full contents, returning spans in ascending order
    /// that together cover `0..contents.len()`.
    fn classify(&self, contents: &str) -> Vec<SyntaxSpan>;
}

/// Trivial classifier that labels everything as code.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllCode;

impl SyntaxClassifier for AllCode {
    fn classify(&self, contents: &str) -> Vec<SyntaxSpan> {
        if contents.is_empty() {
            return Vec::new();
        }
        vec![SyntaxSpan::new(0..contents.len(), SyntaxKind::Code)]
    }
}

/// Default classifier for the linted language.
///
/// Recognizes `//` line comments, nestable `/* */` block comments,
/// double-quoted string literals with backslash escapes, and a `#!` shebang
/// first line (treated as a comment).
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceClassifier;

impl SyntaxClassifier for SourceClassifier {
    fn classify(&self, contents: &str) -> Vec<SyntaxSpan> {
        let bytes = contents.as_bytes();
        let mut spans = Vec::new();
        let mut code_start = 0usize;
        let mut i = 0usize;

        let mut flush_code = |spans: &mut Vec<SyntaxSpan>, start: usize, end: usize| {
            if end > start {
                spans.push(SyntaxSpan::new(start..end, SyntaxKind::Code));
            }
        };

        if bytes.starts_with(b"#!") {
            let end = line_end(bytes, 0);
            spans.push(SyntaxSpan::new(0..end, SyntaxKind::Comment));
            i = end;
            code_start = end;
        }

        while i < bytes.len() {
            match bytes[i] {
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    flush_code(&mut spans, code_start, i);
                    let end = line_end(bytes, i);
                    spans.push(SyntaxSpan::new(i..end, SyntaxKind::Comment));
                    i = end;
                    code_start = i;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    flush_code(&mut spans, code_start, i);
                    let end = block_comment_end(bytes, i);
                    spans.push(SyntaxSpan::new(i..end, SyntaxKind::Comment));
                    i = end;
                    code_start = i;
                }
                b'"' => {
                    flush_code(&mut spans, code_start, i);
                    let end = string_end(bytes, i);
                    spans.push(SyntaxSpan::new(i..end, SyntaxKind::String));
                    i = end;
                    code_start = i;
                }
                // Scanning byte-wise is safe: UTF-8 continuation bytes never
                // collide with the ASCII delimiters matched above.
                _ => i += 1,
            }
        }
        flush_code(&mut spans, code_start, bytes.len());
        spans
    }
}

/// Byte offset just past the end of the line starting at or containing `from`.
fn line_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| from + p)
}

/// Byte offset just past the `*/` closing the block comment opened at `from`.
fn block_comment_end(bytes: &[u8], from: usize) -> usize {
    let mut depth = 0usize;
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
            depth += 1;
            i += 2;
        } else if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
            depth -= 1;
            i += 2;
            if depth == 0 {
                return i;
            }
        } else {
            i += 1;
        }
    }
    bytes.len()
}

/// Byte offset just past the quote closing the string opened at `from`.
fn string_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(contents: &str) -> Vec<(SyntaxKind, String)> {
        SourceClassifier
            .classify(contents)
            .into_iter()
            .map(|s| (s.kind, contents[s.range].to_string()))
            .collect()
    }

    #[test]
    fn all_code_is_a_single_span() {
        let spans = AllCode.classify("let x = 1");
        assert_eq!(spans, vec![SyntaxSpan::new(0..9, SyntaxKind::Code)]);
        assert!(AllCode.classify("").is_empty());
    }

    #[test]
    fn line_comment_runs_to_end_of_line() {
        let spans = kinds("let x = 1 // trailing\nlet y = 2\n");
        assert_eq!(
            spans,
            vec![
                (SyntaxKind::Code, "let x = 1 ".to_string()),
                (SyntaxKind::Comment, "// trailing".to_string()),
                (SyntaxKind::Code, "\nlet y = 2\n".to_string()),
            ]
        );
    }

    #[test]
    fn block_comment_spans_lines_and_nests() {
        let spans = kinds("a\n/* outer /* inner */ still */\nb");
        assert_eq!(
            spans,
            vec![
                (SyntaxKind::Code, "a\n".to_string()),
                (
                    SyntaxKind::Comment,
                    "/* outer /* inner */ still */".to_string()
                ),
                (SyntaxKind::Code, "\nb".to_string()),
            ]
        );
    }

    #[test]
    fn string_literal_with_escapes() {
        let spans = kinds(r#"print("a \" b")"#);
        assert_eq!(
            spans,
            vec![
                (SyntaxKind::Code, "print(".to_string()),
                (SyntaxKind::String, r#""a \" b""#.to_string()),
                (SyntaxKind::Code, ")".to_string()),
            ]
        );
    }

    #[test]
    fn shebang_line_is_a_comment() {
        let spans = kinds("#!/usr/bin/env swift\nlet x = 1\n");
        assert_eq!(spans[0].0, SyntaxKind::Comment);
        assert_eq!(spans[0].1, "#!/usr/bin/env swift");
    }

    #[test]
    fn quotes_inside_comments_do_not_open_strings() {
        let spans = kinds("// \"not a string\"\nlet s = \"real\"\n");
        assert_eq!(spans[0].0, SyntaxKind::Comment);
        assert_eq!(spans[2].0, SyntaxKind::String);
        assert_eq!(spans[2].1, "\"real\"");
    }

    #[test]
    fn unterminated_constructs_extend_to_eof() {
        assert_eq!(kinds("/* open"), vec![(SyntaxKind::Comment, "/* open".into())]);
        assert_eq!(kinds("\"open"), vec![(SyntaxKind::String, "\"open".into())]);
    }

    #[test]
    fn spans_cover_contents_without_gaps() {
        let contents = "let a = \"x\" // c\n/* b */ let d = 2\n";
        let spans = SourceClassifier.classify(contents);
        let mut cursor = 0;
        for span in &spans {
            assert_eq!(span.range.start, cursor);
            cursor = span.range.end;
        }
        assert_eq!(cursor, contents.len());
    }
}
