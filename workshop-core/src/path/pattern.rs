//! Compiles one line of an ignore file into a structured pattern.
//!
//! The grammar is the familiar gitignore one: `#` comments, `!` negation,
//! a leading or interior `/` anchors the pattern to its declaring directory,
//! a trailing `/` restricts it to directories, `*` and `?` glob within a
//! single path segment and `**` spans whole segments.

/// One matcher for a single path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// `**`: spans zero or more whole path segments.
    Recursive,
    /// Glob over exactly one segment; `*` and `?` never cross a separator.
    Glob(Vec<Token>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(char),
    /// `?`: exactly one character.
    AnyChar,
    /// `*`: zero or more characters.
    AnyRun,
}

#[derive(Debug, Clone)]
pub struct CompiledPattern {
    raw: String,
    negated: bool,
    directory_only: bool,
    anchored: bool,
    segments: Vec<Segment>,
}

impl CompiledPattern {
    /// Compile one raw ignore-file line. Returns `None` for blank lines,
    /// comments, and lines that strip down to nothing.
    ///
    /// Authoring errors are not fatal: a malformed glob compiles to a
    /// pattern that matches too little, never to an error.
    pub fn compile(line: &str) -> Option<Self> {
        let line = trim_trailing_whitespace(line);
        let stripped = line.trim_start();
        if stripped.is_empty() || stripped.starts_with('#') {
            return None;
        }

        let raw = line.to_string();
        let mut rest = line;

        let negated = match rest.strip_prefix('!') {
            Some(tail) => {
                rest = tail;
                true
            }
            None => false,
        };

        let mut anchored = match rest.strip_prefix('/') {
            Some(tail) => {
                rest = tail;
                true
            }
            None => false,
        };

        let directory_only = match strip_unescaped_trailing_slash(rest) {
            Some(tail) => {
                rest = tail;
                true
            }
            None => false,
        };

        // An interior slash also pins the pattern to its declaring directory.
        if rest.contains('/') {
            anchored = true;
        }

        if rest.is_empty() {
            return None;
        }

        let segments = rest.split('/').map(compile_segment).collect();

        Some(Self {
            raw,
            negated,
            directory_only,
            anchored,
            segments,
        })
    }

    /// The original rule text, kept for diagnostics.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn negated(&self) -> bool {
        self.negated
    }

    pub fn directory_only(&self) -> bool {
        self.directory_only
    }

    pub fn anchored(&self) -> bool {
        self.anchored
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Trailing spaces and tabs are ignored unless the last one is escaped with
/// a backslash.
fn trim_trailing_whitespace(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut end = bytes.len();
    while end > 0 && (bytes[end - 1] == b' ' || bytes[end - 1] == b'\t') {
        if end >= 2 && bytes[end - 2] == b'\\' {
            break;
        }
        end -= 1;
    }
    &line[..end]
}

fn strip_unescaped_trailing_slash(text: &str) -> Option<&str> {
    let tail = text.strip_suffix('/')?;
    if tail.ends_with('\\') {
        return None;
    }
    Some(tail)
}

fn compile_segment(segment: &str) -> Segment {
    if segment == "**" {
        return Segment::Recursive;
    }

    let mut tokens = Vec::new();
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        match c {
            '*' => tokens.push(Token::AnyRun),
            '?' => tokens.push(Token::AnyChar),
            '\\' => {
                // Backslash escapes the next character; a dangling backslash
                // is dropped.
                if let Some(escaped) = chars.next() {
                    tokens.push(Token::Literal(escaped));
                }
            }
            other => tokens.push(Token::Literal(other)),
        }
    }
    Segment::Glob(tokens)
}

/// Match a single-segment glob against one path segment.
pub(crate) fn glob_match(tokens: &[Token], text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    glob_match_inner(tokens, &chars)
}

fn glob_match_inner(tokens: &[Token], chars: &[char]) -> bool {
    match tokens.split_first() {
        None => chars.is_empty(),
        Some((Token::Literal(expected), rest)) => chars
            .split_first()
            .is_some_and(|(c, tail)| c == expected && glob_match_inner(rest, tail)),
        Some((Token::AnyChar, rest)) => chars
            .split_first()
            .is_some_and(|(_, tail)| glob_match_inner(rest, tail)),
        Some((Token::AnyRun, rest)) => {
            (0..=chars.len()).any(|skip| glob_match_inner(rest, &chars[skip..]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("# build artifacts")]
    #[case("  # indented comment")]
    #[case("/")]
    #[case("!")]
    fn compiles_to_nothing(#[case] line: &str) {
        assert!(CompiledPattern::compile(line).is_none());
    }

    #[test]
    fn plain_name_is_unanchored() {
        let pattern = CompiledPattern::compile("target").unwrap();
        assert!(!pattern.anchored());
        assert!(!pattern.negated());
        assert!(!pattern.directory_only());
        assert_eq!(pattern.segments().len(), 1);
    }

    #[test]
    fn leading_slash_anchors() {
        let pattern = CompiledPattern::compile("/build").unwrap();
        assert!(pattern.anchored());
        assert_eq!(pattern.raw(), "/build");
    }

    #[test]
    fn interior_slash_anchors() {
        let pattern = CompiledPattern::compile("src/generated").unwrap();
        assert!(pattern.anchored());
        assert_eq!(pattern.segments().len(), 2);
    }

    #[test]
    fn trailing_slash_marks_directory_only() {
        let pattern = CompiledPattern::compile("temp/").unwrap();
        assert!(pattern.directory_only());
        assert!(!pattern.anchored());
        assert_eq!(pattern.segments().len(), 1);
    }

    #[test]
    fn negation_is_stripped_before_parsing() {
        let pattern = CompiledPattern::compile("!keep.log").unwrap();
        assert!(pattern.negated());
        assert_eq!(pattern.raw(), "!keep.log");
    }

    #[test]
    fn double_star_becomes_recursive_segment() {
        let pattern = CompiledPattern::compile("**/logs").unwrap();
        assert_eq!(pattern.segments()[0], Segment::Recursive);
        assert!(pattern.anchored());
    }

    #[test]
    fn trailing_whitespace_is_trimmed() {
        let pattern = CompiledPattern::compile("*.log   ").unwrap();
        assert_eq!(pattern.raw(), "*.log");
    }

    #[test]
    fn escaped_trailing_space_is_kept() {
        let pattern = CompiledPattern::compile("name\\ ").unwrap();
        assert_eq!(pattern.raw(), "name\\ ");
        match &pattern.segments()[0] {
            Segment::Glob(tokens) => assert_eq!(tokens.last(), Some(&Token::Literal(' '))),
            Segment::Recursive => panic!("expected glob segment"),
        }
    }

    #[test]
    fn escaped_star_is_literal() {
        let pattern = CompiledPattern::compile("a\\*b").unwrap();
        match &pattern.segments()[0] {
            Segment::Glob(tokens) => {
                assert_eq!(
                    tokens,
                    &vec![
                        Token::Literal('a'),
                        Token::Literal('*'),
                        Token::Literal('b'),
                    ]
                );
            }
            Segment::Recursive => panic!("expected glob segment"),
        }
    }

    #[rstest]
    #[case("*.log", "error.log", true)]
    #[case("*.log", "log", false)]
    #[case("*", "anything", true)]
    #[case("*", "", true)]
    #[case("?at", "cat", true)]
    #[case("?at", "at", false)]
    #[case("a*c", "abc", true)]
    #[case("a*c", "ac", true)]
    #[case("a*c", "abd", false)]
    fn glob_cases(#[case] glob: &str, #[case] text: &str, #[case] expected: bool) {
        let pattern = CompiledPattern::compile(glob).unwrap();
        let Segment::Glob(tokens) = &pattern.segments()[0] else {
            panic!("expected glob segment");
        };
        assert_eq!(glob_match(tokens, text), expected, "{glob} vs {text}");
    }
}
