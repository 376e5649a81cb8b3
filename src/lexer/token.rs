use serde::Serialize;
use std::fmt;

/// A single token borrowed from the source text
///
/// Tokens carry no kind tag: the parser classifies them by content
/// (`(`, `)`, numeric literal, or symbol name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    /// Original text of the token
    pub lexeme: &'src str,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl<'src> Token<'src> {
    /// Creates a new token with the given properties
    pub fn new(lexeme: &'src str, line: usize, column: usize) -> Self {
        Token {
            lexeme,
            line,
            column,
        }
    }

    /// Returns the token text
    pub fn as_str(&self) -> &'src str {
        self.lexeme
    }

    /// True for `(`
    pub fn is_open(&self) -> bool {
        self.lexeme == "("
    }

    /// True for `)`
    pub fn is_close(&self) -> bool {
        self.lexeme == ")"
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme)
    }
}

impl PartialEq<str> for Token<'_> {
    fn eq(&self, other: &str) -> bool {
        self.lexeme == other
    }
}

impl PartialEq<&str> for Token<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.lexeme == *other
    }
}
