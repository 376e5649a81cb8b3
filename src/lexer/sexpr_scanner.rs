use super::token::Token;

/// Scanner for parenthesized prefix-notation source
///
/// Produces exactly the tokens that padding every `(` and `)` with spaces and
/// splitting on whitespace would, while also recording line and column.
pub struct SExprScanner<'src> {
    /// Source code
    source: &'src str,
    /// Accumulated tokens
    tokens: Vec<Token<'src>>,
    /// Byte offset where the pending atom starts
    start: Option<usize>,
    /// Line of the pending atom
    start_line: usize,
    /// Column of the pending atom
    start_column: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
}

impl<'src> SExprScanner<'src> {
    /// Creates a new scanner from source code
    pub fn new(source: &'src str) -> Self {
        SExprScanner {
            source,
            tokens: Vec::new(),
            start: None,
            start_line: 1,
            start_column: 1,
            line: 1,
            column: 1,
        }
    }

    /// Scans all tokens from source code and returns them as a vector
    ///
    /// Never fails: any input produces a (possibly empty) token sequence.
    pub fn scan_tokens(mut self) -> Vec<Token<'src>> {
        for (offset, c) in self.source.char_indices() {
            match c {
                '(' | ')' => {
                    self.finish_atom(offset);
                    let lexeme = &self.source[offset..offset + c.len_utf8()];
                    self.tokens.push(Token::new(lexeme, self.line, self.column));
                }
                c if c.is_whitespace() => self.finish_atom(offset),
                _ => {
                    if self.start.is_none() {
                        self.start = Some(offset);
                        self.start_line = self.line;
                        self.start_column = self.column;
                    }
                }
            }

            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.finish_atom(self.source.len());
        self.tokens
    }

    fn finish_atom(&mut self, end: usize) {
        if let Some(start) = self.start.take() {
            self.tokens.push(Token::new(
                &self.source[start..end],
                self.start_line,
                self.start_column,
            ));
        }
    }
}

/// Tokenizes source text into an ordered sequence of tokens
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    SExprScanner::new(source).scan_tokens()
}
