use super::ast::{Expression, Keyword, Number};
use crate::error::{Error, Result};
use crate::lexer::{tokenize, Token};
use crate::stack::ensure_sufficient_stack;

/// Recursive-descent parser over an immutable token slice
///
/// The parser owns only a cursor; the tokens are borrowed and never mutated,
/// so several parsers can read the same slice independently.
pub struct SExprParser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
}

impl<'a> SExprParser<'a> {
    /// Creates a new parser positioned at the first token
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        SExprParser { tokens, current: 0 }
    }

    /// Parses every remaining top-level form, in source order
    pub fn parse_program(&mut self) -> Result<Vec<Expression>> {
        let mut forms = Vec::new();

        while !self.is_at_end() {
            forms.push(self.parse_expression()?);
        }

        Ok(forms)
    }

    /// Parses a single form starting at the cursor
    pub fn parse_expression(&mut self) -> Result<Expression> {
        self.parse_form(false)
    }

    /// True once every token has been consumed
    pub fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Index of the next unconsumed token
    pub fn position(&self) -> usize {
        self.current
    }

    fn parse_form(&mut self, allow_empty_list: bool) -> Result<Expression> {
        ensure_sufficient_stack(|| self.parse_form_inner(allow_empty_list))
    }

    fn parse_form_inner(&mut self, allow_empty_list: bool) -> Result<Expression> {
        let token = match self.advance() {
            Some(token) => token,
            None => return Err(self.eof_error()),
        };

        if token.is_open() {
            return self.parse_list(token, allow_empty_list);
        }

        if token.is_close() {
            return Err(Error::malformed_at(
                token.line,
                token.column,
                "Unexpected `)` with no matching `(`",
            ));
        }

        if let Some(keyword) = Keyword::from_lexeme(token.lexeme) {
            return Ok(Expression::Keyword(keyword));
        }

        atom(token)
    }

    /// Parse the elements of a list; the opening `(` is already consumed
    fn parse_list(&mut self, open: &Token<'_>, allow_empty: bool) -> Result<Expression> {
        let mut items = Vec::new();

        loop {
            match self.peek() {
                None => {
                    return Err(Error::malformed_at(
                        open.line,
                        open.column,
                        "Missing closing `)` for `(`",
                    ))
                }
                Some(token) if token.is_close() => {
                    self.current += 1;
                    break;
                }
                Some(_) => {
                    // `(lambda () body)` is the only place `()` is legal
                    let params_slot =
                        matches!(items.as_slice(), [Expression::Keyword(Keyword::Lambda)]);
                    items.push(self.parse_form(params_slot)?);
                }
            }
        }

        if items.is_empty() && !allow_empty {
            return Err(Error::malformed_at(open.line, open.column, "Empty form `()`"));
        }

        Ok(Expression::List(items))
    }

    // Helper methods

    fn peek(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.current)
    }

    fn advance(&mut self) -> Option<&'a Token<'a>> {
        let token = self.tokens.get(self.current)?;
        self.current += 1;
        Some(token)
    }

    fn eof_error(&self) -> Error {
        Error::malformed("Unexpected end of input")
    }
}

/// Parses a whole program into one expression per top-level form
pub fn parse(source: &str) -> Result<Vec<Expression>> {
    let tokens = tokenize(source);
    SExprParser::new(&tokens).parse_program()
}

/// Parses the first form of a token sequence
///
/// Tokens after the first complete form are ignored.
pub fn parse_expression(tokens: &[Token<'_>]) -> Result<Expression> {
    SExprParser::new(tokens).parse_expression()
}

/// Atom resolution: integer, then decimal, otherwise symbol
fn atom(token: &Token<'_>) -> Result<Expression> {
    let text = token.lexeme;

    if is_integer_literal(text) {
        return text
            .parse::<i64>()
            .map(|n| Expression::Number(Number::Int(n)))
            .map_err(|_| {
                Error::malformed_at(
                    token.line,
                    token.column,
                    format!("Integer literal `{}` out of range", text),
                )
            });
    }

    if is_decimal_literal(text) {
        if let Ok(x) = text.parse::<f64>() {
            if !x.is_finite() {
                return Err(Error::malformed_at(
                    token.line,
                    token.column,
                    format!("Decimal literal `{}` out of range", text),
                ));
            }
            return Ok(Expression::Number(Number::Float(x)));
        }
    }

    Ok(Expression::Symbol(text.to_string()))
}

fn unsigned(text: &str) -> &str {
    text.strip_prefix(|c| c == '-' || c == '+').unwrap_or(text)
}

fn is_integer_literal(text: &str) -> bool {
    let digits = unsigned(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal_literal(text: &str) -> bool {
    let body = unsigned(text);
    body.bytes().filter(|b| *b == b'.').count() == 1
        && body.bytes().any(|b| b.is_ascii_digit())
        && body.bytes().all(|b| b == b'.' || b.is_ascii_digit())
}
