//! Lexical analysis
//!
//! Converts source text into a stream of tokens. Parentheses are always
//! standalone tokens; everything else is split on whitespace.

mod sexpr_scanner;
mod token;

pub use sexpr_scanner::{tokenize, SExprScanner};
pub use token::Token;
