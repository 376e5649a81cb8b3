//! Parser module
//!
//! Turns tokens into one [`Expression`] tree per top-level form.

mod ast;
mod sexpr_parser;

pub use ast::{Expression, Keyword, Number};
pub use sexpr_parser::{parse, parse_expression, SExprParser};
