//! # tinylisp - A Small Lisp Interpreter
//!
//! A minimal Lisp dialect with integer and float arithmetic, comparisons,
//! `define`, `if` and `lambda` with lexical closures.
//!
//! ## Quick Start
//!
//! ```rust
//! use tinylisp::{evaluate_str, Value};
//!
//! # fn main() -> tinylisp::Result<()> {
//! let result = evaluate_str("(+ 3 4 (+ 3 2))")?;
//! assert_eq!(result, Value::Int(12));
//! # Ok(())
//! # }
//! ```
//!
//! ### Step by Step
//!
//! Each stage is usable on its own:
//!
//! ```rust
//! use tinylisp::{Evaluator, Parser, Scanner, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = r#"
//!     (define square (lambda (x) (* x x)))
//!     (square 5)
//! "#;
//!
//! // Tokenize (scan)
//! let tokens = Scanner::new(code).scan_tokens();
//!
//! // Parse into AST
//! let program = Parser::new(&tokens).parse_program()?;
//!
//! // Execute
//! let mut evaluator = Evaluator::new();
//! let result = evaluator.execute(&program)?;
//!
//! assert_eq!(result, Value::Int(25));
//! # Ok(())
//! # }
//! ```
//!
//! ### Sharing an Environment
//!
//! Definitions persist in the environment passed to [`evaluate`], so
//! successive calls see each other's bindings:
//!
//! ```rust
//! use tinylisp::{evaluate, Environment, Value};
//!
//! # fn main() -> tinylisp::Result<()> {
//! let env = Environment::new();
//! evaluate("(define offset 100)", &env)?;
//! evaluate("(define shift (lambda (n) (+ n offset)))", &env)?;
//!
//! assert_eq!(evaluate("(shift 1)", &env)?, Value::Int(101));
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! - **Numbers**: `42`, `-7`, `2.5`
//! - **Arithmetic**: `(+ 1 2 3)`, `(- 10 3)`, `(* 2 3)`, `(/ 10 2)`
//! - **Comparison**: `(> x y)`, `(< x y)`, `(= x y)`
//! - `(define name value)` - bind a name in the current scope
//! - `(if condition then else)` - only the chosen branch is evaluated
//! - `(lambda (params...) body)` - closure over the defining scope
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner → Tokens → Parser → AST → Evaluator → Value
//! ```
//!
//! - [`Scanner`] - Splits source text into tokens
//! - [`Parser`] - Builds one [`Expression`] per top-level form
//! - [`Evaluator`] - Executes the AST against an [`Environment`]
//! - [`ToolRegistry`] - Built-in operators
//!
//! ## Error Handling
//!
//! ```rust
//! use tinylisp::{evaluate_str, Error};
//!
//! let err = evaluate_str("(/ 10 0)").unwrap_err();
//! assert_eq!(err, Error::DivisionByZero);
//! assert!(err.to_string().contains("Division by zero"));
//! ```

/// Version of the tinylisp interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;
mod stack;
pub mod tools;

// Re-export main types
pub use error::{Error, ErrorCategory, Result};
pub use lexer::{tokenize, SExprScanner, Token};
pub use parser::{parse, parse_expression, Expression, Keyword, Number, SExprParser};
pub use runtime::{
    evaluate, evaluate_str, Closure, Environment, EvaluatorConfig, LispEvaluator, Value,
};
pub use tools::{Tool, ToolRegistry};

/// Type alias for the S-expression scanner (lexer).
/// Converts raw source text into tokens for the parser.
pub type Scanner<'src> = SExprScanner<'src>;

/// Type alias for the S-expression parser.
/// Converts tokens into an abstract syntax tree (AST).
pub type Parser<'a> = SExprParser<'a>;

/// Type alias for the Lisp evaluator (interpreter).
/// Executes the AST and produces runtime values.
pub type Evaluator = LispEvaluator;
