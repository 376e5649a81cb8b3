//! Error types for the tinylisp interpreter

use thiserror::Error;

/// Interpreter errors
///
/// Every error aborts the current evaluation; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Source that cannot be parsed or a form that cannot be evaluated
    ///
    /// **Triggered by:** unmatched or missing parentheses, an empty form, a
    /// malformed special form, or a call whose head is not callable
    /// **Example:** `(+ 1 2))`, `()`, `(define 5 3)`, `(5 1 2)`
    #[error("Malformed input: {message}")]
    MalformedInput {
        /// Error description
        message: String,
    },

    /// Reference to a name with no binding anywhere in the environment chain
    ///
    /// **Example:** `x` (when x was never defined)
    /// **Prevention:** define variables with `(define x value)` before use
    #[error("Unbound symbol: {name}")]
    UnboundSymbol {
        /// Symbol name
        name: String,
    },

    /// Operator or closure applied to the wrong number of arguments
    #[error("Arity mismatch calling {callee}: expected {expected}, got {got}")]
    ArityMismatch {
        /// Name of the operator, or `lambda` for anonymous closures
        callee: String,
        /// Human-readable expected count (e.g. `2`, `at least 2`)
        expected: String,
        /// Number of arguments supplied
        got: usize,
    },

    /// Operand of the wrong kind
    ///
    /// **Example:** `(+ square 1)` where `square` is a closure
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: String,
        /// Actual type
        got: String,
    },

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Integer arithmetic overflowed `i64`
    #[error("Integer overflow in {op}")]
    Overflow {
        /// Operator name
        op: String,
    },

    /// Evaluation nested deeper than the configured limit
    #[error("Recursion limit exceeded (max depth: {limit})")]
    RecursionLimitExceeded {
        /// Configured maximum depth
        limit: usize,
    },
}

/// Coarse error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad syntax or an unevaluable form
    MalformedInput,
    /// Name lookup failed
    UnboundSymbol,
    /// Wrong number or kind of arguments
    ArityOrType,
    /// Division by zero or overflow
    Arithmetic,
    /// Configured resource limit hit
    Resource,
}

impl Error {
    /// Create a malformed-input error with a message
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedInput {
            message: msg.into(),
        }
    }

    /// Create a malformed-input error pointing at a source position
    pub fn malformed_at(line: usize, col: usize, msg: impl Into<String>) -> Self {
        Error::MalformedInput {
            message: format!("{} at line {}, column {}", msg.into(), line, col),
        }
    }

    /// Create a type error from expected and actual type names
    pub fn type_error(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Error::TypeError {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Classify the error into its taxonomy category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::MalformedInput { .. } => ErrorCategory::MalformedInput,
            Error::UnboundSymbol { .. } => ErrorCategory::UnboundSymbol,
            Error::ArityMismatch { .. } | Error::TypeError { .. } => ErrorCategory::ArityOrType,
            Error::DivisionByZero | Error::Overflow { .. } => ErrorCategory::Arithmetic,
            Error::RecursionLimitExceeded { .. } => ErrorCategory::Resource,
        }
    }
}

/// Result type for interpreter operations
pub type Result<T> = std::result::Result<T, Error>;
