use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::parser::{Expression, Number};
use crate::runtime::Environment;
use crate::tools::Tool;

/// Runtime value representation
#[derive(Clone)]
pub enum Value {
    /// Result of a `define` form or an empty program
    Null,
    /// Result of a comparison
    Bool(bool),
    /// 64-bit integer value
    Int(i64),
    /// 64-bit floating-point value
    Float(f64),
    /// Deferred alias to another binding, resolved on lookup
    ///
    /// The evaluator never produces these itself; they only appear when a
    /// caller seeds an environment with them.
    Symbol(String),
    /// Lambda function value
    Closure(Rc<Closure>),
    /// Built-in operator
    Builtin(Arc<dyn Tool>),
}

/// A lambda paired with the environment it was created in
pub struct Closure {
    /// Parameter names, bound positionally on application
    pub params: Vec<String>,
    /// Body expression
    pub body: Rc<Expression>,
    /// Captured environment (shared, not copied)
    pub env: Environment,
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The captured environment may contain this closure
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}

impl Value {
    /// Wraps a closure
    pub fn closure(params: Vec<String>, body: Expression, env: Environment) -> Self {
        Value::Closure(Rc::new(Closure {
            params,
            body: Rc::new(body),
            env,
        }))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Symbol(_) => "symbol".to_string(),
            Value::Closure(_) => "closure".to_string(),
            Value::Builtin(_) => "builtin".to_string(),
        }
    }

    /// Returns true if the value is truthy in a boolean context
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Symbol(_) | Value::Closure(_) | Value::Builtin(_) => true,
        }
    }

    /// True for `Int` and `Float`
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Returns the integer, without coercion
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            _ => Err(Error::type_error("int", self.type_name())),
        }
    }

    /// Converts a numeric value to a 64-bit float
    pub fn as_float(&self) -> Result<f64> {
        match self {
            Value::Float(f) => Ok(*f),
            Value::Int(n) => Ok(*n as f64),
            _ => Err(Error::type_error("number", self.type_name())),
        }
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Int(n) => Value::Int(n),
            Number::Float(f) => Value::Float(f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", Number::Float(*x)),
            Value::Symbol(name) => write!(f, "{}", name),
            Value::Closure(closure) => write!(f, "<lambda ({})>", closure.params.join(" ")),
            Value::Builtin(tool) => write!(f, "<builtin {}>", tool.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(n) => write!(f, "Int({})", n),
            Value::Float(x) => write!(f, "Float({:?})", x),
            Value::Symbol(name) => write!(f, "Symbol({:?})", name),
            Value::Closure(closure) => write!(f, "{:?}", closure),
            Value::Builtin(tool) => write!(f, "Builtin({:?})", tool.name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) => (*a as f64) == *b,
            (Value::Float(a), Value::Int(b)) => *a == (*b as f64),
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}
