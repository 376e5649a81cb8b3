use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric literal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Integer literal
    Int(i64),
    /// Decimal literal
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            // Keep a decimal point so the text reads back as a Float
            Number::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Reserved words that introduce special forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    /// `(define name value)`
    Define,
    /// `(if condition consequent alternative)`
    If,
    /// `(lambda (params...) body)`
    Lambda,
}

impl Keyword {
    /// Looks up a keyword by its source spelling
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "define" => Some(Keyword::Define),
            "if" => Some(Keyword::If),
            "lambda" => Some(Keyword::Lambda),
            _ => None,
        }
    }

    /// Source spelling of the keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Define => "define",
            Keyword::If => "if",
            Keyword::Lambda => "lambda",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed expression tree
///
/// Serializes to the JSON shape `["+", 3, ["*", 2, 2]]`: numbers as numbers,
/// symbols and keywords as strings, lists as arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expression {
    /// Numeric literal
    Number(Number),
    /// Special-form keyword marker
    Keyword(Keyword),
    /// Name to resolve against an environment
    Symbol(String),
    /// Parenthesized form
    List(Vec<Expression>),
}

impl Expression {
    /// Integer literal expression
    pub fn int(n: i64) -> Self {
        Expression::Number(Number::Int(n))
    }

    /// Symbol expression
    pub fn symbol(name: impl Into<String>) -> Self {
        Expression::Symbol(name.into())
    }

    /// Returns the symbol name, if this is a symbol
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expression::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Renders the tree in its JSON shape
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Expression::Number(Number::Int(n)) => serde_json::Value::from(*n),
            Expression::Number(Number::Float(x)) => serde_json::Value::from(*x),
            Expression::Keyword(kw) => serde_json::Value::from(kw.as_str()),
            Expression::Symbol(name) => serde_json::Value::from(name.as_str()),
            Expression::List(items) => {
                serde_json::Value::Array(items.iter().map(Expression::to_json).collect())
            }
        }
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        // Flatten nested lists so dropping a deep tree does not recurse
        let Expression::List(items) = self else {
            return;
        };
        if !items.iter().any(|item| matches!(item, Expression::List(_))) {
            return;
        }

        let mut pending = std::mem::take(items);
        while let Some(mut item) = pending.pop() {
            if let Expression::List(children) = &mut item {
                pending.append(children);
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::Keyword(kw) => write!(f, "{}", kw),
            Expression::Symbol(name) => f.write_str(name),
            Expression::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}
