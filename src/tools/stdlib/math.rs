//! Arithmetic tools
//!
//! Each operator takes two or more numbers and folds them left to right:
//! `(- 10 3 2)` is `(10 - 3) - 2`. Integer arithmetic is checked.

use crate::error::{Error, Result};
use crate::runtime::Value;
use crate::tools::{require_at_least, require_number, Tool, ToolRegistry};

/// Register math tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register(AddTool);
    registry.register(SubTool);
    registry.register(MulTool);
    registry.register(DivTool);
}

fn fold(
    name: &str,
    args: &[Value],
    step: impl Fn(&Value, &Value) -> Result<Value>,
) -> Result<Value> {
    require_at_least(name, args, 2)?;
    let mut acc = require_number(&args[0])?.clone();
    for arg in &args[1..] {
        acc = step(&acc, require_number(arg)?)?;
    }
    Ok(acc)
}

fn overflow(op: &str) -> Error {
    Error::Overflow { op: op.to_string() }
}

/// Tool for addition
///
/// Usage: `(+ a b ...)`
/// Example: `(+ 3 4 (+ 3 2))` returns `12`
pub struct AddTool;

impl Tool for AddTool {
    fn name(&self) -> &str {
        "+"
    }

    fn description(&self) -> &str {
        "Sum of two or more numbers"
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        fold("+", args, |l, r| match (l, r) {
            (Value::Int(l), Value::Int(r)) => {
                l.checked_add(*r).map(Value::Int).ok_or_else(|| overflow("+"))
            }
            _ => Ok(Value::Float(l.as_float()? + r.as_float()?)),
        })
    }
}

/// Tool for subtraction
///
/// Usage: `(- a b ...)`
/// Example: `(- 10 3 2)` returns `5`
pub struct SubTool;

impl Tool for SubTool {
    fn name(&self) -> &str {
        "-"
    }

    fn description(&self) -> &str {
        "First number minus each of the rest"
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        fold("-", args, |l, r| match (l, r) {
            (Value::Int(l), Value::Int(r)) => {
                l.checked_sub(*r).map(Value::Int).ok_or_else(|| overflow("-"))
            }
            _ => Ok(Value::Float(l.as_float()? - r.as_float()?)),
        })
    }
}

/// Tool for multiplication
///
/// Usage: `(* a b ...)`
/// Example: `(* -5 -5)` returns `25`
pub struct MulTool;

impl Tool for MulTool {
    fn name(&self) -> &str {
        "*"
    }

    fn description(&self) -> &str {
        "Product of two or more numbers"
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        fold("*", args, |l, r| match (l, r) {
            (Value::Int(l), Value::Int(r)) => {
                l.checked_mul(*r).map(Value::Int).ok_or_else(|| overflow("*"))
            }
            _ => Ok(Value::Float(l.as_float()? * r.as_float()?)),
        })
    }
}

/// Tool for division
///
/// Integer division that comes out even stays an integer; anything else
/// produces a float.
///
/// Usage: `(/ a b ...)`
/// Example: `(/ 8 2)` returns `4`, `(/ 7 2)` returns `3.5`
pub struct DivTool;

impl Tool for DivTool {
    fn name(&self) -> &str {
        "/"
    }

    fn description(&self) -> &str {
        "First number divided by each of the rest"
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        fold("/", args, |l, r| match (l, r) {
            (_, Value::Int(0)) => Err(Error::DivisionByZero),
            (Value::Int(l), Value::Int(r)) => match l.checked_rem(*r) {
                Some(0) => l.checked_div(*r).map(Value::Int).ok_or_else(|| overflow("/")),
                Some(_) => Ok(Value::Float(*l as f64 / *r as f64)),
                None => Err(overflow("/")),
            },
            _ => {
                let divisor = r.as_float()?;
                if divisor == 0.0 {
                    return Err(Error::DivisionByZero);
                }
                Ok(Value::Float(l.as_float()? / divisor))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Int).collect()
    }

    #[test]
    fn test_left_fold() {
        assert_eq!(AddTool.execute(&ints(&[3, 5, 2, 8])).unwrap(), Value::Int(18));
        assert_eq!(SubTool.execute(&ints(&[10, 3, 2])).unwrap(), Value::Int(5));
        assert_eq!(MulTool.execute(&ints(&[2, 3, 4])).unwrap(), Value::Int(24));
        assert_eq!(DivTool.execute(&ints(&[100, 5, 2])).unwrap(), Value::Int(10));
    }

    #[test]
    fn test_inexact_division_is_float() {
        assert_eq!(DivTool.execute(&ints(&[7, 2])).unwrap(), Value::Float(3.5));
    }

    #[test]
    fn test_mixed_operands() {
        let args = vec![Value::Int(1), Value::Float(0.5)];
        assert_eq!(AddTool.execute(&args).unwrap(), Value::Float(1.5));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            DivTool.execute(&ints(&[8, 0])).unwrap_err(),
            Error::DivisionByZero
        );
        let args = vec![Value::Float(1.0), Value::Float(0.0)];
        assert_eq!(DivTool.execute(&args).unwrap_err(), Error::DivisionByZero);
    }

    #[test]
    fn test_overflow() {
        let err = AddTool.execute(&ints(&[i64::MAX, 1])).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Arithmetic);
        let err = DivTool.execute(&ints(&[i64::MIN, -1])).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Arithmetic);
    }

    #[test]
    fn test_arity_and_type() {
        let err = AddTool.execute(&ints(&[1])).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ArityOrType);

        let err = AddTool.execute(&[Value::Int(1), Value::Bool(true)]).unwrap_err();
        assert_eq!(
            err,
            Error::TypeError {
                expected: "number".to_string(),
                got: "bool".to_string()
            }
        );
    }
}
