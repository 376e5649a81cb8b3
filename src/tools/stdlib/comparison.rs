//! Comparison tools

use std::cmp::Ordering;

use crate::error::Result;
use crate::runtime::Value;
use crate::tools::{require_at_least, require_number, Tool, ToolRegistry};

/// Register comparison tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register(GreaterTool);
    registry.register(LessTool);
    registry.register(EqualTool);
}

fn numeric_order(l: &Value, r: &Value) -> Result<Option<Ordering>> {
    Ok(match (l, r) {
        (Value::Int(l), Value::Int(r)) => Some(l.cmp(r)),
        _ => l.as_float()?.partial_cmp(&r.as_float()?),
    })
}

/// True when the first operand stands in `wanted` order to every other one
fn first_against_rest(name: &str, args: &[Value], wanted: Ordering) -> Result<Value> {
    require_at_least(name, args, 2)?;
    let first = require_number(&args[0])?;
    let mut holds = true;
    for arg in &args[1..] {
        // Type-check every operand even once the answer is known
        let order = numeric_order(first, require_number(arg)?)?;
        holds &= order == Some(wanted);
    }
    Ok(Value::Bool(holds))
}

/// Tool for `>`
///
/// Usage: `(> a b ...)`
/// Example: `(> 5 1 2)` returns true: 5 exceeds both 1 and 2
pub struct GreaterTool;

impl Tool for GreaterTool {
    fn name(&self) -> &str {
        ">"
    }

    fn description(&self) -> &str {
        "First number greater than every other"
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        first_against_rest(">", args, Ordering::Greater)
    }
}

/// Tool for `<`
///
/// Usage: `(< a b ...)`
pub struct LessTool;

impl Tool for LessTool {
    fn name(&self) -> &str {
        "<"
    }

    fn description(&self) -> &str {
        "First number less than every other"
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        first_against_rest("<", args, Ordering::Less)
    }
}

/// Tool for `=`
///
/// True when every adjacent pair of operands is equal. Numbers compare by
/// value across int and float; a bool never equals a number.
pub struct EqualTool;

impl Tool for EqualTool {
    fn name(&self) -> &str {
        "="
    }

    fn description(&self) -> &str {
        "Pairwise strict equality"
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        require_at_least("=", args, 2)?;
        Ok(Value::Bool(args.windows(2).all(|pair| pair[0] == pair[1])))
    }
}
