//! Runtime execution for tinylisp programs

mod environment;
mod lisp_evaluator;
mod value;

pub use environment::Environment;
pub use lisp_evaluator::{evaluate, evaluate_str, EvaluatorConfig, LispEvaluator};
pub use value::{Closure, Value};
