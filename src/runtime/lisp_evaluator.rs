use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::parser::{parse, Expression, Keyword};
use crate::runtime::{Closure, Environment, Value};
use crate::stack::ensure_sufficient_stack;

/// Evaluator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Maximum number of nested closure calls before giving up
    pub max_depth: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig { max_depth: 10_000 }
    }
}

/// Tree-walking evaluator
///
/// Special forms:
/// - `(define name value)` - bind in the current environment
/// - `(if cond then else)` - evaluate exactly one branch
/// - `(lambda (params...) body)` - closure over the current environment
///
/// Every other list is an application of a built-in or a closure.
pub struct LispEvaluator {
    /// Environment top-level forms are evaluated in
    env: Environment,
    config: EvaluatorConfig,
    /// Closure calls currently in progress
    depth: usize,
}

impl LispEvaluator {
    /// Creates an evaluator over a fresh environment
    pub fn new() -> Self {
        Self::with_env(Environment::new())
    }

    /// Creates an evaluator that reads and writes `env`
    pub fn with_env(env: Environment) -> Self {
        LispEvaluator {
            env,
            config: EvaluatorConfig::default(),
            depth: 0,
        }
    }

    /// Replaces the configuration
    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self
    }

    /// The environment top-level forms are evaluated in
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Current configuration
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Parses and executes `source`
    pub fn eval_source(&mut self, source: &str) -> Result<Value> {
        let program = parse(source)?;
        self.execute(&program)
    }

    /// Executes top-level forms in order and returns the last value
    ///
    /// Definitions made by forms before a failing one stay in the environment.
    pub fn execute(&mut self, program: &[Expression]) -> Result<Value> {
        debug!(forms = program.len(), "executing program");
        let env = self.env.clone();
        let mut last_val = Value::Null;

        for form in program {
            last_val = self.evaluate_expression(form, &env)?;
        }

        Ok(last_val)
    }

    /// Evaluates a single expression against `env`
    pub fn evaluate_expression(&mut self, expr: &Expression, env: &Environment) -> Result<Value> {
        ensure_sufficient_stack(|| self.dispatch(expr, env))
    }

    fn dispatch(&mut self, expr: &Expression, env: &Environment) -> Result<Value> {
        match expr {
            Expression::Number(n) => Ok(Value::from(*n)),
            Expression::Symbol(name) => self.resolve_symbol(name, env),
            Expression::Keyword(kw) => Err(Error::malformed(format!(
                "`{}` is only valid at the head of a form",
                kw
            ))),
            Expression::List(items) => match items.split_first() {
                None => Err(Error::malformed("Cannot evaluate an empty form")),
                Some((Expression::Keyword(Keyword::Define), rest)) => self.eval_define(rest, env),
                Some((Expression::Keyword(Keyword::If), rest)) => self.eval_if(rest, env),
                Some((Expression::Keyword(Keyword::Lambda), rest)) => self.eval_lambda(rest, env),
                Some((head, args)) => self.eval_application(head, args, env),
            },
        }
    }

    /// Look up a symbol, following alias bindings to their target
    fn resolve_symbol(&mut self, name: &str, env: &Environment) -> Result<Value> {
        let mut value = env.lookup(name)?;
        let mut seen = HashSet::new();
        seen.insert(name.to_string());

        while let Value::Symbol(alias) = value {
            if !seen.insert(alias.clone()) {
                return Err(Error::malformed(format!(
                    "Symbol alias cycle through `{}`",
                    alias
                )));
            }
            value = env.lookup(&alias)?;
        }

        Ok(value)
    }

    /// (define name value) - bind in the calling environment
    fn eval_define(&mut self, args: &[Expression], env: &Environment) -> Result<Value> {
        let [target, value_expr] = args else {
            return Err(Error::malformed(format!(
                "`define` expects a name and a value, got {} argument(s)",
                args.len()
            )));
        };

        let name = target.as_symbol().ok_or_else(|| {
            Error::malformed(format!("`define` target must be a symbol, got `{}`", target))
        })?;

        let value = self.evaluate_expression(value_expr, env)?;
        debug!(name, value = %value, "define");
        env.define(name, value);

        Ok(Value::Null)
    }

    /// (if condition consequent alternative)
    fn eval_if(&mut self, args: &[Expression], env: &Environment) -> Result<Value> {
        let [condition, consequent, alternative] = args else {
            return Err(Error::malformed(format!(
                "`if` expects a condition and two branches, got {} argument(s)",
                args.len()
            )));
        };

        if self.evaluate_expression(condition, env)?.is_truthy() {
            self.evaluate_expression(consequent, env)
        } else {
            self.evaluate_expression(alternative, env)
        }
    }

    /// (lambda (params...) body)
    fn eval_lambda(&mut self, args: &[Expression], env: &Environment) -> Result<Value> {
        let [params, body] = args else {
            return Err(Error::malformed(format!(
                "`lambda` expects a parameter list and a body, got {} argument(s)",
                args.len()
            )));
        };

        let Expression::List(params) = params else {
            return Err(Error::malformed(format!(
                "`lambda` parameters must be a list, got `{}`",
                params
            )));
        };

        let mut names: Vec<String> = Vec::with_capacity(params.len());
        for param in params {
            let name = param.as_symbol().ok_or_else(|| {
                Error::malformed(format!("`lambda` parameter must be a symbol, got `{}`", param))
            })?;
            if names.iter().any(|existing| existing == name) {
                return Err(Error::malformed(format!(
                    "Duplicate `lambda` parameter `{}`",
                    name
                )));
            }
            names.push(name.to_string());
        }

        Ok(Value::closure(names, body.clone(), env.clone()))
    }

    /// (operator operands...) - evaluate the head, then the operands, then apply
    fn eval_application(
        &mut self,
        head: &Expression,
        args: &[Expression],
        env: &Environment,
    ) -> Result<Value> {
        let callee = self.evaluate_expression(head, env)?;
        if !matches!(callee, Value::Builtin(_) | Value::Closure(_)) {
            return Err(Error::malformed(format!(
                "`{}` is not callable (found {})",
                head,
                callee.type_name()
            )));
        }

        let values = args
            .iter()
            .map(|arg| self.evaluate_expression(arg, env))
            .collect::<Result<Vec<_>>>()?;

        let name = head.as_symbol().unwrap_or("lambda");
        self.apply(name, &callee, &values)
    }

    /// Applies a callable value to already-evaluated arguments
    ///
    /// `name` is only used in error messages.
    pub fn apply(&mut self, name: &str, callee: &Value, args: &[Value]) -> Result<Value> {
        match callee {
            Value::Builtin(tool) => {
                trace!(tool = tool.name(), args = args.len(), "calling builtin");
                tool.execute(args)
            }
            Value::Closure(closure) => self.apply_closure(name, closure, args),
            other => Err(Error::malformed(format!(
                "`{}` is not callable (found {})",
                name,
                other.type_name()
            ))),
        }
    }

    fn apply_closure(&mut self, name: &str, closure: &Closure, args: &[Value]) -> Result<Value> {
        if closure.params.len() != args.len() {
            return Err(Error::ArityMismatch {
                callee: name.to_string(),
                expected: closure.params.len().to_string(),
                got: args.len(),
            });
        }

        if self.depth >= self.config.max_depth {
            warn!(limit = self.config.max_depth, "recursion limit exceeded");
            return Err(Error::RecursionLimitExceeded {
                limit: self.config.max_depth,
            });
        }

        let frame = closure.env.child();
        for (param, arg) in closure.params.iter().zip(args) {
            frame.define(param.clone(), arg.clone());
        }

        trace!(
            closure = name,
            params = closure.params.len(),
            depth = self.depth,
            "applying closure"
        );
        self.depth += 1;
        let result = self.evaluate_expression(&closure.body, &frame);
        self.depth -= 1;
        result
    }
}

impl Default for LispEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluates every form of `source` against `env` and returns the last value
///
/// `env` is updated in place by `define` forms, including those that ran
/// before a failing form.
pub fn evaluate(source: &str, env: &Environment) -> Result<Value> {
    LispEvaluator::with_env(env.clone()).eval_source(source)
}

/// Evaluates `source` in a fresh environment
pub fn evaluate_str(source: &str) -> Result<Value> {
    LispEvaluator::new().eval_source(source)
}
