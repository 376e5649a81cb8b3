use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::Value;
use crate::tools::ToolRegistry;

/// Environment for variable scoping
///
/// A handle to one scope in a parent-linked chain. Cloning the handle shares
/// the scope, which is how closures capture their defining environment.
/// Every chain ends at a root scope holding the built-in operators; that
/// scope is never handed out, so callers cannot overwrite built-ins, only
/// shadow them.
#[derive(Clone)]
pub struct Environment {
    scope: Rc<RefCell<Scope>>,
}

/// Single scope in the environment
struct Scope {
    /// Variables defined in this scope
    variables: HashMap<String, Value>,
    /// Enclosing scope (None for the built-in root)
    parent: Option<Environment>,
}

impl Environment {
    /// Creates a global scope on top of the standard built-ins
    pub fn new() -> Self {
        Self::with_registry(&ToolRegistry::new())
    }

    /// Creates a global scope on top of the tools in `registry`
    pub fn with_registry(registry: &ToolRegistry) -> Self {
        let builtins = registry
            .iter()
            .map(|tool| (tool.name().to_string(), Value::Builtin(tool.clone())))
            .collect();
        let root = Environment::from_scope(builtins, None);
        root.child()
    }

    /// Creates a global scope pre-seeded with `bindings`
    pub fn with_bindings<I, K>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let env = Self::new();
        for (name, value) in bindings {
            env.define(name, value);
        }
        env
    }

    fn from_scope(variables: HashMap<String, Value>, parent: Option<Environment>) -> Self {
        Environment {
            scope: Rc::new(RefCell::new(Scope { variables, parent })),
        }
    }

    /// Creates a new empty scope whose parent is this one
    pub fn child(&self) -> Self {
        Environment::from_scope(HashMap::new(), Some(self.clone()))
    }

    /// Defines (or redefines) a variable in this scope
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.scope.borrow_mut().variables.insert(name.into(), value);
    }

    /// Gets a variable by name, searching this scope and then its parents
    pub fn get(&self, name: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let parent = {
                let scope = current.scope.borrow();
                if let Some(val) = scope.variables.get(name) {
                    return Some(val.clone());
                }
                scope.parent.clone()
            };
            current = parent?;
        }
    }

    /// Like [`Environment::get`], failing with `UnboundSymbol` on a miss
    pub fn lookup(&self, name: &str) -> Result<Value> {
        self.get(name).ok_or_else(|| Error::UnboundSymbol {
            name: name.to_string(),
        })
    }

    /// Checks if a name is bound anywhere in the chain
    pub fn exists(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns a copy of the bindings defined directly in this scope
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.scope.borrow().variables.clone()
    }

    /// Number of scopes in the chain, the built-in root included
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut parent = self.scope.borrow().parent.clone();
        while let Some(env) = parent {
            depth += 1;
            parent = env.scope.borrow().parent.clone();
        }
        depth
    }

    /// True when both handles point at the same scope
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.scope, &other.scope)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values are left out: closures stored here capture this scope
        let scope = self.scope.borrow();
        let mut names: Vec<&String> = scope.variables.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("depth", &self.depth())
            .finish()
    }
}
