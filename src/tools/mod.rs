//! Built-in operators
//!
//! Every operator the root environment exposes is a [`Tool`]. The standard
//! set (`+ - * / > < =`) lives in [`stdlib`]; hosts can register more.

pub mod stdlib;

use crate::error::{Error, Result};
use crate::runtime::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool trait - all built-in operators implement this
pub trait Tool: Send + Sync {
    /// Name the tool is bound under in the root environment
    fn name(&self) -> &str;

    /// Tool description
    fn description(&self) -> &str;

    /// Execute the tool on already-evaluated arguments
    fn execute(&self, args: &[Value]) -> Result<Value>;
}

/// Tool registry
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create new registry with standard library
    pub fn new() -> Self {
        let mut registry = ToolRegistry {
            tools: HashMap::new(),
        };

        stdlib::register_all(&mut registry);

        registry
    }

    /// Create empty registry (for testing)
    pub fn empty() -> Self {
        ToolRegistry {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Get tool by name
    pub fn get(&self, name: &str) -> Result<Arc<dyn Tool>> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnboundSymbol {
                name: name.to_string(),
            })
    }

    /// Iterate over the registered tools
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.values()
    }

    /// Sorted names of the registered tools
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// `(name, description)` of every registered tool, sorted by name
    pub fn descriptions(&self) -> Vec<(&str, &str)> {
        let mut described: Vec<(&str, &str)> = self
            .tools
            .values()
            .map(|tool| (tool.name(), tool.description()))
            .collect();
        described.sort_unstable_by(|a, b| a.0.cmp(b.0));
        described
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Fails with `ArityMismatch` unless at least `min` arguments were passed
pub(crate) fn require_at_least(tool: &str, args: &[Value], min: usize) -> Result<()> {
    if args.len() < min {
        return Err(Error::ArityMismatch {
            callee: tool.to_string(),
            expected: format!("at least {}", min),
            got: args.len(),
        });
    }
    Ok(())
}

/// Fails with `TypeError` unless `value` is a number
pub(crate) fn require_number(value: &Value) -> Result<&Value> {
    if value.is_number() {
        Ok(value)
    } else {
        Err(Error::type_error("number", value.type_name()))
    }
}
