//! Standard operator set

pub mod comparison;
pub mod math;

use crate::tools::ToolRegistry;

/// Register every standard tool
pub fn register_all(registry: &mut ToolRegistry) {
    math::register(registry);
    comparison::register(registry);
}
