//! Stack growth for recursive parsing and evaluation
//!
//! The parser and evaluator recurse once per nesting level of the input, so
//! deeply nested source would otherwise overflow the native stack.

/// Grow the stack when less than this remains (100KB)
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1MB)
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_recursion() {
        fn depth(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
        }

        assert_eq!(depth(100_000), 100_000);
    }
}
