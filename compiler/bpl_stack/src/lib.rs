//! Stack growth for the recursive phases.
//!
//! The parser descends once per nested expression or block, and the
//! evaluator once per nested node and once per user-function call. Both wrap
//! their recursive entry points in [`ensure_sufficient_stack`] so that deeply
//! nested programs and deep (but bounded) recursion run on a heap-allocated
//! stack segment instead of overflowing the thread's native stack.
//!
//! Runaway recursion is still bounded: the evaluator enforces its own call
//! depth limit and reports it as a runtime error.

/// If less than this much stack remains, a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
    }

    #[test]
    fn shallow_recursion_returns_value() {
        assert_eq!(depth(16), 16);
    }

    #[test]
    fn deep_recursion_does_not_overflow() {
        // Far beyond what an 8MB main-thread stack holds for this frame size.
        assert_eq!(depth(200_000), 200_000);
    }

    #[test]
    fn passes_results_through() {
        let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("nope"));
        assert_eq!(result, Err("nope"));
    }
}
