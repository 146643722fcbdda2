//! Stack growth for the recursive evaluator.
//!
//! The Pithon evaluator is a plain recursive tree walk: every nested
//! expression, statement block and user-level call is one more native
//! frame. A user function recursing a few thousand levels deep would blow
//! an 8MB main-thread stack long before it ran out of memory.
//!
//! [`ensure_sufficient_stack`] checks the remaining stack before entering a
//! recursive step and, on native targets, moves execution onto a freshly
//! allocated segment when the remainder drops below the red zone. On
//! `wasm32` it is a passthrough.
//!
//! ```text
//! fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
//!     ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
//! }
//! ```

/// Remaining stack below which a new segment is allocated (128KB).
///
/// One evaluator step (a call with argument binding and a block) uses a few
/// KB, so this leaves room for the deepest single step.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Remaining native stack in bytes, if the platform can report it.
///
/// Only used for diagnostics in trace logs.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}

#[cfg(test)]
mod tests;
