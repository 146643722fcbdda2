//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use super::Interpreter;
use crate::diagnostics::CallStack;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for creating Interpreter instances.
///
/// Defaults: output to stdout, no call depth limit (deep recursion is
/// bounded only by memory, since the native stack grows on demand).
#[derive(Default)]
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the handler the `print` primitive writes through.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Fail with a `RecursionLimit` error once `depth` user-level calls are
    /// active.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_stack: CallStack::new(self.max_call_depth),
        }
    }
}
