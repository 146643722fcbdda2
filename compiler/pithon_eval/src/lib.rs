//! Tree-walking evaluator for Pithon, a small dynamically-typed language.
//!
//! The evaluator consumes a syntax tree built from `pithon_ir` nodes and an
//! [`Environment`], and produces [`Value`]s while enforcing the language's
//! dynamic type rules, lexical scoping and control flow.
//!
//! ```text
//! let env = Environment::with_primitives();
//! let mut interpreter = Interpreter::new();
//! let value = interpreter.evaluate(&program, &env)?;
//! ```
//!
//! Front ends usually go through [`Session`], which keeps the environment
//! alive across units and renders errors in English or French.

mod diagnostics;
mod environment;
mod errors;
mod interpreter;
mod primitives;
mod print_handler;
mod session;
pub mod suggest;
mod value;

pub use diagnostics::{render, render_with_source, CallFrame, CallStack, ErrorCode, Locale};
pub use environment::{Environment, LocalScope, Scope};
pub use errors::{
    control_outside_loop, index_out_of_range, missing_argument, no_attribute, non_finite,
    not_callable, primitive_arity, recursion_limit_exceeded, result_too_large, syntax_error,
    too_many_arguments, type_mismatch_in, undefined_name, zero_division, Arity, BacktraceFrame,
    CallProblem, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use interpreter::{Flow, Interpreter, InterpreterBuilder};
pub use primitives::{
    lookup_primitive, primitive_table, Primitive, PrimitiveContext, PrimitiveFn, MAX_SEQUENCE_LEN,
};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use session::Session;
pub use value::{ClassValue, FunctionValue, Heap, MethodValue, ObjectValue, Value};

#[cfg(test)]
mod tests;
