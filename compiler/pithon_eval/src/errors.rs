//! Error types for evaluation.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` is the full catalogue of runtime failures. Each variant
//! carries the data a front end needs to render a localized message (see
//! `diagnostics::render`). Factory functions (e.g. `zero_division()`) are
//! the public API for raising errors; they populate both `kind` and the
//! English `message`.
//!
//! Control transfer (`return`, `break`, `continue`) is not an error. It
//! travels as `Flow` in the interpreter and only becomes an error when it
//! escapes the construct that should have caught it.

use std::fmt;

use pithon_ir::Span;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Number of arguments a primitive accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    /// Inclusive bounds.
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    /// Check whether `count` arguments satisfy this arity.
    #[inline]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::Between(lo, hi) => (lo..=hi).contains(&count),
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::Between(lo, hi) => write!(f, "{lo} to {hi}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// What went wrong when calling a callable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallProblem {
    /// Fewer arguments than declared parameters.
    MissingArgument { expected: usize, got: usize },
    /// More arguments than declared parameters and no vararg to absorb them.
    TooManyArguments { expected: usize, got: usize },
    /// A primitive received an argument count outside its arity.
    Arity { expected: Arity, got: usize },
}

/// Typed error category.
///
/// Each variant carries structured data for the error condition, so callers
/// match on the kind instead of parsing messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// Parser failure reported by the front end. Never raised by the evaluator.
    Syntax {
        message: String,
        line: Option<usize>,
    },

    // Names
    Name {
        name: String,
        /// Up to three similar visible names, most similar first.
        suggestions: Vec<String>,
    },
    Attribute {
        class_name: String,
        attribute: String,
    },

    // Operands
    Type {
        expected: String,
        got: String,
        operation: Option<String>,
    },
    ZeroDivision,
    Index {
        index: i64,
        len: usize,
    },
    /// A sequence-producing operation would exceed the size limit.
    TooLarge {
        operation: String,
        limit: usize,
    },

    // Calls
    Call {
        name: String,
        problem: CallProblem,
    },
    /// `break`/`continue` outside a loop, or `return` outside a function.
    ControlOutsideLoop {
        keyword: &'static str,
    },
    RecursionLimit {
        depth: usize,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { message, line } => {
                write!(f, "{message}")?;
                if let Some(line) = line {
                    write!(f, " at line {line}")?;
                }
                Ok(())
            }

            Self::Name { name, .. } => write!(f, "name '{name}' is not defined"),
            Self::Attribute {
                class_name,
                attribute,
            } => write!(f, "'{class_name}' object has no attribute '{attribute}'"),

            Self::Type {
                expected,
                got,
                operation,
            } => {
                write!(f, "expected {expected}, got {got}")?;
                if let Some(op) = operation {
                    write!(f, " for operation '{op}'")?;
                }
                Ok(())
            }
            Self::ZeroDivision => write!(f, "division by zero"),
            Self::Index { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::TooLarge { operation, limit } => write!(
                f,
                "result of '{operation}' exceeds the sequence size limit of {limit}"
            ),

            Self::Call { name, problem } => match problem {
                CallProblem::MissingArgument { expected, got } => write!(
                    f,
                    "{name}() is missing arguments: expected {expected}, got {got}"
                ),
                CallProblem::TooManyArguments { expected, got } => write!(
                    f,
                    "{name}() takes {expected} {} but {got} were given",
                    plural(*expected, "argument", "arguments")
                ),
                CallProblem::Arity { expected, got } => write!(
                    f,
                    "{name} expects {expected} {}, got {got}",
                    plural_arity(*expected)
                ),
            },
            Self::ControlOutsideLoop { keyword } => {
                if *keyword == "return" {
                    write!(f, "'return' outside function")
                } else {
                    write!(f, "'{keyword}' outside loop")
                }
            }
            Self::RecursionLimit { depth } => {
                write!(f, "maximum recursion depth exceeded (limit: {depth})")
            }
        }
    }
}

fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 {
        one
    } else {
        many
    }
}

fn plural_arity(arity: Arity) -> &'static str {
    match arity {
        Arity::Exactly(n) | Arity::AtLeast(n) => plural(n, "argument", "arguments"),
        Arity::Between(..) => "arguments",
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function, method (`Class.method`) or class name.
    pub name: String,
}

/// Immutable snapshot of the call stack at an error site.
///
/// Captured from `CallStack` when an error first unwinds through a call
/// boundary. Frames are ordered innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {}", frame.name)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// English rendering of `kind`.
    pub message: String,
    /// Source location, when the node that failed carried one.
    pub span: Option<Span>,
    /// Call stack at the error site, if the error crossed a call boundary.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// Create an error from a structured kind.
    ///
    /// The message is computed from the kind's `Display` impl.
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
            backtrace: None,
        }
    }

    /// Attach a source span unless one is already present.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() && !span.is_dummy() {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::from_kind(kind)
    }
}

// Operand errors

/// Operand of the wrong variant for a named operation.
#[cold]
pub fn type_mismatch_in(operation: &str, expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Type {
        expected: expected.to_string(),
        got: got.to_string(),
        operation: Some(operation.to_string()),
    })
}

/// A NaN or infinite number where an integer position or bound is needed.
#[cold]
pub fn non_finite(operation: &str, n: f64) -> EvalError {
    let got = if n.is_nan() { "nan" } else { "infinity" };
    type_mismatch_in(operation, "finite number", got)
}

#[cold]
pub fn result_too_large(operation: &str, limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooLarge {
        operation: operation.to_string(),
        limit,
    })
}

#[cold]
pub fn zero_division() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ZeroDivision)
}

#[cold]
pub fn index_out_of_range(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Index { index, len })
}

// Name errors

#[cold]
pub fn undefined_name(name: &str, suggestions: Vec<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Name {
        name: name.to_string(),
        suggestions,
    })
}

#[cold]
pub fn no_attribute(class_name: &str, attribute: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Attribute {
        class_name: class_name.to_string(),
        attribute: attribute.to_string(),
    })
}

// Call errors

#[cold]
pub fn missing_argument(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Call {
        name: name.to_string(),
        problem: CallProblem::MissingArgument { expected, got },
    })
}

#[cold]
pub fn too_many_arguments(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Call {
        name: name.to_string(),
        problem: CallProblem::TooManyArguments { expected, got },
    })
}

#[cold]
pub fn primitive_arity(name: &str, expected: Arity, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Call {
        name: name.to_string(),
        problem: CallProblem::Arity { expected, got },
    })
}

/// Calling something that is not a function, method, class or primitive.
#[cold]
pub fn not_callable(got: &str) -> EvalError {
    type_mismatch_in("call", "function", got)
}

#[cold]
pub fn control_outside_loop(keyword: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ControlOutsideLoop { keyword })
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth })
}

/// Wrap a parser failure so the front end can report it like any other error.
#[cold]
pub fn syntax_error(message: impl Into<String>, line: Option<usize>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Syntax {
        message: message.into(),
        line,
    })
}
