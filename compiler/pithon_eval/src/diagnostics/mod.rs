//! Diagnostic infrastructure for the evaluator.
//!
//! This module provides:
//! - `CallStack` and `CallFrame`: live tracking of user-level calls, with an
//!   optional depth limit and backtrace capture at error sites
//! - `ErrorCode`, `Locale` and `render`: the localized, human-readable
//!   message a front end prints for each error kind

mod render;

pub use render::{render, render_with_source, ErrorCode, Locale};

use crate::errors::{recursion_limit_exceeded, BacktraceFrame, EvalBacktrace, EvalError};

/// A single frame in the live call stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Function name, `Class.method`, or class name for a constructor call.
    pub name: String,
}

/// Live call stack for the interpreter.
///
/// Each user-level call pushes a frame and pops it on every exit path. The
/// depth check is integrated into `push()`.
///
/// ```text
/// self.call_stack.push(CallFrame { name })?;
/// let result = self.run_body(...);
/// self.call_stack.pop();
/// ```
#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` is `None` for unlimited depth.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is NOT pushed when the limit is reached.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot of the current frames, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: f.name.clone(),
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace unless the error already carries one.
    ///
    /// The first call boundary an error crosses has the deepest view of the
    /// stack, so later boundaries leave it alone.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

#[cfg(test)]
mod tests;
