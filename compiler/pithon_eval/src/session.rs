//! Front-end session: one interpreter and one persistent environment.
//!
//! A REPL or file runner parses source into units and feeds them here one
//! at a time. Bindings made by one unit are visible to the next.

use pithon_ir::Stmt;

use crate::diagnostics::{render, render_with_source, Locale};
use crate::environment::Environment;
use crate::errors::EvalError;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub struct Session {
    interpreter: Interpreter,
    env: Environment,
    locale: Locale,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Interpreter::new())
    }
}

impl Session {
    /// A session over the initial environment (primitives only).
    pub fn new(interpreter: Interpreter) -> Self {
        Session {
            interpreter,
            env: Environment::with_primitives(),
            locale: Locale::default(),
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Evaluate one parsed unit.
    ///
    /// Returns `Ok(None)` when the unit is a single plain `name = ...`
    /// assignment, whose value is not echoed, and `Ok(Some(value))`
    /// otherwise. `obj.attr = ...` echoes the assigned value.
    pub fn run(&mut self, unit: &[Stmt]) -> Result<Option<Value>, EvalError> {
        let value = self.interpreter.evaluate(unit, &self.env)?;
        if let [stmt] = unit {
            if stmt.is_assignment() {
                return Ok(None);
            }
        }
        Ok(Some(value))
    }

    /// The message to show for `err` in this session's locale.
    pub fn report(&self, err: &EvalError) -> String {
        render(err, self.locale)
    }

    /// Like [`Session::report`], prefixed with the failing line of `source`.
    pub fn report_in(&self, err: &EvalError, source: &str) -> String {
        render_with_source(err, self.locale, source)
    }
}
