//! Helpers shared by the whole-program tests.

use std::sync::Once;

use pithon_ir::{Expr, Stmt};

use crate::print_handler::buffer_handler;
use crate::{EvalError, EvalErrorKind, Interpreter, Session, Value};

static TRACING_INIT: Once = Once::new();

/// Route evaluator tracing to the test output.
///
/// Enable with `RUST_LOG=pithon_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer().with_target(true))
                .with(EnvFilter::from_default_env())
                .try_init();
        }
    });
}

/// A session whose `print` output is captured.
pub fn session() -> Session {
    init_tracing();
    Session::new(Interpreter::builder().print_handler(buffer_handler()).build())
}

/// Run one unit in a fresh session.
pub fn run(program: &[Stmt]) -> Result<Option<Value>, EvalError> {
    session().run(program)
}

/// Run one unit and return the kind of the error it must raise.
pub fn run_err(program: &[Stmt]) -> EvalErrorKind {
    match run(program) {
        Ok(value) => panic!("expected an error, got {value:?}"),
        Err(err) => err.kind,
    }
}

/// Run one unit and return its value, panicking with the rendered error.
pub fn run_ok(program: &[Stmt]) -> Option<Value> {
    let mut session = session();
    match session.run(program) {
        Ok(value) => value,
        Err(err) => panic!("unexpected error: {}", session.report(&err)),
    }
}

pub fn num(n: f64) -> Expr {
    Expr::number(n)
}

pub fn var(name: &str) -> Expr {
    Expr::var(name)
}

pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::call_named(name, args)
}

pub fn number(n: f64) -> Option<Value> {
    Some(Value::Number(n))
}
