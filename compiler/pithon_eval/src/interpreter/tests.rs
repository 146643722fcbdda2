#![allow(clippy::unwrap_used)]

use super::*;
use crate::errors::EvalErrorKind;
use crate::print_handler::buffer_handler;
use pithon_ir::{BinaryOp, FunctionDef, Span};
use pretty_assertions::assert_eq;

fn eval(expr: Expr) -> EvalResult {
    let mut interpreter = Interpreter::builder()
        .print_handler(buffer_handler())
        .build();
    interpreter.eval_expr(&expr, &Environment::with_primitives())
}

fn s(text: &str) -> Expr {
    Expr::string(text)
}

fn type_kind(operation: &str, expected: &str, got: &str) -> EvalErrorKind {
    EvalErrorKind::Type {
        expected: expected.to_string(),
        got: got.to_string(),
        operation: Some(operation.to_string()),
    }
}

#[test]
fn print_handler_integration() {
    let handler = buffer_handler();
    let interpreter = InterpreterBuilder::new()
        .print_handler(handler.clone())
        .build();

    interpreter.print_handler().println("hello world");
    assert_eq!(interpreter.get_print_output(), "hello world\n");
    assert_eq!(handler.get_output(), "hello world\n");

    interpreter.clear_print_output();
    assert_eq!(interpreter.get_print_output(), "");
}

#[test]
fn default_interpreter_prints_to_stdout() {
    let interpreter = Interpreter::new();
    assert!(matches!(
        **interpreter.print_handler(),
        crate::print_handler::PrintHandlerImpl::Stdout(_)
    ));
    assert_eq!(interpreter.get_print_output(), "");
    assert_eq!(interpreter.call_depth(), 0);
}

#[test]
fn literals() {
    assert_eq!(eval(Expr::number(1.5)).unwrap(), Value::Number(1.5));
    assert_eq!(eval(Expr::bool(true)).unwrap(), Value::Bool(true));
    assert_eq!(eval(Expr::none()).unwrap(), Value::None);
    assert_eq!(
        eval(Expr::tuple(vec![Expr::number(1.0), s("a")])).unwrap(),
        Value::tuple(vec![Value::Number(1.0), Value::string("a")])
    );
}

#[test]
fn every_operator_resolves_to_a_primitive() {
    let env = Environment::with_primitives();
    for op in BinaryOp::ALL {
        assert!(
            matches!(env.lookup(op.as_symbol()), Some(Value::Primitive(_))),
            "{op} has no primitive"
        );
    }
}

#[test]
fn shadowed_operator_is_used() {
    let mut interpreter = Interpreter::builder()
        .print_handler(buffer_handler())
        .build();
    let env = Environment::with_primitives();
    env.define(Name::from("+"), env.lookup("-").unwrap());
    let sum = Expr::binary(BinaryOp::Add, Expr::number(5.0), Expr::number(3.0));
    assert_eq!(interpreter.eval_expr(&sum, &env).unwrap(), Value::Number(2.0));
}

#[test]
fn logical_operators_return_an_operand() {
    assert_eq!(
        eval(Expr::and(Expr::number(0.0), Expr::var("undefined"))).unwrap(),
        Value::Number(0.0)
    );
    assert_eq!(eval(Expr::and(s("a"), s("b"))).unwrap(), Value::string("b"));
    assert_eq!(
        eval(Expr::or(s("a"), Expr::var("undefined"))).unwrap(),
        Value::string("a")
    );
    assert_eq!(
        eval(Expr::or(Expr::list(Vec::new()), Expr::none())).unwrap(),
        Value::None
    );
    assert_eq!(eval(Expr::not(Expr::number(0.0))).unwrap(), Value::Bool(true));
}

#[test]
fn logical_operators_reject_callables() {
    let err = eval(Expr::not(Expr::var("len"))).unwrap_err();
    assert_eq!(err.kind, type_kind("not", LOGICAL_OPERANDS, "primitive"));
    let err = eval(Expr::and(Expr::bool(true), Expr::var("len"))).unwrap_err();
    assert_eq!(err.kind, type_kind("and", LOGICAL_OPERANDS, "primitive"));
}

#[test]
fn subscript_sequences() {
    let list = Expr::list(vec![Expr::number(10.0), Expr::number(20.0)]);
    assert_eq!(
        eval(Expr::subscript(list.clone(), Expr::number(1.9))).unwrap(),
        Value::Number(20.0)
    );
    assert_eq!(
        eval(Expr::subscript(s("héllo"), Expr::number(1.0))).unwrap(),
        Value::string("é")
    );
    let err = eval(Expr::subscript(list.clone(), Expr::number(2.0))).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Index { index: 2, len: 2 });
    let err = eval(Expr::subscript(list.clone(), Expr::number(-1.0))).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Index { index: -1, len: 2 });
    let err = eval(Expr::subscript(list, s("0"))).unwrap_err();
    assert_eq!(err.kind, type_kind("subscript", "number", "string"));
    let err = eval(Expr::subscript(Expr::number(5.0), Expr::number(0.0))).unwrap_err();
    assert_eq!(
        err.kind,
        type_kind("subscript", "list, tuple or string", "number")
    );
}

#[test]
fn subscript_rejects_non_finite_indices() {
    let list = Expr::list(vec![Expr::number(7.0), Expr::number(8.0)]);
    let err = eval(Expr::subscript(list.clone(), Expr::number(f64::NAN))).unwrap_err();
    assert_eq!(err.kind, type_kind("subscript", "finite number", "nan"));
    let err = eval(Expr::subscript(list, Expr::number(f64::INFINITY))).unwrap_err();
    assert_eq!(err.kind, type_kind("subscript", "finite number", "infinity"));
    let err = eval(Expr::subscript(s("ab"), Expr::number(f64::NEG_INFINITY))).unwrap_err();
    assert_eq!(err.kind, type_kind("subscript", "finite number", "infinity"));
}

#[test]
fn membership() {
    assert_eq!(eval(Expr::contains(s("ab"), s("xaby"))).unwrap(), Value::Bool(true));
    assert_eq!(eval(Expr::contains(s("ba"), s("xaby"))).unwrap(), Value::Bool(false));
    assert_eq!(
        eval(Expr::contains(Expr::number(1.0), s("1"))).unwrap(),
        Value::Bool(false)
    );
    let tuple = Expr::tuple(vec![Expr::number(1.0), s("a")]);
    assert_eq!(
        eval(Expr::contains(s("a"), tuple)).unwrap(),
        Value::Bool(true)
    );
    let err = eval(Expr::contains(Expr::number(1.0), Expr::number(1.0))).unwrap_err();
    assert_eq!(err.kind, type_kind("in", "list, tuple or string", "number"));
}

#[test]
fn undefined_name_suggests_visible_names() {
    let err = eval(Expr::var("lenn")).unwrap_err();
    let EvalErrorKind::Name { name, suggestions } = err.kind else {
        panic!("expected a Name error, got {:?}", err.kind);
    };
    assert_eq!(name, "lenn");
    assert_eq!(suggestions.first().map(String::as_str), Some("len"));
}

#[test]
fn calling_a_non_callable() {
    let err = eval(Expr::call(Expr::number(3.0), Vec::new())).unwrap_err();
    assert_eq!(err.kind, type_kind("call", "function", "number"));
}

#[test]
fn conditions_must_be_bool() {
    let mut interpreter = Interpreter::new();
    let env = Environment::with_primitives();
    let program = [Stmt::if_else(Expr::number(1.0), Vec::new(), Vec::new())];
    let err = interpreter.evaluate(&program, &env).unwrap_err();
    assert_eq!(err.kind, type_kind("if", "bool", "number"));

    let program = [Stmt::while_loop(Expr::none(), Vec::new())];
    let err = interpreter.evaluate(&program, &env).unwrap_err();
    assert_eq!(err.kind, type_kind("while", "bool", "none"));
}

#[test]
fn exec_block_stops_at_the_first_signal() {
    let mut interpreter = Interpreter::new();
    let env = Environment::with_primitives();
    let block = [
        Stmt::assign("a", Expr::number(1.0)),
        Stmt::brk(),
        Stmt::assign("b", Expr::number(2.0)),
    ];
    assert_eq!(interpreter.exec_block(&block, &env).unwrap(), Flow::Break);
    assert!(env.lookup("a").is_some());
    assert!(env.lookup("b").is_none());
}

#[test]
fn errors_carry_the_innermost_span() {
    let mut interpreter = Interpreter::new();
    let env = Environment::with_primitives();
    let failing = Expr::binary(BinaryOp::Div, Expr::number(1.0), Expr::number(0.0))
        .with_span(Span::new(8, 13));
    let program = [Stmt::assign("x", failing).with_span(Span::new(4, 13))];
    let err = interpreter.evaluate(&program, &env).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::ZeroDivision);
    assert_eq!(err.span, Some(Span::new(8, 13)));
}

#[test]
fn call_value_with_evaluated_arguments() {
    let mut interpreter = Interpreter::new();
    let env = Environment::with_primitives();
    let def = FunctionDef::new(
        "second",
        vec![Name::from("a"), Name::from("b")],
        vec![Stmt::ret(Expr::var("b"))],
    );
    interpreter.evaluate(&[Stmt::def(def)], &env).unwrap();
    let second = env.lookup("second").unwrap();
    let result = interpreter
        .call_value(&second, vec![Value::Number(1.0), Value::Number(2.0)])
        .unwrap();
    assert_eq!(result, Value::Number(2.0));
    assert_eq!(interpreter.call_depth(), 0);
}

#[test]
fn max_call_depth_is_enforced() {
    let mut interpreter = Interpreter::builder().max_call_depth(50).build();
    let env = Environment::with_primitives();
    let forever = FunctionDef::new(
        "forever",
        Vec::new(),
        vec![Stmt::ret(Expr::call_named("forever", Vec::new()))],
    );
    let program = [
        Stmt::def(forever),
        Stmt::expr(Expr::call_named("forever", Vec::new())),
    ];
    let err = interpreter.evaluate(&program, &env).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { depth: 50 });
    assert_eq!(err.backtrace.as_ref().map(|bt| bt.len()), Some(50));
    assert_eq!(interpreter.call_depth(), 0);
}
