#![allow(clippy::unwrap_used)]

//! Observable contracts of the language, checked end to end.

use pithon_ir::{BinaryOp, ClassDef, Expr, FunctionDef, Name, Stmt};
use pretty_assertions::assert_eq;

use super::support::{call, num, number, run, run_err, run_ok, session, var};
use crate::{CallProblem, EvalErrorKind, Value};

fn list(items: &[f64]) -> Expr {
    Expr::list(items.iter().map(|&n| num(n)).collect())
}

fn list_value(items: &[f64]) -> Value {
    Value::list(items.iter().map(|&n| Value::Number(n)).collect())
}

fn params(names: &[&str]) -> Vec<Name> {
    names.iter().map(|&n| Name::from(n)).collect()
}

#[test]
fn floor_division_is_the_floor_of_division() {
    let pairs = [(7.0, 2.0), (-7.0, 2.0), (7.5, -2.0), (1.0, 3.0), (-0.5, 0.25)];
    for (a, b) in pairs {
        let floor = Expr::binary(BinaryOp::FloorDiv, num(a), num(b));
        assert_eq!(run(&[Stmt::expr(floor)]).unwrap(), number((a / b).floor()));
    }
}

#[test]
fn division_family_by_zero() {
    for op in [BinaryOp::Div, BinaryOp::FloorDiv, BinaryOp::Mod] {
        let expr = Expr::binary(op, num(3.0), num(0.0));
        assert_eq!(run_err(&[Stmt::expr(expr)]), EvalErrorKind::ZeroDivision);
    }
}

#[test]
fn list_concatenation_preserves_order() {
    let sum = Expr::binary(BinaryOp::Add, list(&[1.0, 2.0]), list(&[3.0]));
    assert_eq!(run_ok(&[Stmt::expr(sum)]), Some(list_value(&[1.0, 2.0, 3.0])));
    let empty = Expr::binary(BinaryOp::Add, list(&[]), list(&[4.0]));
    assert_eq!(run_ok(&[Stmt::expr(empty)]), Some(list_value(&[4.0])));
}

#[test]
fn head_and_tail() {
    assert_eq!(
        run_ok(&[Stmt::expr(call("tail", vec![list(&[1.0, 2.0, 3.0])]))]),
        Some(list_value(&[2.0, 3.0]))
    );
    for name in ["head", "tail"] {
        let kind = run_err(&[Stmt::expr(call(name, vec![list(&[])]))]);
        assert!(matches!(kind, EvalErrorKind::Type { .. }), "{name}: {kind:?}");
        let kind = run_err(&[Stmt::expr(call(name, vec![Expr::tuple(Vec::new())]))]);
        assert!(matches!(kind, EvalErrorKind::Type { .. }), "{name}: {kind:?}");
    }
}

#[test]
fn indexing_at_length_is_an_index_error() {
    let seqs = [
        list(&[1.0, 2.0, 3.0]),
        Expr::tuple(vec![num(1.0)]),
        Expr::string("abcd"),
    ];
    for (seq, len) in seqs.into_iter().zip([3_usize, 1, 4]) {
        let index = Expr::subscript(seq, num(len as f64));
        assert_eq!(
            run_err(&[Stmt::expr(index)]),
            EvalErrorKind::Index {
                index: len as i64,
                len
            }
        );
    }
}

#[test]
fn break_leaves_the_loop_variable_bound() {
    let mut session = session();
    let program = [Stmt::for_loop(
        "x",
        list(&[1.0, 2.0, 3.0]),
        vec![Stmt::if_else(
            Expr::binary(BinaryOp::Eq, var("x"), num(2.0)),
            vec![Stmt::brk()],
            Vec::new(),
        )],
    )];
    // the last body evaluation before the break was the `if` for x == 1
    assert_eq!(session.run(&program).unwrap(), Some(Value::None));
    assert_eq!(session.env().lookup("x"), Some(Value::Number(2.0)));
}

#[test]
fn attribute_mutation_persists_per_instance() {
    let mut session = session();
    let class = ClassDef::new(
        "C",
        vec![FunctionDef::new(
            "__init__",
            params(&["self", "n"]),
            vec![Stmt::assign_attr(var("self"), "v", var("n"))],
        )],
    );
    session
        .run(&[
            Stmt::class(class),
            Stmt::assign("c", call("C", vec![num(5.0)])),
            Stmt::assign_attr(var("c"), "v", num(9.0)),
        ])
        .unwrap();

    let read = Stmt::expr(Expr::attr(var("c"), "v"));
    assert_eq!(session.run(&[read.clone()]).unwrap(), number(9.0));
    assert_eq!(session.run(&[read]).unwrap(), number(9.0));

    let fresh = Stmt::expr(Expr::attr(call("C", vec![num(5.0)]), "v"));
    assert_eq!(session.run(&[fresh]).unwrap(), number(5.0));
}

#[test]
fn arity_of_user_functions() {
    let pair = FunctionDef::new("pair", params(&["a", "b"]), vec![Stmt::ret(var("a"))]);
    let too_many = run_err(&[
        Stmt::def(pair.clone()),
        Stmt::expr(call("pair", vec![num(1.0), num(2.0), num(3.0)])),
    ]);
    assert_eq!(
        too_many,
        EvalErrorKind::Call {
            name: "pair".to_string(),
            problem: CallProblem::TooManyArguments {
                expected: 2,
                got: 3
            },
        }
    );
    let missing = run_err(&[Stmt::def(pair), Stmt::expr(call("pair", vec![num(1.0)]))]);
    assert_eq!(
        missing,
        EvalErrorKind::Call {
            name: "pair".to_string(),
            problem: CallProblem::MissingArgument {
                expected: 2,
                got: 1
            },
        }
    );
}

#[test]
fn vararg_collects_surplus_arguments() {
    let rest = FunctionDef::new("rest", params(&["a"]), vec![Stmt::ret(var("more"))])
        .with_vararg("more");
    assert_eq!(
        run_ok(&[
            Stmt::def(rest.clone()),
            Stmt::expr(call("rest", vec![num(1.0)])),
        ]),
        Some(list_value(&[]))
    );
    assert_eq!(
        run_ok(&[
            Stmt::def(rest),
            Stmt::expr(call("rest", vec![num(1.0), num(2.0), num(3.0)])),
        ]),
        Some(list_value(&[2.0, 3.0]))
    );
}

#[test]
fn end_to_end_units() {
    let mut session = session();
    let add = Expr::binary(BinaryOp::Add, num(1.0), num(2.0));
    assert_eq!(session.run(&[Stmt::expr(add)]).unwrap(), number(3.0));

    assert_eq!(session.run(&[Stmt::assign("x", num(5.0))]).unwrap(), None);
    assert_eq!(session.env().lookup("x"), Some(Value::Number(5.0)));

    let repeat = Expr::binary(BinaryOp::Mul, list(&[1.0, 2.0]), num(3.0));
    assert_eq!(
        session.run(&[Stmt::expr(repeat)]).unwrap(),
        Some(list_value(&[1.0, 2.0, 1.0, 2.0, 1.0, 2.0]))
    );

    let member = Expr::contains(Expr::string("ab"), Expr::string("xaby"));
    assert_eq!(
        session.run(&[Stmt::expr(member)]).unwrap(),
        Some(Value::Bool(true))
    );
}

mod proptest_properties {
    use pithon_ir::{BinaryOp, Expr, Stmt};
    use proptest::prelude::*;

    use super::super::support::{call, num, number, run};
    use super::{list, list_value};

    fn eval(expr: Expr) -> Option<crate::Value> {
        run(&[Stmt::expr(expr)]).unwrap()
    }

    proptest! {
        #[test]
        fn floor_division_matches_floor_of_quotient(
            a in -1.0e6_f64..1.0e6,
            b in -1.0e3_f64..1.0e3,
        ) {
            prop_assume!(b != 0.0);
            let floor = eval(Expr::binary(BinaryOp::FloorDiv, num(a), num(b)));
            prop_assert_eq!(floor, number((a / b).floor()), "{} // {}", a, b);
        }

        #[test]
        fn concatenation_adds_lengths_in_order(
            left in proptest::collection::vec(-100.0_f64..100.0, 0..16),
            right in proptest::collection::vec(-100.0_f64..100.0, 0..16),
        ) {
            let sum = || Expr::binary(BinaryOp::Add, list(&left), list(&right));
            let expected_len = (left.len() + right.len()) as f64;
            prop_assert_eq!(eval(call("len", vec![sum()])), number(expected_len));

            let joined: Vec<f64> = left.iter().chain(&right).copied().collect();
            prop_assert_eq!(eval(sum()), Some(list_value(&joined)));
        }

        #[test]
        fn tail_drops_exactly_one_element(
            items in proptest::collection::vec(-100.0_f64..100.0, 1..32),
        ) {
            let tail = eval(call("len", vec![call("tail", vec![list(&items)])]));
            prop_assert_eq!(tail, number((items.len() - 1) as f64));
        }
    }
}
