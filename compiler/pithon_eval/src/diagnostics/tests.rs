#![allow(clippy::unwrap_used)]

use super::*;
use crate::errors::{zero_division, EvalErrorKind};
use pretty_assertions::assert_eq;

fn frame(name: &str) -> CallFrame {
    CallFrame {
        name: name.to_string(),
    }
}

#[test]
fn push_and_pop_track_depth() {
    let mut stack = CallStack::default();
    assert!(stack.is_empty());
    stack.push(frame("outer")).unwrap();
    stack.push(frame("inner")).unwrap();
    assert_eq!(stack.depth(), 2);
    stack.pop();
    assert_eq!(stack.depth(), 1);
}

#[test]
fn depth_limit_rejects_push() {
    let mut stack = CallStack::new(Some(2));
    stack.push(frame("a")).unwrap();
    stack.push(frame("b")).unwrap();
    let err = stack.push(frame("c")).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { depth: 2 });
    assert_eq!(stack.depth(), 2);
}

#[test]
fn capture_is_innermost_first() {
    let mut stack = CallStack::default();
    stack.push(frame("main")).unwrap();
    stack.push(frame("helper")).unwrap();
    let names: Vec<String> = stack
        .capture()
        .frames()
        .iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(names, vec!["helper".to_string(), "main".to_string()]);
}

#[test]
fn attach_backtrace_keeps_first_capture() {
    let mut stack = CallStack::default();
    stack.push(frame("outer")).unwrap();
    stack.push(frame("inner")).unwrap();
    let err = stack.attach_backtrace(zero_division());
    stack.pop();
    let err = stack.attach_backtrace(err);
    assert_eq!(err.backtrace.map(|bt| bt.len()), Some(2));
}

#[test]
fn attach_backtrace_on_empty_stack_is_noop() {
    let stack = CallStack::default();
    assert!(stack.attach_backtrace(zero_division()).backtrace.is_none());
}
