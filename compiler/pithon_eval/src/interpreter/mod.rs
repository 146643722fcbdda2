//! Tree-walking interpreter.
//!
//! Expressions evaluate to an `EvalResult`. Statements evaluate to a
//! [`Flow`], which carries `return`, `break` and `continue` outward as plain
//! data until a call frame or loop consumes them:
//!
//! - loops consume `Break` and `Continue` and pass `Return` through
//! - call frames turn `Return` into the call's value and reject
//!   `Break`/`Continue` with a `ControlOutsideLoop` error
//! - [`Interpreter::evaluate`] rejects any signal that reaches the top level
//!
//! Every recursive step runs under `ensure_sufficient_stack`, so deep user
//! recursion grows the native stack instead of overflowing it.

mod builder;
mod calls;

pub use builder::InterpreterBuilder;

use pithon_ir::{Expr, ExprKind, Name, Stmt, StmtKind};
use pithon_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::errors::{
    control_outside_loop, index_out_of_range, no_attribute, non_finite, type_mismatch_in,
    undefined_name, EvalError, EvalResult,
};
use crate::print_handler::SharedPrintHandler;
use crate::suggest::{close_matches, MAX_SUGGESTIONS, SIMILARITY_CUTOFF};
use crate::value::{ClassValue, FunctionValue, Value};

/// Variants accepted by `not`, `and` and `or`.
const LOGICAL_OPERANDS: &str = "bool, number, string, none, list or tuple";

/// Outcome of executing a statement or block.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    /// Completed; carries the value of the last statement.
    Normal(Value),
    Return(Value),
    Break,
    Continue,
}

/// The evaluator.
///
/// Holds the print handler used by the `print` primitive and the live call
/// stack. Variables live in the `Environment` passed to each call, so one
/// interpreter can evaluate many units against a persistent environment.
pub struct Interpreter {
    print_handler: SharedPrintHandler,
    call_stack: CallStack,
}

impl Default for Interpreter {
    fn default() -> Self {
        InterpreterBuilder::new().build()
    }
}

impl Interpreter {
    /// An interpreter printing to stdout with unlimited call depth.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Output captured by a buffer handler; empty for other handlers.
    pub fn get_print_output(&self) -> String {
        self.print_handler.get_output()
    }

    pub fn clear_print_output(&self) {
        self.print_handler.clear();
    }

    /// Number of user-level calls currently active.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Evaluate a statement sequence in `env`.
    ///
    /// Returns the value of the last statement, or `None` for an empty
    /// program. A `return`, `break` or `continue` that escapes to this level
    /// is a `ControlOutsideLoop` error.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.len()))]
    pub fn evaluate(&mut self, program: &[Stmt], env: &Environment) -> EvalResult {
        match self.exec_block(program, env)? {
            Flow::Normal(value) => Ok(value),
            Flow::Return(_) => Err(control_outside_loop("return")),
            Flow::Break => Err(control_outside_loop("break")),
            Flow::Continue => Err(control_outside_loop("continue")),
        }
    }

    /// Execute statements in order, stopping at the first signal.
    pub fn exec_block(&mut self, stmts: &[Stmt], env: &Environment) -> Result<Flow, EvalError> {
        let mut last = Value::None;
        for stmt in stmts {
            match self.exec_stmt(stmt, env)? {
                Flow::Normal(value) => last = value,
                signal => return Ok(signal),
            }
        }
        Ok(Flow::Normal(last))
    }

    pub fn exec_stmt(&mut self, stmt: &Stmt, env: &Environment) -> Result<Flow, EvalError> {
        ensure_sufficient_stack(|| self.exec_stmt_inner(stmt, env))
            .map_err(|err| err.with_span(stmt.span))
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt, env: &Environment) -> Result<Flow, EvalError> {
        match &stmt.kind {
            StmtKind::Expr(expr) => Ok(Flow::Normal(self.eval_expr(expr, env)?)),
            StmtKind::Assign { target, value } => {
                let value = self.eval_expr(value, env)?;
                env.define(target.clone(), value.clone());
                Ok(Flow::Normal(value))
            }
            StmtKind::AttributeAssign {
                object,
                attr,
                value,
            } => {
                let receiver = self.eval_expr(object, env)?;
                let value = self.eval_expr(value, env)?;
                match receiver {
                    Value::Object(obj) => {
                        obj.set_attr(attr.clone(), value.clone());
                        Ok(Flow::Normal(value))
                    }
                    other => Err(type_mismatch_in(
                        "attribute assignment",
                        "object",
                        other.type_name(),
                    )),
                }
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let branch = if self.eval_condition("if", condition, env)? {
                    then_branch
                } else {
                    else_branch
                };
                self.exec_block(branch, env)
            }
            StmtKind::While { condition, body } => self.exec_while(condition, body, env),
            StmtKind::For {
                var,
                iterable,
                body,
            } => self.exec_for(var, iterable, body, env),
            StmtKind::FunctionDef(def) => {
                let function = FunctionValue::new(def.clone(), env.clone());
                env.define(def.name.clone(), Value::Function(function));
                Ok(Flow::Normal(Value::None))
            }
            StmtKind::ClassDef(class) => {
                // One defining frame shared by every method.
                let class_env = env.child();
                let methods: FxHashMap<Name, FunctionValue> = class
                    .methods
                    .iter()
                    .map(|def| {
                        (
                            def.name.clone(),
                            FunctionValue::new(def.clone(), class_env.clone()),
                        )
                    })
                    .collect();
                tracing::trace!(class = %class.name, methods = methods.len(), "class defined");
                let value = ClassValue::new(class.name.clone(), methods);
                env.define(class.name.clone(), Value::Class(value));
                Ok(Flow::Normal(Value::None))
            }
            StmtKind::Return(value) => Ok(Flow::Return(self.eval_expr(value, env)?)),
            StmtKind::Break => Ok(Flow::Break),
            StmtKind::Continue => Ok(Flow::Continue),
        }
    }

    /// A loop or branch condition; must be a bool.
    fn eval_condition(
        &mut self,
        construct: &str,
        condition: &Expr,
        env: &Environment,
    ) -> Result<bool, EvalError> {
        match self.eval_expr(condition, env)? {
            Value::Bool(b) => Ok(b),
            other => Err(type_mismatch_in(construct, "bool", other.type_name())),
        }
    }

    fn exec_while(
        &mut self,
        condition: &Expr,
        body: &[Stmt],
        env: &Environment,
    ) -> Result<Flow, EvalError> {
        let mut last = Value::None;
        while self.eval_condition("while", condition, env)? {
            match self.exec_block(body, env)? {
                Flow::Normal(value) => last = value,
                Flow::Break => break,
                Flow::Continue => {}
                ret @ Flow::Return(_) => return Ok(ret),
            }
        }
        Ok(Flow::Normal(last))
    }

    /// The loop variable is bound in `env` itself, not a per-iteration frame,
    /// so it stays bound after the loop.
    fn exec_for(
        &mut self,
        var: &Name,
        iterable: &Expr,
        body: &[Stmt],
        env: &Environment,
    ) -> Result<Flow, EvalError> {
        let items = match self.eval_expr(iterable, env)? {
            Value::List(items) | Value::Tuple(items) => items,
            other => {
                return Err(type_mismatch_in(
                    "for loop",
                    "list or tuple",
                    other.type_name(),
                ))
            }
        };
        tracing::trace!(var = %var, items = items.len(), "for loop");

        let mut last = Value::None;
        for item in items.iter() {
            env.define(var.clone(), item.clone());
            match self.exec_block(body, env)? {
                Flow::Normal(value) => last = value,
                Flow::Break => break,
                Flow::Continue => {}
                ret @ Flow::Return(_) => return Ok(ret),
            }
        }
        Ok(Flow::Normal(last))
    }

    pub fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
            .map_err(|err| err.with_span(expr.span))
    }

    fn eval_expr_inner(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        match &expr.kind {
            // Literals
            ExprKind::Number(n) => Ok(Value::Number(*n)),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::None => Ok(Value::None),
            ExprKind::Str(s) => Ok(Value::string(s)),
            ExprKind::List(items) => Ok(Value::list(self.eval_all(items, env)?)),
            ExprKind::Tuple(items) => Ok(Value::tuple(self.eval_all(items, env)?)),

            ExprKind::Var(name) => lookup(name, env),

            ExprKind::Binary { op, left, right } => {
                let primitive = lookup(op.as_symbol(), env)?;
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                self.call_value(&primitive, vec![left, right])
            }

            // Logical
            ExprKind::Not(operand) => {
                let value = self.eval_expr(operand, env)?;
                Ok(Value::Bool(!truthiness("not", &value)?))
            }
            ExprKind::And { left, right } => {
                let left = self.eval_expr(left, env)?;
                if !truthiness("and", &left)? {
                    return Ok(left);
                }
                let right = self.eval_expr(right, env)?;
                truthiness("and", &right)?;
                Ok(right)
            }
            ExprKind::Or { left, right } => {
                let left = self.eval_expr(left, env)?;
                if truthiness("or", &left)? {
                    return Ok(left);
                }
                let right = self.eval_expr(right, env)?;
                truthiness("or", &right)?;
                Ok(right)
            }

            ExprKind::Call { callee, args } => {
                let callee = self.eval_expr(callee, env)?;
                let args = self.eval_all(args, env)?;
                self.call_value(&callee, args)
            }
            ExprKind::Subscript { collection, index } => {
                let collection = self.eval_expr(collection, env)?;
                let index = self.eval_expr(index, env)?;
                subscript(&collection, &index)
            }
            ExprKind::In { element, container } => {
                let element = self.eval_expr(element, env)?;
                let container = self.eval_expr(container, env)?;
                contains(&container, &element).map(Value::Bool)
            }
            ExprKind::Attribute { object, attr } => match self.eval_expr(object, env)? {
                Value::Object(obj) => obj
                    .lookup_attr(attr)
                    .ok_or_else(|| no_attribute(obj.class().name(), attr)),
                other => Err(type_mismatch_in(
                    "attribute access",
                    "object",
                    other.type_name(),
                )),
            },
        }
    }

    /// Evaluate expressions left to right.
    fn eval_all(&mut self, exprs: &[Expr], env: &Environment) -> Result<Vec<Value>, EvalError> {
        exprs.iter().map(|e| self.eval_expr(e, env)).collect()
    }
}

/// Resolve a name, attaching close matches from the whole chain on failure.
fn lookup(name: &str, env: &Environment) -> EvalResult {
    env.lookup(name).ok_or_else(|| {
        let visible = env.visible_names();
        let suggestions = close_matches(
            name,
            visible.iter().map(Name::as_str),
            MAX_SUGGESTIONS,
            SIMILARITY_CUTOFF,
        );
        undefined_name(name, suggestions)
    })
}

fn truthiness(op: &str, value: &Value) -> Result<bool, EvalError> {
    value
        .is_truthy()
        .ok_or_else(|| type_mismatch_in(op, LOGICAL_OPERANDS, value.type_name()))
}

/// `collection[index]` for lists, tuples and strings. The index is truncated;
/// NaN and infinities are rejected.
fn subscript(collection: &Value, index: &Value) -> EvalResult {
    let len = match collection {
        Value::List(items) | Value::Tuple(items) => items.len(),
        Value::Str(s) => s.chars().count(),
        other => {
            return Err(type_mismatch_in(
                "subscript",
                "list, tuple or string",
                other.type_name(),
            ))
        }
    };
    let Value::Number(n) = index else {
        return Err(type_mismatch_in("subscript", "number", index.type_name()));
    };
    if !n.is_finite() {
        return Err(non_finite("subscript", *n));
    }
    let i = n.trunc() as i64;
    let position = usize::try_from(i)
        .ok()
        .filter(|&p| p < len)
        .ok_or_else(|| index_out_of_range(i, len))?;

    match collection {
        Value::List(items) | Value::Tuple(items) => Ok(items[position].clone()),
        Value::Str(s) => s
            .chars()
            .nth(position)
            .map(|c| Value::string(c.to_string()))
            .ok_or_else(|| index_out_of_range(i, len)),
        _ => Err(type_mismatch_in(
            "subscript",
            "list, tuple or string",
            collection.type_name(),
        )),
    }
}

/// `element in container`.
///
/// A string container only holds strings: any other element is simply not
/// in it.
fn contains(container: &Value, element: &Value) -> Result<bool, EvalError> {
    match container {
        Value::List(items) | Value::Tuple(items) => Ok(items.iter().any(|v| v.equals(element))),
        Value::Str(haystack) => Ok(element
            .as_str()
            .is_some_and(|needle| haystack.contains(needle))),
        other => Err(type_mismatch_in(
            "in",
            "list, tuple or string",
            other.type_name(),
        )),
    }
}

#[cfg(test)]
mod tests;
