//! The primitive library.
//!
//! A fixed, process-wide table mapping operator and builtin names to native
//! operations. Binary operators in the tree are evaluated as calls to the
//! primitive named by the operator symbol, so every operator rule lives here.
//!
//! Each primitive's arity is checked in [`Primitive::call`] before its body
//! runs. Bodies then validate operand variants, and every unhandled
//! combination falls through to a Type error.

use std::cmp::Ordering;
use std::fmt;

use crate::errors::{
    non_finite, primitive_arity, result_too_large, type_mismatch_in, zero_division, Arity,
    EvalError, EvalResult,
};
use crate::print_handler::PrintHandlerImpl;
use crate::value::Value;

/// What a primitive body can reach besides its arguments.
pub struct PrimitiveContext<'a> {
    print_handler: &'a PrintHandlerImpl,
}

impl<'a> PrimitiveContext<'a> {
    pub fn new(print_handler: &'a PrintHandlerImpl) -> Self {
        PrimitiveContext { print_handler }
    }
}

/// Native implementation of a primitive. Arguments are already arity-checked.
pub type PrimitiveFn = fn(&[Value], &PrimitiveContext<'_>) -> EvalResult;

/// A named native operation.
pub struct Primitive {
    pub name: &'static str,
    pub arity: Arity,
    func: PrimitiveFn,
}

impl Primitive {
    /// Check arity, then run the body.
    pub fn call(&self, args: &[Value], ctx: &PrimitiveContext<'_>) -> EvalResult {
        if !self.arity.accepts(args.len()) {
            return Err(primitive_arity(self.name, self.arity, args.len()));
        }
        (self.func)(args, ctx)
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Primitive")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Largest sequence a primitive may build: elements for lists and tuples,
/// bytes for strings.
pub const MAX_SEQUENCE_LEN: usize = 1 << 24;

const fn primitive(name: &'static str, arity: Arity, func: PrimitiveFn) -> Primitive {
    Primitive { name, arity, func }
}

static PRIMITIVES: [Primitive; 28] = [
    // Arithmetic
    primitive("+", Arity::Exactly(2), add),
    primitive("-", Arity::Exactly(2), sub),
    primitive("*", Arity::Exactly(2), mul),
    primitive("/", Arity::Exactly(2), div),
    primitive("//", Arity::Exactly(2), floor_div),
    primitive("%", Arity::Exactly(2), modulo),
    primitive("**", Arity::Exactly(2), power),
    // Comparison
    primitive("==", Arity::Exactly(2), eq),
    primitive("!=", Arity::Exactly(2), not_eq),
    primitive("<", Arity::Exactly(2), lt),
    primitive(">", Arity::Exactly(2), gt),
    primitive("<=", Arity::Exactly(2), lt_eq),
    primitive(">=", Arity::Exactly(2), gt_eq),
    // Numeric
    primitive("abs", Arity::Exactly(1), abs),
    primitive("max", Arity::Exactly(2), max),
    primitive("min", Arity::Exactly(2), min),
    primitive("pow", Arity::Exactly(2), power),
    // Sequences
    primitive("len", Arity::Exactly(1), len),
    primitive("head", Arity::Exactly(1), head),
    primitive("tail", Arity::Exactly(1), tail),
    primitive("append", Arity::Exactly(2), append),
    primitive("concat", Arity::Exactly(2), concat),
    // Strings and conversion
    primitive("upper", Arity::Exactly(1), upper),
    primitive("lower", Arity::Exactly(1), lower),
    primitive("str", Arity::Exactly(1), to_str),
    primitive("range", Arity::Between(1, 2), range),
    primitive("tuple", Arity::Exactly(1), to_tuple),
    primitive("print", Arity::AtLeast(0), print),
];

/// Every primitive, in table order.
pub fn primitive_table() -> &'static [Primitive] {
    &PRIMITIVES
}

pub fn lookup_primitive(name: &str) -> Option<&'static Primitive> {
    PRIMITIVES.iter().find(|p| p.name == name)
}

// Operand helpers

/// Both operands as numbers, or a Type error naming the first offender.
fn numbers(op: &str, a: &Value, b: &Value) -> Result<(f64, f64), EvalError> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok((*x, *y)),
        (Value::Number(_), other) | (other, _) => {
            Err(type_mismatch_in(op, "number", other.type_name()))
        }
    }
}

fn number(op: &str, a: &Value) -> Result<f64, EvalError> {
    match a {
        Value::Number(n) => Ok(*n),
        other => Err(type_mismatch_in(op, "number", other.type_name())),
    }
}

fn string<'v>(op: &str, a: &'v Value) -> Result<&'v str, EvalError> {
    a.as_str()
        .ok_or_else(|| type_mismatch_in(op, "string", a.type_name()))
}

fn joined(a: &[Value], b: &[Value]) -> Vec<Value> {
    let mut items = Vec::with_capacity(a.len() + b.len());
    items.extend_from_slice(a);
    items.extend_from_slice(b);
    items
}

/// Same-variant sequence concatenation shared by `+` and `concat`.
///
/// `fallback` is the expected descriptor when the left operand is not a
/// sequence at all.
fn join_sequences(op: &str, fallback: &str, a: &Value, b: &Value) -> EvalResult {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => Ok(Value::string(format!("{}{}", &**x, &**y))),
        (Value::List(x), Value::List(y)) => Ok(Value::list(joined(x, y))),
        (Value::Tuple(x), Value::Tuple(y)) => Ok(Value::tuple(joined(x, y))),
        (Value::Str(_) | Value::List(_) | Value::Tuple(_), other) => {
            Err(type_mismatch_in(op, a.type_name(), other.type_name()))
        }
        (other, _) => Err(type_mismatch_in(op, fallback, other.type_name())),
    }
}

/// Repetition count: truncated toward zero, non-positive means empty.
#[allow(clippy::cast_sign_loss)]
fn repeat_count(factor: f64) -> usize {
    if factor >= 1.0 {
        factor.trunc() as usize
    } else {
        0
    }
}

/// Length of `unit` repeated `count` times, if within [`MAX_SEQUENCE_LEN`].
fn repeated_len(unit: usize, count: usize) -> Result<usize, EvalError> {
    unit.checked_mul(count)
        .filter(|&len| len <= MAX_SEQUENCE_LEN)
        .ok_or_else(|| result_too_large("*", MAX_SEQUENCE_LEN))
}

/// `None` when `seq` is not a sequence.
fn repeat(seq: &Value, factor: f64) -> Option<EvalResult> {
    let count = repeat_count(factor);
    let repeated = match seq {
        Value::Str(s) => repeated_len(s.len(), count).map(|len| {
            if len == 0 {
                Value::string("")
            } else {
                Value::string(s.repeat(count))
            }
        }),
        Value::List(items) | Value::Tuple(items) => {
            repeated_len(items.len(), count).map(|len| {
                let mut out = Vec::with_capacity(len);
                if len > 0 {
                    for _ in 0..count {
                        out.extend_from_slice(items);
                    }
                }
                if matches!(seq, Value::List(_)) {
                    Value::list(out)
                } else {
                    Value::tuple(out)
                }
            })
        }
        _ => return None,
    };
    Some(repeated)
}

// Arithmetic

fn add(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    match (&args[0], &args[1]) {
        (Value::Number(x), Value::Number(y)) => Ok(Value::Number(x + y)),
        (Value::Number(_), other) => Err(type_mismatch_in("+", "number", other.type_name())),
        (a, b) => join_sequences("+", "number", a, b),
    }
}

fn sub(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    let (x, y) = numbers("-", &args[0], &args[1])?;
    Ok(Value::Number(x - y))
}

fn mul(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    match (&args[0], &args[1]) {
        (Value::Number(x), Value::Number(y)) => Ok(Value::Number(x * y)),
        (seq, Value::Number(n)) | (Value::Number(n), seq) => repeat(seq, *n)
            .unwrap_or_else(|| Err(type_mismatch_in("*", "number", seq.type_name()))),
        (Value::Str(_) | Value::List(_) | Value::Tuple(_), other) | (other, _) => {
            Err(type_mismatch_in("*", "number", other.type_name()))
        }
    }
}

fn div(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    let (x, y) = numbers("/", &args[0], &args[1])?;
    if y == 0.0 {
        return Err(zero_division());
    }
    Ok(Value::Number(x / y))
}

fn floor_div(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    let (x, y) = numbers("//", &args[0], &args[1])?;
    if y == 0.0 {
        return Err(zero_division());
    }
    Ok(Value::Number((x / y).floor()))
}

/// Remainder with the sign of the divisor.
fn modulo(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    let (x, y) = numbers("%", &args[0], &args[1])?;
    if y == 0.0 {
        return Err(zero_division());
    }
    let r = x % y;
    if r != 0.0 && (r < 0.0) != (y < 0.0) {
        Ok(Value::Number(r + y))
    } else {
        Ok(Value::Number(r))
    }
}

fn power(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    let (x, y) = numbers("**", &args[0], &args[1])?;
    if x == 0.0 && y < 0.0 {
        return Err(zero_division());
    }
    Ok(Value::Number(x.powf(y)))
}

// Comparison

fn eq(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    Ok(Value::Bool(args[0].equals(&args[1])))
}

fn not_eq(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    Ok(Value::Bool(!args[0].equals(&args[1])))
}

/// Ordering of two numbers or two strings. `None` when a NaN is involved.
fn ordering(op: &str, a: &Value, b: &Value) -> Result<Option<Ordering>, EvalError> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(x.partial_cmp(y)),
        (Value::Str(x), Value::Str(y)) => Ok(Some((**x).cmp(&**y))),
        (Value::Number(_) | Value::Str(_), other) => {
            Err(type_mismatch_in(op, a.type_name(), other.type_name()))
        }
        (other, _) => Err(type_mismatch_in(op, "number or string", other.type_name())),
    }
}

fn lt(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    let ord = ordering("<", &args[0], &args[1])?;
    Ok(Value::Bool(ord == Some(Ordering::Less)))
}

fn gt(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    let ord = ordering(">", &args[0], &args[1])?;
    Ok(Value::Bool(ord == Some(Ordering::Greater)))
}

fn lt_eq(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    let ord = ordering("<=", &args[0], &args[1])?;
    Ok(Value::Bool(matches!(
        ord,
        Some(Ordering::Less | Ordering::Equal)
    )))
}

fn gt_eq(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    let ord = ordering(">=", &args[0], &args[1])?;
    Ok(Value::Bool(matches!(
        ord,
        Some(Ordering::Greater | Ordering::Equal)
    )))
}

// Numeric

fn abs(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    Ok(Value::Number(number("abs", &args[0])?.abs()))
}

fn max(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    let (x, y) = numbers("max", &args[0], &args[1])?;
    Ok(Value::Number(x.max(y)))
}

fn min(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    let (x, y) = numbers("min", &args[0], &args[1])?;
    Ok(Value::Number(x.min(y)))
}

// Sequences

fn len(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    let n = match &args[0] {
        Value::List(items) | Value::Tuple(items) => items.len(),
        Value::Str(s) => s.chars().count(),
        other => {
            return Err(type_mismatch_in(
                "len",
                "list, tuple or string",
                other.type_name(),
            ))
        }
    };
    Ok(Value::Number(n as f64))
}

fn head(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    match &args[0] {
        Value::List(items) | Value::Tuple(items) => items.first().cloned().ok_or_else(|| {
            type_mismatch_in(
                "head",
                "non-empty list or tuple",
                &format!("empty {}", args[0].type_name()),
            )
        }),
        other => Err(type_mismatch_in("head", "list or tuple", other.type_name())),
    }
}

fn tail(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    let seq = &args[0];
    match seq {
        Value::List(items) | Value::Tuple(items) => {
            let Some((_, rest)) = items.split_first() else {
                return Err(type_mismatch_in(
                    "tail",
                    "non-empty list or tuple",
                    &format!("empty {}", seq.type_name()),
                ));
            };
            Ok(if matches!(seq, Value::List(_)) {
                Value::list(rest.to_vec())
            } else {
                Value::tuple(rest.to_vec())
            })
        }
        other => Err(type_mismatch_in("tail", "list or tuple", other.type_name())),
    }
}

fn append(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    match &args[0] {
        Value::List(items) => {
            let mut out = Vec::with_capacity(items.len() + 1);
            out.extend_from_slice(items);
            out.push(args[1].clone());
            Ok(Value::list(out))
        }
        other => Err(type_mismatch_in("append", "list", other.type_name())),
    }
}

fn concat(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    join_sequences("concat", "list, tuple or string", &args[0], &args[1])
}

// Strings and conversion

fn upper(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    Ok(Value::string(string("upper", &args[0])?.to_uppercase()))
}

fn lower(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    Ok(Value::string(string("lower", &args[0])?.to_lowercase()))
}

fn to_str(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    match &args[0] {
        s @ Value::Str(_) => Ok(s.clone()),
        other => Ok(Value::string(other.to_string())),
    }
}

/// `range(end)` or `range(start, end)`, end-exclusive, bounds truncated.
fn range(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    let (start, end) = match args {
        [end] => (0.0, number("range", end)?),
        [start, end] => numbers("range", start, end)?,
        _ => return Err(primitive_arity("range", Arity::Between(1, 2), args.len())),
    };
    if let Some(bad) = [start, end].into_iter().find(|n| !n.is_finite()) {
        return Err(non_finite("range", bad));
    }
    let (start, end) = (start.trunc() as i64, end.trunc() as i64);
    let len = i128::from(end) - i128::from(start);
    if len > 0 && !usize::try_from(len).is_ok_and(|len| len <= MAX_SEQUENCE_LEN) {
        return Err(result_too_large("range", MAX_SEQUENCE_LEN));
    }
    Ok(Value::list(
        (start..end).map(|i| Value::Number(i as f64)).collect(),
    ))
}

fn to_tuple(args: &[Value], _: &PrimitiveContext<'_>) -> EvalResult {
    match &args[0] {
        Value::List(items) => Ok(Value::tuple(items.to_vec())),
        other => Err(type_mismatch_in("tuple", "list", other.type_name())),
    }
}

fn print(args: &[Value], ctx: &PrimitiveContext<'_>) -> EvalResult {
    let line = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    ctx.print_handler.println(&line);
    Ok(Value::None)
}
