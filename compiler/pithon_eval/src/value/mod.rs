//! Runtime values for the Pithon interpreter.
//!
//! # Heap Enforcement
//!
//! Strings, lists and tuples live behind `Heap<T>`, whose constructor is
//! private to this module. Create them through the factory methods:
//!
//! ```text
//! let s = Value::string("hello");                  // OK
//! let list = Value::list(vec![Value::Number(1.0)]); // OK
//! let s = Value::Str(Heap::new(...));              // ERROR: Heap::new is pub(super)
//! ```
//!
//! Sequences are immutable once built. Operations such as `append` and `+`
//! produce new values. The only mutable state reachable from a value is an
//! object's attribute map and a closure's captured frame.

mod composite;
mod heap;

use std::fmt;
use std::rc::Rc;

pub use composite::{ClassValue, FunctionValue, MethodValue, ObjectValue};
pub use heap::Heap;

use crate::primitives::Primitive;

/// Runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    // Scalars
    Number(f64),
    Bool(bool),
    Str(Heap<str>),
    None,

    // Sequences
    List(Heap<Vec<Value>>),
    Tuple(Heap<Vec<Value>>),

    // Callables and objects
    Function(FunctionValue),
    Method(MethodValue),
    Class(ClassValue),
    Object(ObjectValue),
    Primitive(&'static Primitive),
}

impl Value {
    // Factory methods

    #[inline]
    pub fn string(text: impl AsRef<str>) -> Self {
        Value::Str(Heap::new(Rc::from(text.as_ref())))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(Rc::new(items)))
    }

    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(Rc::new(items)))
    }

    // Accessors

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    /// Elements of a list or tuple.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Lowercase variant descriptor used in error payloads.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::None => "none",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Function(_) => "function",
            Value::Method(_) => "method",
            Value::Class(_) => "class",
            Value::Object(_) => "object",
            Value::Primitive(_) => "primitive",
        }
    }

    /// Truthiness for `not`, `and` and `or`.
    ///
    /// Defined for bool, number, string, none, list and tuple. Returns `None`
    /// for every other variant; the caller reports the Type error.
    pub fn is_truthy(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => Some(*n != 0.0),
            Value::Str(s) => Some(!s.is_empty()),
            Value::None => Some(false),
            Value::List(items) | Value::Tuple(items) => Some(!items.is_empty()),
            Value::Function(_)
            | Value::Method(_)
            | Value::Class(_)
            | Value::Object(_)
            | Value::Primitive(_) => None,
        }
    }

    /// Structural equality as seen by `==`.
    ///
    /// Lists and tuples compare element-wise and only with their own
    /// variant. Objects, classes and closures compare by identity.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => **a == **b,
            (Value::None, Value::None) => true,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (Value::Function(a), Value::Function(b)) => a.same(b),
            (Value::Method(a), Value::Method(b)) => a.same(b),
            (Value::Class(a), Value::Class(b)) => a.same(b),
            (Value::Object(a), Value::Object(b)) => a.same(b),
            (Value::Primitive(a), Value::Primitive(b)) => a.name == b.name,
            _ => false,
        }
    }

    /// Textual form inside a container: strings are quoted.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "'{}'", &**s),
            _ => write!(f, "{self}"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

fn fmt_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        item.fmt_nested(f)?;
    }
    Ok(())
}

/// Integral numbers print without a fractional part.
fn fmt_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 {
        write!(f, "{n:.0}")
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => fmt_number(f, *n),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Str(s) => write!(f, "{}", &**s),
            Value::None => write!(f, "None"),
            Value::List(items) => {
                write!(f, "[")?;
                fmt_items(f, items)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                fmt_items(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::Function(func) => write!(f, "<function {}>", func.name()),
            Value::Method(method) => write!(f, "<bound method {}>", method.qualified_name()),
            Value::Class(class) => write!(f, "<class {}>", class.name()),
            Value::Object(obj) => write!(f, "<{} object>", obj.class().name()),
            Value::Primitive(p) => write!(f, "<primitive {}>", p.name),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}
