//! Lexical frames for variable scoping.
//!
//! A frame is a name-to-value map plus an optional parent. Frames are shared
//! by reference: a closure captures the frame it was defined in, and a call
//! frame is a child of the callee's captured frame. Writes always target the
//! frame they are given, so a descendant can shadow an ancestor's binding
//! but never overwrite it.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use pithon_ir::Name;
use rustc_hash::FxHashMap;

use crate::primitives::primitive_table;
use crate::value::Value;

/// A single-threaded scope wrapper for reference-counted interior mutability.
///
/// This type wraps `Rc<RefCell<T>>` and is the only way shared mutable state
/// (frames and object attribute maps) is allocated in the evaluator.
///
/// # Thread Safety
/// `LocalScope<T>` is NOT thread-safe. Evaluation is single-threaded, so
/// `Rc` is used instead of `Arc`.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Returns true if both handles point at the same cell.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single frame containing variable bindings.
#[derive(Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this frame, replacing any previous binding here.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Look up a name, walking outward through the parents.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup(name),
            None => None,
        }
    }
}

/// Handle to one frame of the environment chain.
///
/// Cloning the handle shares the frame; it never copies bindings.
#[derive(Clone, Default)]
pub struct Environment {
    frame: LocalScope<Scope>,
}

impl Environment {
    /// An empty root frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// The initial environment: a root frame holding every primitive.
    pub fn with_primitives() -> Self {
        let env = Environment::new();
        {
            let mut frame = env.frame.borrow_mut();
            for primitive in primitive_table() {
                frame.define(Name::new(primitive.name), Value::Primitive(primitive));
            }
        }
        env
    }

    /// A fresh frame whose parent is this one.
    #[must_use]
    pub fn child(&self) -> Environment {
        Environment {
            frame: LocalScope::new(Scope::with_parent(self.frame.clone())),
        }
    }

    /// Bind `name` in this (innermost) frame.
    pub fn define(&self, name: Name, value: Value) {
        self.frame.borrow_mut().define(name, value);
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.frame.borrow().lookup(name)
    }

    /// Every name bound anywhere in the chain, sorted and de-duplicated.
    pub fn visible_names(&self) -> Vec<Name> {
        let mut names = Vec::new();
        let mut current = Some(self.frame.clone());
        while let Some(frame) = current {
            let scope = frame.borrow();
            names.extend(scope.bindings.keys().cloned());
            current = scope.parent.clone();
        }
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Returns true if both handles refer to the same frame.
    pub fn same_frame(&self, other: &Environment) -> bool {
        self.frame.ptr_eq(&other.frame)
    }
}

// Frames routinely contain closures that capture the same frame, so the
// derived form would recurse forever. Only the local names are shown.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.frame.borrow();
        let mut names: Vec<&str> = scope.bindings.keys().map(Name::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}
