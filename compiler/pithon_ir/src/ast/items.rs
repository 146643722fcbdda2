//! Function and class definitions.

use std::rc::Rc;

use crate::{Name, Stmt};

/// A `def` statement's definition.
///
/// Shared by reference between the tree and every closure created from it.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub name: Name,
    /// Positional parameter names, in declaration order.
    pub params: Vec<Name>,
    /// Trailing parameter collecting surplus positional arguments.
    pub vararg: Option<Name>,
    pub body: Vec<Stmt>,
}

impl FunctionDef {
    pub fn new(name: impl Into<Name>, params: Vec<Name>, body: Vec<Stmt>) -> Self {
        FunctionDef {
            name: name.into(),
            params,
            vararg: None,
            body,
        }
    }

    #[must_use]
    pub fn with_vararg(mut self, vararg: impl Into<Name>) -> Self {
        self.vararg = Some(vararg.into());
        self
    }

    /// Wrap for sharing between the tree and closures.
    pub fn shared(self) -> Rc<Self> {
        Rc::new(self)
    }
}

/// A `class` statement's definition.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDef {
    pub name: Name,
    pub methods: Vec<Rc<FunctionDef>>,
}

impl ClassDef {
    pub fn new(name: impl Into<Name>, methods: Vec<FunctionDef>) -> Self {
        ClassDef {
            name: name.into(),
            methods: methods.into_iter().map(Rc::new).collect(),
        }
    }
}
