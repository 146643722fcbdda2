//! Expression nodes.

use crate::{BinaryOp, Name, Span};

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Expression kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    // Literals
    Number(f64),
    Bool(bool),
    None,
    Str(String),
    List(Vec<Expr>),
    Tuple(Vec<Expr>),

    /// Variable reference.
    Var(Name),

    /// `left op right`, evaluated as a call to the primitive named by `op`.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    // Logical
    Not(Box<Expr>),
    And {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Or {
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `callee(args...)`
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `collection[index]`
    Subscript {
        collection: Box<Expr>,
        index: Box<Expr>,
    },
    /// `element in container`
    In {
        element: Box<Expr>,
        container: Box<Expr>,
    },
    /// `object.attr`
    Attribute { object: Box<Expr>, attr: Name },
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr {
            kind,
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn number(value: f64) -> Self {
        Self::new(ExprKind::Number(value))
    }

    pub fn bool(value: bool) -> Self {
        Self::new(ExprKind::Bool(value))
    }

    pub fn none() -> Self {
        Self::new(ExprKind::None)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ExprKind::Str(value.into()))
    }

    pub fn list(elements: Vec<Expr>) -> Self {
        Self::new(ExprKind::List(elements))
    }

    pub fn tuple(elements: Vec<Expr>) -> Self {
        Self::new(ExprKind::Tuple(elements))
    }

    pub fn var(name: impl Into<Name>) -> Self {
        Self::new(ExprKind::Var(name.into()))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Expr) -> Self {
        Self::new(ExprKind::Not(Box::new(operand)))
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::And {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::Or {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Self::new(ExprKind::Call {
            callee: Box::new(callee),
            args,
        })
    }

    /// Call a function by name: `name(args...)`.
    pub fn call_named(name: impl Into<Name>, args: Vec<Expr>) -> Self {
        Self::call(Self::var(name), args)
    }

    pub fn subscript(collection: Expr, index: Expr) -> Self {
        Self::new(ExprKind::Subscript {
            collection: Box::new(collection),
            index: Box::new(index),
        })
    }

    pub fn contains(element: Expr, container: Expr) -> Self {
        Self::new(ExprKind::In {
            element: Box::new(element),
            container: Box::new(container),
        })
    }

    pub fn attr(object: Expr, attr: impl Into<Name>) -> Self {
        Self::new(ExprKind::Attribute {
            object: Box::new(object),
            attr: attr.into(),
        })
    }

    /// Call a method on an object: `object.method(args...)`.
    pub fn method_call(object: Expr, method: impl Into<Name>, args: Vec<Expr>) -> Self {
        Self::call(Self::attr(object, method), args)
    }
}
