//! Statement nodes.

use std::rc::Rc;

use crate::{ClassDef, Expr, FunctionDef, Name, Span};

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

/// Statement kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// Expression statement; its value is the statement's value.
    Expr(Expr),
    /// `target = value`
    Assign { target: Name, value: Expr },
    /// `object.attr = value`
    AttributeAssign {
        object: Expr,
        attr: Name,
        value: Expr,
    },
    /// `if condition: ... else: ...`; an absent `else` is an empty block.
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
    },
    While { condition: Expr, body: Vec<Stmt> },
    For {
        var: Name,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    FunctionDef(Rc<FunctionDef>),
    ClassDef(ClassDef),
    Return(Expr),
    Break,
    Continue,
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Stmt {
            kind,
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn expr(expr: Expr) -> Self {
        Self::new(StmtKind::Expr(expr))
    }

    pub fn assign(target: impl Into<Name>, value: Expr) -> Self {
        Self::new(StmtKind::Assign {
            target: target.into(),
            value,
        })
    }

    pub fn assign_attr(object: Expr, attr: impl Into<Name>, value: Expr) -> Self {
        Self::new(StmtKind::AttributeAssign {
            object,
            attr: attr.into(),
            value,
        })
    }

    pub fn if_else(condition: Expr, then_branch: Vec<Stmt>, else_branch: Vec<Stmt>) -> Self {
        Self::new(StmtKind::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    pub fn while_loop(condition: Expr, body: Vec<Stmt>) -> Self {
        Self::new(StmtKind::While { condition, body })
    }

    pub fn for_loop(var: impl Into<Name>, iterable: Expr, body: Vec<Stmt>) -> Self {
        Self::new(StmtKind::For {
            var: var.into(),
            iterable,
            body,
        })
    }

    pub fn def(def: FunctionDef) -> Self {
        Self::new(StmtKind::FunctionDef(Rc::new(def)))
    }

    pub fn class(def: ClassDef) -> Self {
        Self::new(StmtKind::ClassDef(def))
    }

    pub fn ret(value: Expr) -> Self {
        Self::new(StmtKind::Return(value))
    }

    pub fn brk() -> Self {
        Self::new(StmtKind::Break)
    }

    pub fn cont() -> Self {
        Self::new(StmtKind::Continue)
    }

    /// Returns true for a plain `x = ...` binding.
    ///
    /// Front ends use this to decide whether to echo a unit's value.
    /// Attribute assignment is not included.
    pub fn is_assignment(&self) -> bool {
        matches!(self.kind, StmtKind::Assign { .. })
    }
}

impl From<Expr> for Stmt {
    fn from(expr: Expr) -> Self {
        let span = expr.span;
        Stmt::expr(expr).with_span(span)
    }
}
