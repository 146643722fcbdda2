//! Pithon IR - the syntax tree consumed by the evaluator.
//!
//! This crate contains:
//! - `Name` for identifiers (cheap to clone, shared by reference)
//! - `Span` for source locations reported back by diagnostics
//! - AST nodes (`Expr`, `Stmt`, `FunctionDef`, `ClassDef`, `BinaryOp`)
//!
//! The parser is not part of this workspace. Whatever builds the tree
//! (a parser or a test) goes through the node constructors in `ast`, and
//! the evaluator assumes the tree is well formed.

pub mod ast;
mod name;
mod span;

pub use ast::{BinaryOp, ClassDef, Expr, ExprKind, FunctionDef, Stmt, StmtKind};
pub use name::Name;
pub use span::Span;
