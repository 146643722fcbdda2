//! AST node kinds.
//!
//! The tree is owned (`Box`/`Vec`), except for function definitions,
//! which are shared through `Rc` so that every closure created from a
//! `def` points at the one definition instead of copying its body.
//!
//! # Module Structure
//!
//! - `operators`: binary operators and their primitive names
//! - `expr`: expression nodes
//! - `stmt`: statement nodes
//! - `items`: function and class definitions

mod expr;
mod items;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind};
pub use items::{ClassDef, FunctionDef};
pub use operators::BinaryOp;
pub use stmt::{Stmt, StmtKind};
