//! Whole-program tests.
//!
//! Each file builds small programs from `pithon_ir` nodes and runs them
//! through a `Session` with a buffered print handler.

mod support;

mod properties_tests;
