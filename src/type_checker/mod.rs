//! Semantic analysis module.
//!
//! This module walks the AST once and reports diagnostics for:
//!
//! - Redeclared variables
//! - Reassignment of `static` variables after their first value
//! - Initializers and assignments whose inferred type does not fit the declaration
//!
//! Names live in one flat namespace per program and all state is reset for every
//! check.

pub mod inference;
pub mod type_checker;

#[cfg(test)]
mod tests;
