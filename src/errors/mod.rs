//! Error types and diagnostics for the front end.
//!
//! This module defines the error types used by every stage. It includes:
//!
//! - Error structures with source span information
//! - Specific error variants for lexing, parsing and checking
//! - Parse errors and diagnostics handed back to callers
//! - The `DiagnosticSink` seam the type checker reports into

pub mod diagnostics;
pub mod errors;
