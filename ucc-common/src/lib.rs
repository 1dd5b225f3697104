//! uC Compiler - Common Types and Utilities
//!
//! This crate contains shared types, error definitions, and utilities
//! used across all components of the uC compiler.

pub mod error;
pub mod source_loc;
pub mod symtab;

pub use error::{CompilerError, Diagnostic, ErrorReporter, ScopeUnderflow};
pub use source_loc::{Coord, SourceTracker};
pub use symtab::ScopedTable;
