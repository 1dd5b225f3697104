//! Error handling for the uC compiler
//!
//! This module defines the workspace-wide error type and the diagnostic
//! sink used for non-fatal (lexical) errors.

use crate::source_loc::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Lexical error at {location}: {message}")]
    LexError { location: Coord, message: String },

    #[error("Parse error at {}: {message}", display_location(.location))]
    ParseError {
        location: Option<Coord>,
        message: String,
    },

    #[error("Type error at {}: {message}", display_location(.location))]
    TypeError {
        location: Option<Coord>,
        message: String,
    },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}

fn display_location(location: &Option<Coord>) -> String {
    match location {
        Some(coord) => coord.to_string(),
        None => "<unknown>".to_string(),
    }
}

/// Raised when a scope is closed (or written to) while none is open
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} called with no open scope")]
pub struct ScopeUnderflow {
    pub operation: &'static str,
}

/// A reported error with its source location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub location: Option<Coord>,
}

impl Diagnostic {
    pub fn error(message: String, location: Option<Coord>) -> Self {
        Self { message, location }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(coord) => write!(f, "{}: error: {}", coord, self.message),
            None => write!(f, "error: {}", self.message),
        }
    }
}

/// Error reporter for collecting and displaying diagnostics
#[derive(Debug, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report an error diagnostic
    pub fn error(&mut self, message: String, location: Option<Coord>) {
        self.diagnostics.push(Diagnostic::error(message, location));
        self.error_count += 1;
    }

    /// Record a fatal compiler error as a diagnostic
    pub fn report(&mut self, err: &CompilerError) {
        let location = match err {
            CompilerError::LexError { location, .. } => Some(*location),
            CompilerError::ParseError { location, .. } | CompilerError::TypeError { location, .. } => *location,
            CompilerError::IoError { .. } | CompilerError::InternalError { .. } => None,
        };
        self.error(err.to_string(), location);
    }

    /// Check if any errors have been reported
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Get the number of errors
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Print all diagnostics to stderr
    pub fn print_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!("{}", diagnostic);
        }
    }

    /// Create a summary string
    pub fn summary(&self) -> String {
        match self.error_count {
            0 => "No errors".to_string(),
            1 => "1 error".to_string(),
            e => format!("{} errors", e),
        }
    }
}

impl CompilerError {
    /// Create a lexer error
    pub fn lexer_error(message: String, location: Coord) -> Self {
        CompilerError::LexError { location, message }
    }

    /// Create a parse error
    pub fn parse_error(message: String, location: Option<Coord>) -> Self {
        CompilerError::ParseError { location, message }
    }

    /// Create a type error
    pub fn type_error(message: String, location: Option<Coord>) -> Self {
        CompilerError::TypeError { location, message }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<ScopeUnderflow> for CompilerError {
    fn from(err: ScopeUnderflow) -> Self {
        CompilerError::InternalError {
            message: err.to_string(),
        }
    }
}
