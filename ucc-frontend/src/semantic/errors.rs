//! Type checking error definitions
//!
//! Every variant is fatal; checking stops at the first one.

use crate::semantic::types::ValueType;
use thiserror::Error;
use ucc_common::{CompilerError, Coord, ScopeUnderflow};

/// Type checking errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    #[error("{}: Undefined symbol '{name}'", at(.location))]
    UndefinedSymbol { name: String, location: Option<Coord> },

    #[error("{}: Undefined function '{name}'", at(.location))]
    UndefinedFunction { name: String, location: Option<Coord> },

    #[error("{}: Type mismatch: expected {expected}, found {found}", at(.location))]
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
        location: Option<Coord>,
    },

    #[error("{}: Operator '{op}' is not supported by type {ty}", at(.location))]
    OperatorMismatch {
        op: String,
        ty: ValueType,
        location: Option<Coord>,
    },

    #[error("{}: Array index must be int, found {found}", at(.location))]
    IndexTypeError { found: ValueType, location: Option<Coord> },

    #[error("{}: Inconsistent initializer types: {expected} and {found}", at(.location))]
    TypeConsistency {
        expected: ValueType,
        found: ValueType,
        location: Option<Coord>,
    },

    #[error("{}: Function '{name}' expects {expected} argument(s), got {found}", at(.location))]
    ArgumentCountMismatch {
        name: String,
        expected: usize,
        found: usize,
        location: Option<Coord>,
    },

    #[error("{0}")]
    ScopeUnderflow(#[from] ScopeUnderflow),
}

fn at(location: &Option<Coord>) -> String {
    match location {
        Some(coord) => coord.to_string(),
        None => "<unknown>".to_string(),
    }
}

impl TypeError {
    /// Coordinate of the offending node, when known
    pub fn location(&self) -> Option<Coord> {
        match self {
            TypeError::UndefinedSymbol { location, .. }
            | TypeError::UndefinedFunction { location, .. }
            | TypeError::TypeMismatch { location, .. }
            | TypeError::OperatorMismatch { location, .. }
            | TypeError::IndexTypeError { location, .. }
            | TypeError::TypeConsistency { location, .. }
            | TypeError::ArgumentCountMismatch { location, .. } => *location,
            TypeError::ScopeUnderflow(_) => None,
        }
    }
}

impl From<TypeError> for CompilerError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::ScopeUnderflow(inner) => inner.into(),
            other => {
                let location = other.location();
                // Drop the coordinate prefix; CompilerError renders its own
                let text = other.to_string();
                let message = match text.split_once(": ") {
                    Some((_, rest)) => rest.to_string(),
                    None => text,
                };
                CompilerError::type_error(message, location)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FLOAT_TYPE, INT_TYPE};

    #[test]
    fn test_display() {
        let err = TypeError::TypeMismatch {
            expected: ValueType::Basic(&INT_TYPE),
            found: ValueType::Basic(&FLOAT_TYPE),
            location: Some(Coord::new(1, 8)),
        };
        assert_eq!(err.to_string(), "1:8: Type mismatch: expected int, found float");
    }

    #[test]
    fn test_into_compiler_error() {
        let err = TypeError::UndefinedSymbol { name: "y".to_string(), location: Some(Coord::new(1, 1)) };
        let compiler_err: CompilerError = err.into();
        assert_eq!(compiler_err.to_string(), "Type error at 1:1: Undefined symbol 'y'");

        let underflow: CompilerError = TypeError::from(ScopeUnderflow { operation: "end_scope" }).into();
        assert!(matches!(underflow, CompilerError::InternalError { .. }));
    }
}
