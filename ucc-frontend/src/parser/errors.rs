//! Parse error types for the uC parser
//!
//! Every parse error is fatal and displays as `line:column: message`.

use crate::lexer::Token;
use thiserror::Error;
use ucc_common::{CompilerError, Coord};

/// Parse error types specific to the parser
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("{}: Expected {expected}, found '{}'", .found.coord, .found.token_type)]
    UnexpectedToken { expected: String, found: Token },

    #[error("{}: Unexpected end of input, expected {expected}", at(.location))]
    UnexpectedEndOfFile {
        expected: String,
        location: Option<Coord>,
    },

    #[error("{}: Invalid multiple types specified", at(.location))]
    InvalidMultipleTypes { location: Option<Coord> },

    #[error("{}: Missing type in declaration", at(.location))]
    MissingType { location: Option<Coord> },

    #[error("{}: {message}", at(.location))]
    InvalidExpression {
        message: String,
        location: Option<Coord>,
    },
}

fn at(location: &Option<Coord>) -> String {
    match location {
        Some(coord) => coord.to_string(),
        None => "<eof>".to_string(),
    }
}

impl ParseError {
    /// Coordinate of the offending construct, when known
    pub fn location(&self) -> Option<Coord> {
        match self {
            ParseError::UnexpectedToken { found, .. } => Some(found.coord),
            ParseError::UnexpectedEndOfFile { location, .. }
            | ParseError::InvalidMultipleTypes { location }
            | ParseError::MissingType { location }
            | ParseError::InvalidExpression { location, .. } => *location,
        }
    }

    /// The message without its coordinate prefix
    pub fn message(&self) -> String {
        match self {
            ParseError::UnexpectedToken { expected, found } => {
                format!("Expected {}, found '{}'", expected, found.token_type)
            }
            ParseError::UnexpectedEndOfFile { expected, .. } => {
                format!("Unexpected end of input, expected {}", expected)
            }
            ParseError::InvalidMultipleTypes { .. } => "Invalid multiple types specified".to_string(),
            ParseError::MissingType { .. } => "Missing type in declaration".to_string(),
            ParseError::InvalidExpression { message, .. } => message.clone(),
        }
    }
}

impl From<ParseError> for CompilerError {
    fn from(err: ParseError) -> Self {
        CompilerError::parse_error(err.message(), err.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenType;

    #[test]
    fn test_display_has_coordinate_prefix() {
        let err = ParseError::UnexpectedToken {
            expected: "';'".to_string(),
            found: Token::new(TokenType::RightBrace, Coord::new(4, 2)),
        };
        assert_eq!(err.to_string(), "4:2: Expected ';', found '}'");

        let err = ParseError::MissingType { location: Some(Coord::new(1, 1)) };
        assert_eq!(err.to_string(), "1:1: Missing type in declaration");
    }

    #[test]
    fn test_into_compiler_error() {
        let err = ParseError::InvalidMultipleTypes { location: Some(Coord::new(2, 9)) };
        let compiler_err: CompilerError = err.into();
        assert_eq!(
            compiler_err,
            CompilerError::parse_error("Invalid multiple types specified".to_string(), Some(Coord::new(2, 9)))
        );
    }
}
