//! uC Compiler - Frontend
//!
//! This crate provides the frontend components for the uC compiler:
//! - Lexer: tokenizes uC source text
//! - Parser: builds the AST from tokens, composing declarators
//! - AST: generic node tree with rendering and a visitor trait
//! - Types: the static registry of uC type descriptors
//! - Semantic analysis: scope-aware type checking

pub mod lexer;
pub mod parser;
pub mod ast;
pub mod types;
pub mod semantic;

pub use ast::{Node, NodeKind, NodeVisitor, ShowOptions};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{ParseError, Parser};
pub use semantic::{TypeChecker, TypeError, ValueType};

use log::warn;
use ucc_common::{CompilerError, Coord, ErrorReporter};

/// Parse a translation unit. Lexical errors are logged and skipped.
pub fn parse(source: &str) -> Result<Node, ParseError> {
    let lexer = Lexer::new(source, |message, line, column| {
        warn!("{}:{}: {}", line, column, message);
    });
    Parser::new(lexer).parse_program()
}

/// Parse a translation unit, recording lexical errors in `reporter`
pub fn parse_with_reporter(source: &str, reporter: &mut ErrorReporter) -> Result<Node, ParseError> {
    let lexer = Lexer::new(source, |message, line, column| {
        reporter.error(message.to_string(), Some(Coord::new(line, column)));
    });
    Parser::new(lexer).parse_program()
}

/// Type-check a parsed program, stopping at the first error
pub fn check(program: &Node) -> Result<(), TypeError> {
    semantic::check(program)
}

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Tokenize source text; the first lexical error fails the call
    pub fn tokenize_source(source: &str) -> Result<Vec<Token>, CompilerError> {
        let mut errors = Vec::new();
        let tokens = Lexer::new(source, |message, line, column| {
            errors.push(CompilerError::lexer_error(message.to_string(), Coord::new(line, column)));
        })
        .tokenize();

        match errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(tokens),
        }
    }

    /// Parse uC source text into an AST
    pub fn parse_source(source: &str) -> Result<Node, CompilerError> {
        let tokens = Self::tokenize_source(source)?;
        let program = Parser::new(tokens).parse_program()?;
        Ok(program)
    }

    /// Parse and type-check uC source text
    pub fn analyze_source(source: &str) -> Result<Node, CompilerError> {
        let program = Self::parse_source(source)?;
        check(&program)?;
        Ok(program)
    }
}
