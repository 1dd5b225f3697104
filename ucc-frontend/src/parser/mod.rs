//! uC Recursive Descent Parser
//!
//! Parses uC tokens into an Abstract Syntax Tree (AST).
//! Declarators are composed in a per-item arena (see [`declarator`]) and
//! frozen into owned nodes before the tree is returned.

pub mod errors;
pub(crate) mod declarator;
pub mod declarations;
pub mod statements;
pub mod expressions;

use crate::ast::{Node, NodeKind};
use crate::lexer::{Token, TokenType};
use declarator::DeclaratorArena;
use log::{debug, trace};
use std::collections::VecDeque;
use ucc_common::Coord;

pub use errors::ParseError;

/// uC Parser
pub struct Parser {
    pub(crate) tokens: VecDeque<Token>,
    pub(crate) last_coord: Option<Coord>,
    pub(crate) arena: DeclaratorArena,
}

impl Parser {
    /// Create a new parser over any token source
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
            last_coord: None,
            arena: DeclaratorArena::new(),
        }
    }

    /// Peek at current token without consuming
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// Peek at the token `offset` positions ahead
    pub(crate) fn peek_nth(&self, offset: usize) -> Option<&TokenType> {
        self.tokens.get(offset).map(|t| &t.token_type)
    }

    /// Get current token and advance
    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.pop_front()?;
        self.last_coord = Some(token.coord);
        Some(token)
    }

    /// Check if current token matches expected type
    pub(crate) fn check(&self, token_type: &TokenType) -> bool {
        self.peek()
            .is_some_and(|token| std::mem::discriminant(&token.token_type) == std::mem::discriminant(token_type))
    }

    /// Consume token if it matches expected type
    pub(crate) fn match_token(&mut self, token_type: &TokenType) -> Option<Token> {
        if self.check(token_type) {
            self.advance()
        } else {
            None
        }
    }

    /// Expect and consume a specific token type
    pub(crate) fn expect(&mut self, token_type: TokenType, context: &str) -> Result<Token, ParseError> {
        match self.advance() {
            Some(token) if std::mem::discriminant(&token.token_type) == std::mem::discriminant(&token_type) => {
                Ok(token)
            }
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: format!("'{}' in {}", token_type, context),
                found: token,
            }),
            None => Err(self.eof_error(format!("'{}' in {}", token_type, context))),
        }
    }

    /// Expect an identifier, returning its name and coordinate
    pub(crate) fn expect_identifier(&mut self, context: &str) -> Result<(String, Coord), ParseError> {
        match self.advance() {
            Some(Token { token_type: TokenType::Identifier(name), coord }) => Ok((name, coord)),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: format!("identifier in {}", context),
                found: token,
            }),
            None => Err(self.eof_error(format!("identifier in {}", context))),
        }
    }

    /// Error for running out of tokens, located at the last token seen
    pub(crate) fn eof_error(&self, expected: String) -> ParseError {
        ParseError::UnexpectedEndOfFile { expected, location: self.last_coord }
    }

    /// Error for the current token, or end of input if there is none
    pub(crate) fn unexpected(&mut self, expected: &str) -> ParseError {
        match self.advance() {
            Some(found) => ParseError::UnexpectedToken { expected: expected.to_string(), found },
            None => self.eof_error(expected.to_string()),
        }
    }

    /// Get current location for error reporting
    pub(crate) fn current_location(&self) -> Option<Coord> {
        self.peek().map(|t| t.coord).or(self.last_coord)
    }

    /// Parse a complete program: one or more global items
    pub fn parse_program(&mut self) -> Result<Node, ParseError> {
        let mut gdecls = Vec::new();

        while self.peek().is_some() {
            self.arena.reset();
            gdecls.push(self.parse_global_item()?);
            trace!("parsed global item {}", gdecls.len());
        }

        if gdecls.is_empty() {
            return Err(self.eof_error("a declaration or statement".to_string()));
        }

        debug!("parsed program with {} global items", gdecls.len());
        Ok(Node::new(NodeKind::Program { gdecls }, None))
    }
}
