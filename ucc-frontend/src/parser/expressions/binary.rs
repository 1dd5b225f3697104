//! Binary expression parsing with operator precedence

use crate::ast::{Node, NodeKind};
use crate::lexer::TokenType;
use crate::parser::{ParseError, Parser};

/// Number of binary precedence levels
const LEVELS: usize = 6;

/// Operator symbol for `token` at precedence `level` (0 binds loosest)
fn binary_operator(level: usize, token: &TokenType) -> Option<&'static str> {
    let op = match (level, token) {
        (0, TokenType::PipePipe) => "||",
        (1, TokenType::AmpersandAmpersand) => "&&",
        (2, TokenType::EqualEqual) => "==",
        (2, TokenType::BangEqual) => "!=",
        (3, TokenType::Less) => "<",
        (3, TokenType::LessEqual) => "<=",
        (3, TokenType::Greater) => ">",
        (3, TokenType::GreaterEqual) => ">=",
        (4, TokenType::Plus) => "+",
        (4, TokenType::Minus) => "-",
        (5, TokenType::Star) => "*",
        (5, TokenType::Slash) => "/",
        (5, TokenType::Percent) => "%",
        _ => return None,
    };
    Some(op)
}

impl Parser {
    /// Parse a binary expression (logical-or and everything tighter)
    pub fn parse_binary_expression(&mut self) -> Result<Node, ParseError> {
        self.parse_binary_level(0)
    }

    fn parse_binary_level(&mut self, level: usize) -> Result<Node, ParseError> {
        if level == LEVELS {
            return self.parse_cast_expression();
        }

        let mut left = self.parse_binary_level(level + 1)?;

        while let Some(op) = self.peek().and_then(|t| binary_operator(level, &t.token_type)) {
            self.advance();
            let right = self.parse_binary_level(level + 1)?;
            let coord = left.coord;
            left = Node::new(
                NodeKind::BinaryOp { op: op.to_string(), lvalue: Box::new(left), rvalue: Box::new(right) },
                coord,
            );
        }

        Ok(left)
    }
}
