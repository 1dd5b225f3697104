//! Expression parsing for uC
//!
//! Precedence climbing over the binary operators, with assignment,
//! cast, unary, postfix and primary expressions layered beneath.

mod primary;
mod postfix;
mod unary;
mod binary;
mod assignment;

use crate::ast::{Node, NodeKind};
use crate::lexer::TokenType;
use crate::parser::{ParseError, Parser};

impl Parser {
    /// Parse expression (top level). Comma-separated expressions are
    /// collected into one flat `ExprList`.
    pub fn parse_expression(&mut self) -> Result<Node, ParseError> {
        let first = self.parse_assignment_expression()?;
        if !self.check(&TokenType::Comma) {
            return Ok(first);
        }

        let coord = first.coord;
        let mut exprs = vec![first];
        while self.match_token(&TokenType::Comma).is_some() {
            exprs.push(self.parse_assignment_expression()?);
        }
        Ok(Node::new(NodeKind::ExprList { exprs }, coord))
    }

    /// Parse call or `read` arguments: a single argument is returned as is,
    /// several become an `ExprList`
    pub(crate) fn parse_argument_list(&mut self) -> Result<Node, ParseError> {
        self.parse_expression()
    }
}
