//! Assignment expression parsing

use crate::ast::{Node, NodeKind};
use crate::parser::{ParseError, Parser};

impl Parser {
    /// Parse assignment expression
    pub fn parse_assignment_expression(&mut self) -> Result<Node, ParseError> {
        let left = self.parse_binary_expression()?;

        // Check for assignment operators
        let Some(op) = self.peek().and_then(|t| t.token_type.assignment_op()) else {
            return Ok(left);
        };

        if !left.is_location() {
            return Err(ParseError::InvalidExpression {
                message: format!("Cannot assign to {}", left.kind_name()),
                location: left.coord,
            });
        }

        self.advance();
        let right = self.parse_assignment_expression()?;
        let coord = left.coord;

        Ok(Node::new(
            NodeKind::Assignment { op: op.to_string(), lvalue: Box::new(left), rvalue: Box::new(right) },
            coord,
        ))
    }
}
