//! Cast and unary expression parsing

use crate::ast::{Node, NodeKind};
use crate::lexer::TokenType;
use crate::parser::{ParseError, Parser};

impl Parser {
    /// Parse `'(' type_specifier ')' cast_expression | unary_expression`
    pub fn parse_cast_expression(&mut self) -> Result<Node, ParseError> {
        let is_cast = matches!(self.peek_nth(0), Some(TokenType::LeftParen))
            && self.peek_nth(1).is_some_and(TokenType::is_type_keyword);
        if !is_cast {
            return self.parse_unary_expression();
        }

        let open = self.expect(TokenType::LeftParen, "cast")?;
        let Some(keyword) = self.advance() else {
            return Err(self.eof_error("type name in cast".to_string()));
        };
        let to_type = Node::new(NodeKind::Type { names: vec![keyword.token_type.to_string()] }, Some(keyword.coord));
        self.expect(TokenType::RightParen, "cast")?;
        let expr = self.parse_cast_expression()?;

        Ok(Node::new(
            NodeKind::Cast { to_type: Box::new(to_type), expr: Box::new(expr) },
            Some(open.coord),
        ))
    }

    /// Parse unary expression
    pub fn parse_unary_expression(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.eof_error("expression".to_string()));
        };
        let coord = Some(token.coord);

        let (op, operand_is_cast) = match token.token_type {
            TokenType::PlusPlus => ("++", false),
            TokenType::MinusMinus => ("--", false),
            TokenType::Ampersand => ("&", true),
            TokenType::Star => ("*", true),
            TokenType::Plus => ("+", true),
            TokenType::Minus => ("-", true),
            TokenType::Bang => ("!", true),
            _ => return self.parse_postfix_expression(),
        };
        self.advance();

        let expr = if operand_is_cast {
            self.parse_cast_expression()?
        } else {
            self.parse_unary_expression()?
        };

        Ok(Node::new(NodeKind::UnaryOp { op: op.to_string(), expr: Box::new(expr) }, coord))
    }
}
