//! Primary expression parsing

use crate::ast::{Node, NodeKind};
use crate::lexer::{Token, TokenType};
use crate::parser::{ParseError, Parser};

impl Parser {
    /// Parse `ID | INT | FLOAT | CHAR | STRING | '(' expression ')'`
    pub fn parse_primary_expression(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.advance() else {
            return Err(self.eof_error("expression".to_string()));
        };
        let coord = Some(token.coord);

        let literal_type = match &token.token_type {
            TokenType::IntLiteral(_) => "int",
            TokenType::FloatLiteral(_) => "float",
            TokenType::CharLiteral(_) => "char",
            TokenType::StringLiteral(_) => "string",
            TokenType::Identifier(name) => {
                return Ok(Node::new(NodeKind::ID { name: name.clone() }, coord));
            }
            TokenType::LeftParen => {
                let expr = self.parse_expression()?;
                self.expect(TokenType::RightParen, "parenthesized expression")?;
                return Ok(expr);
            }
            _ => {
                return Err(ParseError::UnexpectedToken { expected: "expression".to_string(), found: token });
            }
        };

        Ok(Self::constant(literal_type, &token))
    }

    fn constant(ty: &str, token: &Token) -> Node {
        Node::new(
            NodeKind::Constant { ty: ty.to_string(), value: token.token_type.to_string() },
            Some(token.coord),
        )
    }
}
