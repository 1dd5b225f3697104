//! Postfix expression parsing

use crate::ast::{Node, NodeKind};
use crate::lexer::TokenType;
use crate::parser::{ParseError, Parser};

impl Parser {
    /// Parse postfix expression
    pub fn parse_postfix_expression(&mut self) -> Result<Node, ParseError> {
        let mut expr = self.parse_primary_expression()?;

        loop {
            let coord = expr.coord;
            match self.peek().map(|t| &t.token_type) {
                Some(TokenType::LeftBracket) => {
                    // Array indexing
                    self.advance();
                    let subscript = self.parse_expression()?;
                    self.expect(TokenType::RightBracket, "array index")?;
                    expr = Node::new(
                        NodeKind::ArrayRef { name: Box::new(expr), subscript: Box::new(subscript) },
                        coord,
                    );
                }
                Some(TokenType::LeftParen) => {
                    // Function call
                    self.advance();
                    let args = if self.check(&TokenType::RightParen) {
                        None
                    } else {
                        Some(Box::new(self.parse_argument_list()?))
                    };
                    self.expect(TokenType::RightParen, "function call")?;
                    expr = Node::new(NodeKind::FuncCall { name: Box::new(expr), args }, coord);
                }
                Some(TokenType::PlusPlus) => {
                    self.advance();
                    expr = Node::new(NodeKind::UnaryOp { op: "p++".to_string(), expr: Box::new(expr) }, coord);
                }
                Some(TokenType::MinusMinus) => {
                    self.advance();
                    expr = Node::new(NodeKind::UnaryOp { op: "p--".to_string(), expr: Box::new(expr) }, coord);
                }
                _ => return Ok(expr),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::NodeKind;
    use crate::parser::tests::parser_for;
    use ucc_common::Coord;

    #[test]
    fn test_postfix_increment_uses_operand_coordinate() {
        let node = parser_for("  i++").parse_expression().unwrap();
        assert_eq!(node.to_string(), "UnaryOp(op=p++, expr=ID(name=i))");
        assert_eq!(node.coord, Some(Coord::new(1, 3)));
    }

    #[test]
    fn test_call_arguments() {
        let single = parser_for("f(1)").parse_expression().unwrap();
        assert_eq!(single.to_string(), "FuncCall(name=ID(name=f), args=Constant(type=int, value=1))");

        let none = parser_for("f()").parse_expression().unwrap();
        assert_eq!(none.to_string(), "FuncCall(name=ID(name=f), args=None)");

        let many = parser_for("f(a, b + 1, c)").parse_expression().unwrap();
        let NodeKind::FuncCall { args: Some(args), .. } = &many.kind else {
            panic!("expected call with arguments");
        };
        assert_eq!(args.kind_name(), "ExprList");
        assert_eq!(args.children().len(), 3);
    }

    #[test]
    fn test_multi_dimensional_reference() {
        let node = parser_for("m[i][j]").parse_expression().unwrap();
        assert_eq!(
            node.to_string(),
            "ArrayRef(name=ArrayRef(name=ID(name=m), subscript=ID(name=i)), subscript=ID(name=j))"
        );
    }
}
