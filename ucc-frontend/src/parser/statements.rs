//! Statement parsing

use crate::ast::{Node, NodeKind};
use crate::lexer::TokenType;
use crate::parser::{ParseError, Parser};

impl Parser {
    /// Parse a statement
    pub fn parse_statement(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.eof_error("statement".to_string()));
        };
        let coord = Some(token.coord);

        match token.token_type.clone() {
            TokenType::LeftBrace => self.parse_compound_statement(),

            TokenType::Semicolon => {
                self.advance();
                Ok(Node::new(NodeKind::EmptyStatement, coord))
            }

            TokenType::If => {
                self.advance();
                self.expect(TokenType::LeftParen, "if statement")?;
                let cond = self.parse_expression()?;
                self.expect(TokenType::RightParen, "if statement")?;
                let iftrue = self.parse_statement()?;
                let iffalse = if self.match_token(&TokenType::Else).is_some() {
                    Some(Box::new(self.parse_statement()?))
                } else {
                    None
                };
                Ok(Node::new(
                    NodeKind::If { cond: Box::new(cond), iftrue: Box::new(iftrue), iffalse },
                    coord,
                ))
            }

            TokenType::While => {
                self.advance();
                self.expect(TokenType::LeftParen, "while statement")?;
                let cond = self.parse_expression()?;
                self.expect(TokenType::RightParen, "while statement")?;
                let stmt = self.parse_statement()?;
                Ok(Node::new(NodeKind::While { cond: Box::new(cond), stmt: Box::new(stmt) }, coord))
            }

            TokenType::For => self.parse_for_statement(),

            TokenType::Break => {
                self.advance();
                self.expect(TokenType::Semicolon, "break statement")?;
                Ok(Node::new(NodeKind::Break, coord))
            }

            TokenType::Return => {
                self.advance();
                let expr = self.parse_optional_expression(&TokenType::Semicolon)?;
                self.expect(TokenType::Semicolon, "return statement")?;
                Ok(Node::new(NodeKind::Return { expr }, coord))
            }

            TokenType::Assert => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenType::Semicolon, "assert statement")?;
                Ok(Node::new(NodeKind::Assert { expr: Box::new(expr) }, coord))
            }

            TokenType::Print => {
                self.advance();
                self.expect(TokenType::LeftParen, "print statement")?;
                let expr = self.parse_optional_expression(&TokenType::RightParen)?;
                self.expect(TokenType::RightParen, "print statement")?;
                self.expect(TokenType::Semicolon, "print statement")?;
                Ok(Node::new(NodeKind::Print { expr }, coord))
            }

            TokenType::Read => {
                self.advance();
                self.expect(TokenType::LeftParen, "read statement")?;
                let expr = self.parse_argument_list()?;
                self.expect(TokenType::RightParen, "read statement")?;
                self.expect(TokenType::Semicolon, "read statement")?;
                Ok(Node::new(NodeKind::Read { expr: Box::new(expr) }, coord))
            }

            _ => {
                let expr = self.parse_expression()?;
                self.expect(TokenType::Semicolon, "expression statement")?;
                Ok(expr)
            }
        }
    }

    /// Parse an expression unless the next token is `terminator`
    fn parse_optional_expression(&mut self, terminator: &TokenType) -> Result<Option<Box<Node>>, ParseError> {
        if self.check(terminator) {
            Ok(None)
        } else {
            Ok(Some(Box::new(self.parse_expression()?)))
        }
    }

    /// Parse `'{' (declaration | statement)* '}'`
    pub(crate) fn parse_compound_statement(&mut self) -> Result<Node, ParseError> {
        let open = self.expect(TokenType::LeftBrace, "compound statement")?;
        let mut block_items = Vec::new();

        while !self.check(&TokenType::RightBrace) {
            if self.peek().is_none() {
                return Err(self.eof_error("'}' to close block".to_string()));
            }
            if self.at_specifier() {
                block_items.extend(self.parse_declaration()?);
            } else {
                block_items.push(self.parse_statement()?);
            }
        }
        self.advance(); // '}'

        Ok(Node::new(NodeKind::Compound { block_items }, Some(open.coord)))
    }

    /// Parse `for '(' (declaration | expr? ';') expr? ';' expr? ')' statement`
    fn parse_for_statement(&mut self) -> Result<Node, ParseError> {
        let keyword = self.expect(TokenType::For, "for statement")?;
        self.expect(TokenType::LeftParen, "for statement")?;

        let init = if self.at_specifier() {
            let coord = self.current_location();
            let decls = self.parse_declaration()?;
            Some(Box::new(Node::new(NodeKind::DeclList { decls }, coord)))
        } else {
            let init = self.parse_optional_expression(&TokenType::Semicolon)?;
            self.expect(TokenType::Semicolon, "for statement")?;
            init
        };

        let cond = self.parse_optional_expression(&TokenType::Semicolon)?;
        self.expect(TokenType::Semicolon, "for statement")?;
        let next = self.parse_optional_expression(&TokenType::RightParen)?;
        self.expect(TokenType::RightParen, "for statement")?;
        let stmt = self.parse_statement()?;

        Ok(Node::new(
            NodeKind::For { init, cond, next, stmt: Box::new(stmt) },
            Some(keyword.coord),
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Node, NodeKind, ShowOptions};
    use crate::parser::tests::parser_for;
    use crate::parser::ParseError;
    use pretty_assertions::assert_eq;
    use ucc_common::Coord;

    fn statement(input: &str) -> Node {
        parser_for(input).parse_statement().unwrap()
    }

    #[test]
    fn test_if_else() {
        let node = statement("if (x < 1) y = 2; else ;");
        let NodeKind::If { cond, iftrue, iffalse } = &node.kind else {
            panic!("expected If");
        };
        assert_eq!(cond.kind_name(), "BinaryOp");
        assert_eq!(iftrue.kind_name(), "Assignment");
        assert_eq!(iffalse.as_ref().map(|n| n.kind_name()), Some("EmptyStatement"));
    }

    #[test]
    fn test_dangling_else_binds_inner() {
        let node = statement("if (a) if (b) x = 1; else x = 2;");
        let NodeKind::If { iftrue, iffalse, .. } = &node.kind else {
            panic!("expected If");
        };
        assert!(iffalse.is_none());
        assert!(matches!(&iftrue.kind, NodeKind::If { iffalse: Some(_), .. }));
    }

    #[test]
    fn test_for_with_declaration() {
        let node = statement("for (int i = 0, j; i < 10; i++) print(i);");
        let text = node.to_tree_string(&ShowOptions { nodenames: true, ..ShowOptions::default() });
        let expected = "\
For:
    DeclList <init>:
        Decl <decls[0]>: i
            VarDecl <type>: i
                Type <type>: int
            Constant <init>: int, 0
        Decl <decls[1]>: j
            VarDecl <type>: j
                Type <type>: int
    BinaryOp <cond>: <
        ID <lvalue>: i
        Constant <rvalue>: int, 10
    UnaryOp <next>: p++
        ID <expr>: i
    Print <stmt>:
        ID <expr>: i
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_for_header() {
        let node = statement("for (;;) break;");
        assert_eq!(node.to_string(), "For(init=None, cond=None, next=None, stmt=Break())");
    }

    #[test]
    fn test_compound_with_declarations() {
        let node = statement("{ int a, b; a = b; }");
        let NodeKind::Compound { block_items } = &node.kind else {
            panic!("expected Compound");
        };
        let kinds: Vec<&str> = block_items.iter().map(|n| n.kind_name()).collect();
        assert_eq!(kinds, vec!["Decl", "Decl", "Assignment"]);
        assert_eq!(node.coord, Some(Coord::new(1, 1)));
    }

    #[test]
    fn test_read_with_several_targets() {
        let node = statement("read(a, b[1]);");
        assert_eq!(
            node.to_string(),
            "Read(expr=ExprList(exprs=[ID(name=a), ArrayRef(name=ID(name=b), subscript=Constant(type=int, value=1))]))"
        );
    }

    #[test]
    fn test_print_and_return_without_expression() {
        assert_eq!(statement("print();").to_string(), "Print(expr=None)");
        assert_eq!(statement("return;").to_string(), "Return(expr=None)");
        assert_eq!(statement("assert x == 1;").kind_name(), "Assert");
    }

    #[test]
    fn test_unclosed_block() {
        let err = parser_for("{ x = 1;").parse_statement().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEndOfFile { .. }));
    }
}
