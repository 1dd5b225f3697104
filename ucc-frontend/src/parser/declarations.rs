//! Declaration parsing
//!
//! Global items, type specifiers, declarators, parameter lists,
//! initializers and function definitions.

use crate::ast::{Node, NodeKind};
use crate::lexer::TokenType;
use crate::parser::declarator::{Declarator, PieceKind};
use crate::parser::{ParseError, Parser};
use log::{debug, trace};
use ucc_common::Coord;

impl Parser {
    /// Does the current position start a type specifier?
    pub(crate) fn at_specifier(&self) -> bool {
        match self.peek_nth(0) {
            Some(t) if t.is_type_keyword() => true,
            Some(TokenType::Identifier(_)) => self.at_user_type_name(),
            _ => false,
        }
    }

    /// A user type name is an identifier followed by another specifier or
    /// by the declared name
    fn at_user_type_name(&self) -> bool {
        matches!(self.peek_nth(0), Some(TokenType::Identifier(_)))
            && self.peek_nth(1).is_some_and(|next| matches!(next, TokenType::Identifier(_)) || next.is_type_keyword())
    }

    /// Parse a global item: declaration, function definition or statement
    pub fn parse_global_item(&mut self) -> Result<Node, ParseError> {
        if self.at_specifier() {
            let specs = self.parse_specifiers();
            let declarator = self.parse_declarator()?;

            if self.arena.is_function(declarator) && (self.check(&TokenType::LeftBrace) || self.at_specifier()) {
                return self.parse_function_definition(specs, declarator);
            }

            let coord = specs.first().and_then(|s| s.coord);
            let decls = self.parse_init_declarators(&specs, declarator)?;
            return Ok(Node::new(NodeKind::GlobalDecl { decls }, coord));
        }

        if self.looks_like_function_definition() {
            let declarator = self.parse_declarator()?;
            if self.arena.is_function(declarator) {
                return self.parse_function_definition(Vec::new(), declarator);
            }
            return Err(self.unexpected("a function declarator"));
        }

        self.parse_statement()
    }

    /// Scan ahead for a definition that starts without a type specifier:
    /// a `{` (or an old-style parameter declaration) before any `;`
    fn looks_like_function_definition(&self) -> bool {
        if !matches!(
            self.peek_nth(0),
            Some(TokenType::Identifier(_) | TokenType::Star | TokenType::LeftParen)
        ) {
            return false;
        }

        let mut depth = 0usize;
        let mut offset = 0;
        while let Some(token) = self.peek_nth(offset) {
            match token {
                TokenType::LeftParen | TokenType::LeftBracket => depth += 1,
                TokenType::RightParen | TokenType::RightBracket => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 && matches!(token, TokenType::RightParen) {
                        if let Some(next) = self.peek_nth(offset + 1) {
                            if next.is_type_keyword() {
                                return true;
                            }
                        }
                    }
                }
                TokenType::LeftBrace if depth == 0 => return true,
                TokenType::Semicolon | TokenType::Equal | TokenType::RightBrace if depth == 0 => return false,
                _ => {}
            }
            offset += 1;
        }
        false
    }

    /// Parse `type_specifier+`. Primitive keywords become `Type` nodes,
    /// user type names become `ID` nodes. Once a primitive has been read an
    /// identifier always starts the declarator.
    pub(crate) fn parse_specifiers(&mut self) -> Vec<Node> {
        let mut specs = Vec::new();
        let mut primitive_seen = false;
        loop {
            let is_keyword = self.peek_nth(0).is_some_and(TokenType::is_type_keyword);
            if !is_keyword && (primitive_seen || !self.at_user_type_name()) {
                break;
            }
            let Some(token) = self.advance() else { break };
            let kind = match token.token_type {
                TokenType::Identifier(name) => NodeKind::ID { name },
                other => {
                    primitive_seen = true;
                    NodeKind::Type { names: vec![other.to_string()] }
                }
            };
            specs.push(Node::new(kind, Some(token.coord)));
        }
        specs
    }

    /// Collapse the specifier list into the single node attached to a declarator
    fn resolve_specifier(specs: &[Node], is_function: bool, location: Option<Coord>) -> Result<Node, ParseError> {
        match specs {
            [] if is_function => Ok(Node::new(NodeKind::Type { names: vec!["int".to_string()] }, location)),
            [] => Err(ParseError::MissingType { location }),
            [single] => Ok(single.clone()),
            many => {
                let mut names = Vec::new();
                for spec in many {
                    match &spec.kind {
                        NodeKind::Type { names: n } => names.extend(n.iter().cloned()),
                        _ => return Err(ParseError::InvalidMultipleTypes { location: spec.coord }),
                    }
                }
                Ok(Node::new(NodeKind::Type { names }, many[0].coord))
            }
        }
    }

    /// Freeze a declarator with its specifier into a `Decl` node
    pub(crate) fn finish_decl(
        &mut self,
        specs: &[Node],
        declarator: Declarator,
        init: Option<Node>,
    ) -> Result<Node, ParseError> {
        let (name, coord) = self.arena.name(declarator).ok_or_else(|| ParseError::InvalidExpression {
            message: "Malformed declarator".to_string(),
            location: self.last_coord,
        })?;

        let specifier = Self::resolve_specifier(specs, self.arena.is_function(declarator), coord)?;
        let ty = self.arena.finish(declarator, specifier)?;
        trace!("declared {}", name);

        Ok(Node::new(
            NodeKind::Decl { name, ty: Box::new(ty), init: init.map(Box::new) },
            coord,
        ))
    }

    /// Parse `'*'* direct_declarator`
    pub(crate) fn parse_declarator(&mut self) -> Result<Declarator, ParseError> {
        let mut stars = Vec::new();
        while let Some(star) = self.match_token(&TokenType::Star) {
            stars.push(star.coord);
        }

        let declarator = self.parse_direct_declarator()?;

        // Pointers bind after the direct declarator's own modifiers
        match self.arena.pointers(&stars) {
            Some(ptrs) => Ok(self.arena.apply(declarator, ptrs)),
            None => Ok(declarator),
        }
    }

    fn parse_direct_declarator(&mut self) -> Result<Declarator, ParseError> {
        let mut declarator = if self.match_token(&TokenType::LeftParen).is_some() {
            let inner = self.parse_declarator()?;
            self.expect(TokenType::RightParen, "declarator")?;
            inner
        } else {
            let (name, coord) = self.expect_identifier("declarator")?;
            self.arena.leaf(name, Some(coord))
        };

        loop {
            if let Some(open) = self.match_token(&TokenType::LeftBracket) {
                let dim = if self.check(&TokenType::RightBracket) {
                    None
                } else {
                    Some(self.parse_binary_expression()?)
                };
                self.expect(TokenType::RightBracket, "array declarator")?;
                let modifier = self.arena.modifier(PieceKind::Array { dim }, Some(open.coord));
                declarator = self.arena.apply(declarator, modifier);
            } else if let Some(open) = self.match_token(&TokenType::LeftParen) {
                let args = self.parse_parameters()?;
                self.expect(TokenType::RightParen, "parameter list")?;
                let modifier = self.arena.modifier(PieceKind::Func { args }, Some(open.coord));
                declarator = self.arena.apply(declarator, modifier);
            } else {
                return Ok(declarator);
            }
        }
    }

    /// Parse a parameter list or identifier list; `()` and `(void)` give None
    fn parse_parameters(&mut self) -> Result<Option<Node>, ParseError> {
        if self.check(&TokenType::RightParen) {
            return Ok(None);
        }
        if matches!(self.peek_nth(0), Some(TokenType::Void)) && matches!(self.peek_nth(1), Some(TokenType::RightParen)) {
            self.advance();
            return Ok(None);
        }

        let coord = self.current_location();
        let mut params = Vec::new();
        loop {
            if self.at_specifier() {
                let specs = self.parse_specifiers();
                let declarator = self.parse_declarator()?;
                params.push(self.finish_decl(&specs, declarator, None)?);
            } else {
                let (name, coord) = self.expect_identifier("parameter list")?;
                params.push(Node::new(NodeKind::ID { name }, Some(coord)));
            }

            if self.match_token(&TokenType::Comma).is_none() {
                break;
            }
        }

        Ok(Some(Node::new(NodeKind::ParamList { params }, coord)))
    }

    /// Parse the rest of `init_declarator (',' init_declarator)* ';'`,
    /// given the first declarator
    pub(crate) fn parse_init_declarators(
        &mut self,
        specs: &[Node],
        first: Declarator,
    ) -> Result<Vec<Node>, ParseError> {
        let mut decls = Vec::new();
        let mut declarator = first;

        loop {
            let init = if self.match_token(&TokenType::Equal).is_some() {
                Some(self.parse_initializer()?)
            } else {
                None
            };
            decls.push(self.finish_decl(specs, declarator, init)?);

            if self.match_token(&TokenType::Comma).is_none() {
                break;
            }
            declarator = self.parse_declarator()?;
        }

        self.expect(TokenType::Semicolon, "declaration")?;
        Ok(decls)
    }

    /// Parse a full declaration: `type_specifier+ init_declarator_list ';'`
    pub(crate) fn parse_declaration(&mut self) -> Result<Vec<Node>, ParseError> {
        let specs = self.parse_specifiers();
        let declarator = self.parse_declarator()?;
        self.parse_init_declarators(&specs, declarator)
    }

    /// Parse `assignment_expression | '{' initializer (',' initializer)* ','? '}'`
    pub(crate) fn parse_initializer(&mut self) -> Result<Node, ParseError> {
        let Some(open) = self.match_token(&TokenType::LeftBrace) else {
            return self.parse_assignment_expression();
        };

        let mut exprs = Vec::new();
        loop {
            exprs.push(self.parse_initializer()?);
            if self.match_token(&TokenType::Comma).is_none() || self.check(&TokenType::RightBrace) {
                break;
            }
        }
        self.expect(TokenType::RightBrace, "initializer list")?;

        Ok(Node::new(NodeKind::InitList { exprs }, Some(open.coord)))
    }

    /// Parse the remainder of a function definition after its declarator:
    /// old-style parameter declarations and the body
    fn parse_function_definition(&mut self, specs: Vec<Node>, declarator: Declarator) -> Result<Node, ParseError> {
        let decl = self.finish_decl(&specs, declarator, None)?;

        let mut param_decls = Vec::new();
        while self.at_specifier() {
            param_decls.extend(self.parse_declaration()?);
        }

        let body = self.parse_compound_statement()?;
        debug!("parsed function definition '{}'", decl.name().unwrap_or("?"));

        let coord = decl.coord;
        Ok(Node::new(
            NodeKind::FuncDef { decl: Box::new(decl), param_decls, body: Box::new(body) },
            coord,
        ))
    }
}
