//! uC Lexer
//!
//! Tokenizes uC source code into a lazy stream of tokens.
//! Handles keywords, operators, literals, identifiers, and comments.
//! Lexical errors are reported through a caller-supplied callback and
//! scanning resumes one character after the offending position.

pub mod token;
pub mod literals;

pub use token::{Token, TokenType};

use std::collections::HashMap;
use ucc_common::{CompilerError, Coord, SourceTracker};

/// Callback invoked with (message, line, column) for every lexical error
pub type ErrorCallback<'a> = Box<dyn FnMut(&str, u32, u32) + 'a>;

/// uC Lexer
pub struct Lexer<'a> {
    pub(crate) input: Vec<char>,
    pub(crate) position: usize,
    pub(crate) tracker: SourceTracker,
    token_start: (usize, SourceTracker),
    keywords: HashMap<&'static str, TokenType>,
    error_func: ErrorCallback<'a>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer reporting errors through `error_func`
    pub fn new(input: &str, error_func: impl FnMut(&str, u32, u32) + 'a) -> Self {
        let mut lexer = Self {
            input: input.chars().collect(),
            position: 0,
            tracker: SourceTracker::new(),
            token_start: (0, SourceTracker::new()),
            keywords: HashMap::new(),
            error_func: Box::new(error_func),
        };

        lexer.initialize_keywords();
        lexer
    }

    /// Initialize keyword map
    fn initialize_keywords(&mut self) {
        let keywords = [
            ("assert", TokenType::Assert),
            ("break", TokenType::Break),
            ("char", TokenType::Char),
            ("else", TokenType::Else),
            ("float", TokenType::Float),
            ("for", TokenType::For),
            ("if", TokenType::If),
            ("int", TokenType::Int),
            ("print", TokenType::Print),
            ("read", TokenType::Read),
            ("return", TokenType::Return),
            ("void", TokenType::Void),
            ("while", TokenType::While),
        ];

        for (keyword, token_type) in keywords {
            self.keywords.insert(keyword, token_type);
        }
    }

    /// Get current character
    pub(crate) fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    pub(crate) fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Advance to next character
    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.position += 1;
        self.tracker.advance(ch);
        Some(ch)
    }

    /// Get current location
    pub(crate) fn current_location(&self) -> Coord {
        self.tracker.coord()
    }

    /// Skip whitespace and comments
    fn skip_trivia(&mut self) -> Result<(), CompilerError> {
        loop {
            match (self.current_char(), self.peek_char(1)) {
                (Some(ch), _) if ch.is_whitespace() => {
                    self.advance();
                }
                (Some('/'), Some('/')) => {
                    while let Some(ch) = self.current_char() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                (Some('/'), Some('*')) => self.skip_block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// Skip a block comment, counting the newlines it spans
    fn skip_block_comment(&mut self) -> Result<(), CompilerError> {
        let start = self.current_location();
        self.token_start = (self.position, self.tracker.clone());
        self.advance(); // '/'
        self.advance(); // '*'

        while let Some(ch) = self.current_char() {
            if ch == '*' && self.peek_char(1) == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(CompilerError::lexer_error(
            "Unterminated comment".to_string(),
            start,
        ))
    }

    /// Tokenize an identifier or keyword
    fn tokenize_identifier(&mut self) -> TokenType {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match self.keywords.get(identifier.as_str()) {
            Some(keyword_token) => keyword_token.clone(),
            None => TokenType::Identifier(identifier),
        }
    }

    /// Consume `second` if it follows, choosing between two token types
    fn either(&mut self, second: char, double: TokenType, single: TokenType) -> TokenType {
        self.advance();
        if self.current_char() == Some(second) {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Scan the next token, or None at end of input
    fn scan_token(&mut self) -> Result<Option<Token>, CompilerError> {
        self.skip_trivia()?;

        self.token_start = (self.position, self.tracker.clone());
        let start_location = self.current_location();

        let token_type = match self.current_char() {
            None => return Ok(None),

            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.tokenize_identifier(),

            Some(ch) if ch.is_ascii_digit() => self.tokenize_number()?,

            Some('.') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.tokenize_number()?
            }

            Some('\'') => self.tokenize_char_literal()?,

            Some('"') => self.tokenize_string_literal()?,

            Some('+') => {
                self.advance();
                match self.current_char() {
                    Some('+') => { self.advance(); TokenType::PlusPlus }
                    Some('=') => { self.advance(); TokenType::PlusEqual }
                    _ => TokenType::Plus,
                }
            }

            Some('-') => {
                self.advance();
                match self.current_char() {
                    Some('-') => { self.advance(); TokenType::MinusMinus }
                    Some('=') => { self.advance(); TokenType::MinusEqual }
                    _ => TokenType::Minus,
                }
            }

            Some('*') => self.either('=', TokenType::StarEqual, TokenType::Star),
            Some('/') => self.either('=', TokenType::SlashEqual, TokenType::Slash),
            Some('%') => self.either('=', TokenType::PercentEqual, TokenType::Percent),
            Some('&') => self.either('&', TokenType::AmpersandAmpersand, TokenType::Ampersand),
            Some('!') => self.either('=', TokenType::BangEqual, TokenType::Bang),
            Some('=') => self.either('=', TokenType::EqualEqual, TokenType::Equal),
            Some('<') => self.either('=', TokenType::LessEqual, TokenType::Less),
            Some('>') => self.either('=', TokenType::GreaterEqual, TokenType::Greater),

            Some('|') if self.peek_char(1) == Some('|') => {
                self.advance();
                self.advance();
                TokenType::PipePipe
            }

            Some('(') => { self.advance(); TokenType::LeftParen }
            Some(')') => { self.advance(); TokenType::RightParen }
            Some('{') => { self.advance(); TokenType::LeftBrace }
            Some('}') => { self.advance(); TokenType::RightBrace }
            Some('[') => { self.advance(); TokenType::LeftBracket }
            Some(']') => { self.advance(); TokenType::RightBracket }
            Some(';') => { self.advance(); TokenType::Semicolon }
            Some(',') => { self.advance(); TokenType::Comma }

            Some(ch) => {
                return Err(CompilerError::lexer_error(
                    format!("Illegal character '{}'", ch),
                    start_location,
                ));
            }
        };

        Ok(Some(Token::new(token_type, start_location)))
    }

    /// Report a lexical error and skip exactly one character from where it started
    fn recover(&mut self, err: CompilerError) {
        let (message, coord) = match err {
            CompilerError::LexError { message, location } => (message, location),
            other => (other.to_string(), self.current_location()),
        };

        (self.error_func)(&message, coord.line, coord.column.unwrap_or(0));

        (self.position, self.tracker) = self.token_start.clone();
        self.advance();
    }

    /// Tokenize the entire input, reporting errors through the callback
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            self.token_start = (self.position, self.tracker.clone());
            match self.scan_token() {
                Ok(token) => return token,
                Err(err) => self.recover(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<TokenType> {
        Lexer::new(input, |msg, line, col| panic!("unexpected lexical error {msg} at {line}:{col}"))
            .map(|t| t.token_type)
            .collect()
    }

    fn lex_with_errors(input: &str) -> (Vec<TokenType>, Vec<(String, u32, u32)>) {
        let mut errors = Vec::new();
        let tokens = Lexer::new(input, |msg, line, col| errors.push((msg.to_string(), line, col)))
            .map(|t| t.token_type)
            .collect();
        (tokens, errors)
    }

    #[test]
    fn test_keywords() {
        let tokens = lex("int main void return if else assert print read");

        assert_eq!(tokens.len(), 9);
        assert_eq!(tokens[0], TokenType::Int);
        assert!(matches!(tokens[1], TokenType::Identifier(_)));
        assert_eq!(tokens[2], TokenType::Void);
        assert_eq!(tokens[3], TokenType::Return);
        assert_eq!(tokens[6], TokenType::Assert);
        assert_eq!(tokens[8], TokenType::Read);
    }

    #[test]
    fn test_operators() {
        let tokens = lex("+ - * / % == != <= >= && || ++ -- += -= *= /= %= & ! =");

        let expected = vec![
            TokenType::Plus, TokenType::Minus, TokenType::Star, TokenType::Slash,
            TokenType::Percent, TokenType::EqualEqual, TokenType::BangEqual,
            TokenType::LessEqual, TokenType::GreaterEqual, TokenType::AmpersandAmpersand,
            TokenType::PipePipe, TokenType::PlusPlus, TokenType::MinusMinus,
            TokenType::PlusEqual, TokenType::MinusEqual, TokenType::StarEqual,
            TokenType::SlashEqual, TokenType::PercentEqual, TokenType::Ampersand,
            TokenType::Bang, TokenType::Equal,
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_literals() {
        let tokens = lex("42 3.14 .5 7. 'a' '\\n' \"hello\"");

        assert_eq!(tokens, vec![
            TokenType::IntLiteral(42),
            TokenType::FloatLiteral(3.14),
            TokenType::FloatLiteral(0.5),
            TokenType::FloatLiteral(7.0),
            TokenType::CharLiteral("'a'".to_string()),
            TokenType::CharLiteral("'\\n'".to_string()),
            TokenType::StringLiteral("\"hello\"".to_string()),
        ]);
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = lex("// line comment\nx /* block\ncomment */ y");
        assert_eq!(tokens, vec![
            TokenType::Identifier("x".to_string()),
            TokenType::Identifier("y".to_string()),
        ]);
    }

    #[test]
    fn test_coordinates() {
        let tokens: Vec<Token> = Lexer::new("int x;\n  x = 5;", |_, _, _| {}).collect();

        assert_eq!(tokens[0].coord, Coord::new(1, 1));
        assert_eq!(tokens[1].coord, Coord::new(1, 5));
        assert_eq!(tokens[3].coord, Coord::new(2, 3));
        assert_eq!(tokens[5].coord, Coord::new(2, 7));
    }

    #[test]
    fn test_illegal_character_is_reported_and_skipped() {
        let (tokens, errors) = lex_with_errors("a @ b");

        assert_eq!(tokens, vec![
            TokenType::Identifier("a".to_string()),
            TokenType::Identifier("b".to_string()),
        ]);
        assert_eq!(errors, vec![("Illegal character '@'".to_string(), 1, 3)]);
    }

    #[test]
    fn test_unterminated_string_skips_one_character() {
        let (tokens, errors) = lex_with_errors("\"abc\nx");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, "Unterminated string literal");
        assert_eq!(tokens, vec![
            TokenType::Identifier("abc".to_string()),
            TokenType::Identifier("x".to_string()),
        ]);
    }

    #[test]
    fn test_lexer_is_lazy() {
        let mut lexer = Lexer::new("a b", |_, _, _| {});
        assert_eq!(lexer.next().map(|t| t.token_type), Some(TokenType::Identifier("a".to_string())));
        assert_eq!(lexer.next().map(|t| t.token_type), Some(TokenType::Identifier("b".to_string())));
        assert_eq!(lexer.next(), None);
        assert_eq!(lexer.next(), None);
    }
}
