//! Token definitions for the uC lexer
//!
//! This module defines token types and the Token struct.

use serde::{Deserialize, Serialize};
use std::fmt;
use ucc_common::Coord;

/// uC token types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenType {
    // Literals (char and string literals keep their quotes)
    IntLiteral(i64),
    FloatLiteral(f64),
    CharLiteral(String),
    StringLiteral(String),

    // Identifiers
    Identifier(String),

    // Keywords
    Assert, Break, Char, Else, Float, For, If,
    Int, Print, Read, Return, Void, While,

    // Operators
    Plus,           // +
    Minus,          // -
    Star,           // *
    Slash,          // /
    Percent,        // %
    Ampersand,      // &
    Bang,           // !
    Equal,          // =
    Less,           // <
    Greater,        // >

    // Compound operators
    PlusPlus,       // ++
    MinusMinus,     // --
    LessEqual,      // <=
    GreaterEqual,   // >=
    EqualEqual,     // ==
    BangEqual,      // !=
    AmpersandAmpersand, // &&
    PipePipe,       // ||

    // Assignment operators
    PlusEqual,      // +=
    MinusEqual,     // -=
    StarEqual,      // *=
    SlashEqual,     // /=
    PercentEqual,   // %=

    // Delimiters
    LeftParen,      // (
    RightParen,     // )
    LeftBrace,      // {
    RightBrace,     // }
    LeftBracket,    // [
    RightBracket,   // ]
    Semicolon,      // ;
    Comma,          // ,
}

impl TokenType {
    /// Check if this token names a primitive type
    pub fn is_type_keyword(&self) -> bool {
        matches!(self, TokenType::Void | TokenType::Char | TokenType::Int | TokenType::Float)
    }

    /// Operator symbol for assignment tokens
    pub fn assignment_op(&self) -> Option<&'static str> {
        match self {
            TokenType::Equal => Some("="),
            TokenType::PlusEqual => Some("+="),
            TokenType::MinusEqual => Some("-="),
            TokenType::StarEqual => Some("*="),
            TokenType::SlashEqual => Some("/="),
            TokenType::PercentEqual => Some("%="),
            _ => None,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::IntLiteral(n) => write!(f, "{n}"),
            TokenType::FloatLiteral(n) => write!(f, "{n:?}"),
            TokenType::CharLiteral(s) => write!(f, "{s}"),
            TokenType::StringLiteral(s) => write!(f, "{s}"),
            TokenType::Identifier(s) => write!(f, "{s}"),

            TokenType::Assert => write!(f, "assert"),
            TokenType::Break => write!(f, "break"),
            TokenType::Char => write!(f, "char"),
            TokenType::Else => write!(f, "else"),
            TokenType::Float => write!(f, "float"),
            TokenType::For => write!(f, "for"),
            TokenType::If => write!(f, "if"),
            TokenType::Int => write!(f, "int"),
            TokenType::Print => write!(f, "print"),
            TokenType::Read => write!(f, "read"),
            TokenType::Return => write!(f, "return"),
            TokenType::Void => write!(f, "void"),
            TokenType::While => write!(f, "while"),

            TokenType::Plus => write!(f, "+"),
            TokenType::Minus => write!(f, "-"),
            TokenType::Star => write!(f, "*"),
            TokenType::Slash => write!(f, "/"),
            TokenType::Percent => write!(f, "%"),
            TokenType::Ampersand => write!(f, "&"),
            TokenType::Bang => write!(f, "!"),
            TokenType::Equal => write!(f, "="),
            TokenType::Less => write!(f, "<"),
            TokenType::Greater => write!(f, ">"),

            TokenType::PlusPlus => write!(f, "++"),
            TokenType::MinusMinus => write!(f, "--"),
            TokenType::LessEqual => write!(f, "<="),
            TokenType::GreaterEqual => write!(f, ">="),
            TokenType::EqualEqual => write!(f, "=="),
            TokenType::BangEqual => write!(f, "!="),
            TokenType::AmpersandAmpersand => write!(f, "&&"),
            TokenType::PipePipe => write!(f, "||"),

            TokenType::PlusEqual => write!(f, "+="),
            TokenType::MinusEqual => write!(f, "-="),
            TokenType::StarEqual => write!(f, "*="),
            TokenType::SlashEqual => write!(f, "/="),
            TokenType::PercentEqual => write!(f, "%="),

            TokenType::LeftParen => write!(f, "("),
            TokenType::RightParen => write!(f, ")"),
            TokenType::LeftBrace => write!(f, "{{"),
            TokenType::RightBrace => write!(f, "}}"),
            TokenType::LeftBracket => write!(f, "["),
            TokenType::RightBracket => write!(f, "]"),
            TokenType::Semicolon => write!(f, ";"),
            TokenType::Comma => write!(f, ","),
        }
    }
}

/// A token with location information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub coord: Coord,
}

impl Token {
    pub fn new(token_type: TokenType, coord: Coord) -> Self {
        Self { token_type, coord }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.token_type, self.coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenType::Identifier("main".to_string()), Coord::new(1, 5));
        assert_eq!(format!("{}", token), "main at 1:5");
        assert_eq!(format!("{}", TokenType::FloatLiteral(5.0)), "5.0");
        assert_eq!(format!("{}", TokenType::LeftBrace), "{");
    }

    #[test]
    fn test_assignment_ops() {
        assert_eq!(TokenType::Equal.assignment_op(), Some("="));
        assert_eq!(TokenType::PercentEqual.assignment_op(), Some("%="));
        assert_eq!(TokenType::EqualEqual.assignment_op(), None);
    }
}
