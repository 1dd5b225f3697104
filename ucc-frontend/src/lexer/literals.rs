//! Literal scanning for the uC lexer
//!
//! Numbers are converted to their values. Character and string literals
//! keep their raw lexeme, quotes included, so later phases can print them
//! exactly as written.

use crate::lexer::{Lexer, TokenType};
use ucc_common::CompilerError;

impl Lexer<'_> {
    /// Tokenize an integer or floating-point literal
    pub(crate) fn tokenize_number(&mut self) -> Result<TokenType, CompilerError> {
        let start = self.current_location();
        let mut number = String::new();
        let mut is_float = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.' && !is_float {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if is_float {
            // "7." and ".5" are both valid float spellings
            let text = match (number.starts_with('.'), number.ends_with('.')) {
                (true, _) => format!("0{}", number),
                (_, true) => format!("{}0", number),
                _ => number.clone(),
            };
            let value = text.parse::<f64>().map_err(|_| {
                CompilerError::lexer_error(format!("Invalid float literal: {}", number), start)
            })?;
            return Ok(TokenType::FloatLiteral(value));
        }

        let value = number.parse::<i64>().map_err(|_| {
            CompilerError::lexer_error(format!("Integer literal out of range: {}", number), start)
        })?;

        Ok(TokenType::IntLiteral(value))
    }

    /// Tokenize a character literal: one character or a backslash escape
    pub(crate) fn tokenize_char_literal(&mut self) -> Result<TokenType, CompilerError> {
        let start = self.current_location();
        let mut lexeme = String::from('\'');
        self.advance(); // opening quote

        match self.current_char() {
            Some('\\') => {
                lexeme.push('\\');
                self.advance();
                match self.current_char() {
                    Some(c) if c.is_ascii_lowercase() || c == '\\' || c == '\'' || c == '0' => {
                        lexeme.push(c);
                        self.advance();
                    }
                    Some(c) if c != '\n' => {
                        return Err(CompilerError::lexer_error(
                            format!("Invalid escape sequence: \\{}", c),
                            start,
                        ));
                    }
                    _ => {
                        return Err(CompilerError::lexer_error(
                            "Unterminated character literal".to_string(),
                            start,
                        ));
                    }
                }
            }
            Some('\'') => {
                return Err(CompilerError::lexer_error(
                    "Empty character literal".to_string(),
                    start,
                ));
            }
            Some(ch) if ch != '\n' => {
                lexeme.push(ch);
                self.advance();
            }
            _ => {
                return Err(CompilerError::lexer_error(
                    "Unterminated character literal".to_string(),
                    start,
                ));
            }
        }

        if self.current_char() != Some('\'') {
            return Err(CompilerError::lexer_error(
                "Unterminated character literal".to_string(),
                start,
            ));
        }

        self.advance(); // closing quote
        lexeme.push('\'');
        Ok(TokenType::CharLiteral(lexeme))
    }

    /// Tokenize a string literal, which may not span lines
    pub(crate) fn tokenize_string_literal(&mut self) -> Result<TokenType, CompilerError> {
        let start = self.current_location();
        let mut lexeme = String::from('"');
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    lexeme.push('"');
                    return Ok(TokenType::StringLiteral(lexeme));
                }
                '\n' => break,
                '\\' => {
                    lexeme.push('\\');
                    self.advance();
                    match self.current_char() {
                        Some(c) if c != '\n' => {
                            lexeme.push(c);
                            self.advance();
                        }
                        _ => break,
                    }
                }
                _ => {
                    lexeme.push(ch);
                    self.advance();
                }
            }
        }

        Err(CompilerError::lexer_error(
            "Unterminated string literal".to_string(),
            start,
        ))
    }
}
