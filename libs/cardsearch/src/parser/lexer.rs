//! Query lexer.
//!
//! Splits a query string into [`Token`]s. Positions are character offsets,
//! so error positions line up with what the user typed even for non-ASCII
//! input.

use super::token::{Token, TokenKind};
use crate::error::ParseError;

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

fn is_op_char(c: char) -> bool {
    matches!(c, ':' | '=' | '<' | '>')
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']')
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// Tokenize the whole input. The last token is always `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let Some(c) = self.current() else {
                tokens.push(Token::eof(self.pos));
                return Ok(tokens);
            };
            let start = self.pos;
            let token = match c {
                '(' => self.single(TokenKind::LParen, c),
                ')' => self.single(TokenKind::RParen, c),
                '[' => self.single(TokenKind::LBracket, c),
                ']' => self.single(TokenKind::RBracket, c),
                '"' | '\'' => self.read_quoted(c)?,
                '/' => self.read_regex()?,
                '-' if self.peek().is_some_and(|n| !n.is_whitespace()) => {
                    self.single(TokenKind::Minus, c)
                }
                '!' if self.peek() == Some('=') => {
                    self.pos += 2;
                    Token::new(TokenKind::Op, "!=", start)
                }
                '!' if self.peek().is_some_and(|n| !n.is_whitespace()) => {
                    self.single(TokenKind::Bang, c)
                }
                c if is_op_char(c) => self.read_op(),
                _ => self.read_word(),
            };
            tokens.push(token);
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn single(&mut self, kind: TokenKind, c: char) -> Token {
        let token = Token::new(kind, c.to_string(), self.pos);
        self.pos += 1;
        token
    }

    fn read_op(&mut self) -> Token {
        let start = self.pos;
        let first = self.chars[start];
        self.pos += 1;
        let text = match (first, self.current()) {
            ('<', Some('=')) | ('>', Some('=')) => {
                self.pos += 1;
                format!("{}=", first)
            }
            _ => first.to_string(),
        };
        Token::new(TokenKind::Op, text, start)
    }

    fn read_quoted(&mut self, quote: char) -> Result<Token, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut text = String::new();
        while let Some(c) = self.current() {
            self.pos += 1;
            match c {
                '\\' => match self.current() {
                    Some(escaped) => {
                        text.push(escaped);
                        self.pos += 1;
                    }
                    None => break,
                },
                c if c == quote => return Ok(Token::new(TokenKind::Quoted, text, start)),
                c => text.push(c),
            }
        }
        Err(ParseError::new(start, "Unterminated quote"))
    }

    fn read_regex(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut text = String::new();
        while let Some(c) = self.current() {
            self.pos += 1;
            match c {
                '\\' => match self.current() {
                    Some('/') => {
                        text.push('/');
                        self.pos += 1;
                    }
                    Some(escaped) => {
                        text.push('\\');
                        text.push(escaped);
                        self.pos += 1;
                    }
                    None => break,
                },
                '/' => return Ok(Token::new(TokenKind::Regex, text, start)),
                c => text.push(c),
            }
        }
        Err(ParseError::new(start, "Unterminated regular expression"))
    }

    fn read_word(&mut self) -> Token {
        let start = self.pos;
        while let Some(c) = self.current() {
            if c.is_whitespace() || is_delimiter(c) || is_op_char(c) {
                break;
            }
            if c == '!' && self.peek() == Some('=') {
                break;
            }
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();

        // A keyword directly followed by an operator is a search key (`not:reprint`).
        let before_op = self
            .current()
            .is_some_and(|c| is_op_char(c) || (c == '!' && self.peek() == Some('=')));
        let kind = match text.to_lowercase().as_str() {
            "and" if !before_op => TokenKind::And,
            "or" if !before_op => TokenKind::Or,
            "not" if !before_op => TokenKind::Not,
            _ => TokenKind::Word,
        };
        Token::new(kind, text, start)
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(input).tokenize()
}
