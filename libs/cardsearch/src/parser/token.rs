//! Tokens produced by the query lexer.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare run of characters: a key, a value or free text.
    Word,
    /// `"..."` or `'...'`, escapes removed.
    Quoted,
    /// `/.../`, delimiters removed.
    Regex,
    /// One of `:` `=` `!=` `<` `<=` `>` `>=`.
    Op,
    LParen,
    RParen,
    LBracket,
    RBracket,
    /// Negating `-` directly in front of a term.
    Minus,
    /// Exact-match `!` directly in front of a value.
    Bang,
    And,
    Or,
    Not,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Character offset of the token's first character.
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Self::new(TokenKind::Eof, "", position)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// True when this token can begin a term.
    pub fn starts_term(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Word
                | TokenKind::Quoted
                | TokenKind::Regex
                | TokenKind::Bang
                | TokenKind::LParen
                | TokenKind::Minus
                | TokenKind::Not
        )
    }

    /// How the token reads in an error message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of query".to_string(),
            TokenKind::Quoted => format!("\"{}\"", self.text),
            TokenKind::Regex => format!("/{}/", self.text),
            _ => format!("'{}'", self.text),
        }
    }
}
