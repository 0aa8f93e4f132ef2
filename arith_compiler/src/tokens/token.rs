//! Token kinds and tokens produced by the lexer

use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of token kinds
///
/// Declaration order is the default lexer registration order, which decides
/// ties between equally long matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Num,
    Plus,
    Minus,
    Times,
    Div,
    #[serde(rename = "LPAREN")]
    LParen,
    #[serde(rename = "RPAREN")]
    RParen,
    WhiteSpace,
}

impl TokenKind {
    pub const ALL: [TokenKind; 8] = [
        TokenKind::Num,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Times,
        TokenKind::Div,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::WhiteSpace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Num => "NUM",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Div => "DIV",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::WhiteSpace => "WHITE_SPACE",
        }
    }

    /// Whitespace is dropped before parsing
    pub fn is_significant(&self) -> bool {
        !matches!(self, TokenKind::WhiteSpace)
    }

    /// `+` or `-`
    pub fn is_additive(&self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus)
    }

    /// `*` or `/`
    pub fn is_multiplicative(&self) -> bool {
        matches!(self, TokenKind::Times | TokenKind::Div)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lexeme of source text and where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn is_significant(&self) -> bool {
        self.kind.is_significant()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) at {}", self.kind, self.lexeme, self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn test_kind_classification() {
        assert!(TokenKind::Plus.is_additive());
        assert!(TokenKind::Div.is_multiplicative());
        assert!(!TokenKind::Num.is_additive());
        assert!(!TokenKind::WhiteSpace.is_significant());
        assert_eq!(TokenKind::ALL.iter().filter(|k| k.is_significant()).count(), 7);
    }

    #[test]
    fn test_kind_serializes_as_display_name() {
        for kind in TokenKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_token_display() {
        let span = Span::new(Position::start(), Position::new(3, 1, 4));
        let token = Token::new(TokenKind::Num, "3.5", span);
        assert_eq!(token.to_string(), "NUM(\"3.5\") at 1:1-4");
    }
}
