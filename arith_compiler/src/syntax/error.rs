//! Syntax errors with code mapping and span-accurate reporting

use crate::grammar::NonTerminal;
use crate::logging::{codes, Code};
use crate::tokens::{Token, TokenKind};
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Parse failures; the first one aborts the parse
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Parsing error in {expected} on token {found} '{lexeme}' at {span}")]
    UnexpectedToken {
        expected: NonTerminal,
        found: TokenKind,
        lexeme: String,
        span: Span,
    },

    #[error("Unexpected end of input in {expected}")]
    UnexpectedEndOfInput { expected: NonTerminal, span: Span },

    #[error("Expected ')' to close '(' opened at {}", open.start)]
    UnmatchedParenthesis {
        open: Span,
        /// Token found where `)` was expected; `None` at end of input
        found: Option<TokenKind>,
        span: Span,
    },

    #[error("Extra tokens remaining: {remaining} starting with {found} '{lexeme}' at {span}")]
    TrailingTokens {
        found: TokenKind,
        lexeme: String,
        remaining: usize,
        span: Span,
    },

    #[error("Invalid number literal '{lexeme}' at {span}")]
    InvalidNumberLiteral { lexeme: String, span: Span },

    #[error("Maximum recursion depth {depth} exceeded at {span}: operator chain or nesting too deep")]
    MaxRecursionDepth { depth: usize, span: Span },
}

impl SyntaxError {
    pub fn unexpected_token(expected: NonTerminal, token: &Token) -> Self {
        Self::UnexpectedToken {
            expected,
            found: token.kind,
            lexeme: token.lexeme.clone(),
            span: token.span,
        }
    }

    pub fn unexpected_end_of_input(expected: NonTerminal, span: Span) -> Self {
        Self::UnexpectedEndOfInput { expected, span }
    }

    pub fn trailing_tokens(token: &Token, remaining: usize) -> Self {
        Self::TrailingTokens {
            found: token.kind,
            lexeme: token.lexeme.clone(),
            remaining,
            span: token.span,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfInput { .. } => codes::syntax::UNEXPECTED_END_OF_INPUT,
            Self::UnmatchedParenthesis { .. } => codes::syntax::UNMATCHED_PARENTHESIS,
            Self::TrailingTokens { .. } => codes::syntax::TRAILING_TOKENS,
            Self::InvalidNumberLiteral { .. } => codes::syntax::INVALID_NUMBER_LITERAL,
            Self::MaxRecursionDepth { .. } => codes::syntax::MAX_RECURSION_DEPTH,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::UnexpectedEndOfInput { span, .. }
            | Self::UnmatchedParenthesis { span, .. }
            | Self::TrailingTokens { span, .. }
            | Self::InvalidNumberLiteral { span, .. }
            | Self::MaxRecursionDepth { span, .. } => Some(*span),
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn severity(&self) -> codes::Severity {
        codes::get_severity(self.error_code().as_str())
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }

    /// Message followed by the registry's recommended action
    pub fn enhanced_message(&self) -> String {
        format!("{} ({})", self, self.recommended_action())
    }
}
