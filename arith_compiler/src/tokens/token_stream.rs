//! Token stream with a read cursor over the significant tokens
//!
//! The stream keeps every token the lexer produced (whitespace included) so
//! the source can be reconstructed, while navigation only ever sees the
//! significant ones.

use super::token::{Token, TokenKind};
use crate::utils::Span;

#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    /// All tokens with their source spans
    all_tokens: Vec<Token>,
    /// Indices into all_tokens for significant (non-whitespace) tokens
    significant_indices: Vec<usize>,
    /// Current position in significant_indices
    position: usize,
}

impl TokenStream {
    /// Create a stream; whitespace tokens are kept but skipped by navigation
    pub fn new(tokens: Vec<Token>) -> Self {
        let significant_indices = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.is_significant())
            .map(|(index, _)| index)
            .collect();

        Self {
            all_tokens: tokens,
            significant_indices,
            position: 0,
        }
    }

    // === NAVIGATION ===

    /// The single token of lookahead
    pub fn current(&self) -> Option<&Token> {
        self.significant_indices
            .get(self.position)
            .and_then(|&index| self.all_tokens.get(index))
    }

    pub fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|token| token.kind)
    }

    /// Move past the current token and return it
    pub fn advance(&mut self) -> Option<&Token> {
        let index = *self.significant_indices.get(self.position)?;
        self.position += 1;
        self.all_tokens.get(index)
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.significant_indices.len()
    }

    /// Consume the current token when it has `kind`
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, TokenStreamError> {
        match self.current() {
            Some(token) if token.kind == kind => {
                let token = token.clone();
                self.position += 1;
                Ok(token)
            }
            Some(token) => Err(TokenStreamError::UnexpectedToken {
                expected: kind,
                found: token.kind,
                span: token.span,
            }),
            None => Err(TokenStreamError::UnexpectedEndOfStream { expected: kind }),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    // === SIZE ===

    /// Number of significant tokens
    pub fn len(&self) -> usize {
        self.significant_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.significant_indices.is_empty()
    }

    pub fn remaining_count(&self) -> usize {
        self.significant_indices.len().saturating_sub(self.position)
    }

    // === SPANS ===

    pub fn current_span(&self) -> Option<Span> {
        self.current().map(|token| token.span)
    }

    /// Zero-width span just past the last token, used for end-of-input errors
    pub fn end_span(&self) -> Span {
        match self.all_tokens.last() {
            Some(last) => Span::point(last.span.end),
            None => Span::dummy(),
        }
    }

    // === ITERATION ===

    /// Significant tokens in order
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.significant_indices
            .iter()
            .filter_map(|&index| self.all_tokens.get(index))
    }

    pub fn remaining(&self) -> impl Iterator<Item = &Token> {
        self.iter().skip(self.position)
    }

    /// Every token, whitespace included
    pub fn all_tokens(&self) -> &[Token] {
        &self.all_tokens
    }

    /// Owned copy of the significant tokens
    pub fn significant_tokens(&self) -> Vec<Token> {
        self.iter().cloned().collect()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenStreamError {
    #[error("Expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        span: Span,
    },

    #[error("Expected {expected}, but reached end of input")]
    UnexpectedEndOfStream { expected: TokenKind },
}
