//! Lexical analysis for arithmetic source text
//!
//! The module-level functions build the standard NUM/operator/parenthesis/
//! whitespace table on each call. Callers tokenizing many inputs should build
//! one [`Lexer`] and share it.

pub mod analyzer;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::tokens::{TokenKind, TokenStream};
use serde::Serialize;
use std::collections::BTreeMap;

pub use analyzer::{Lexer, LexerError, LexicalMetrics};

/// Tokenize `source` with the standard table and default preferences
pub fn tokenize(source: &str) -> Result<TokenStream, LexerError> {
    Lexer::standard()?.tokenize(source)
}

pub fn tokenize_with_preferences(
    source: &str,
    preferences: LexicalPreferences,
) -> Result<TokenStream, LexerError> {
    Lexer::standard_with_preferences(preferences)?.tokenize(source)
}

/// Check that every lexical code is registered (for system startup)
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    use crate::logging::codes::{ensure_registered, lexical};

    ensure_registered(
        "Lexical",
        &[
            lexical::NO_MATCHING_TOKEN,
            lexical::EMPTY_MATCH,
            lexical::DUPLICATE_TOKEN_KIND,
            lexical::LEXEME_TOO_LONG,
            lexical::TOO_MANY_TOKENS,
        ],
    )?;

    log_debug!("Lexical limits initialized",
        "max_token_count" => MAX_TOKEN_COUNT,
        "max_lexeme_length" => MAX_LEXEME_LENGTH
    );

    Ok(())
}

/// Compile-time lexical limits (for reporting)
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LexicalLimits {
    pub max_token_count: usize,
    pub max_lexeme_length: usize,
}

pub fn get_lexical_limits() -> LexicalLimits {
    LexicalLimits {
        max_token_count: MAX_TOKEN_COUNT,
        max_lexeme_length: MAX_LEXEME_LENGTH,
    }
}

/// Token counts by category
#[derive(Debug, Default, Clone, Serialize)]
pub struct TokenCounts {
    pub total: usize,
    pub numbers: usize,
    pub operators: usize,
    pub parentheses: usize,
    pub whitespace: usize,
    pub by_kind: BTreeMap<TokenKind, usize>,
}

impl TokenCounts {
    pub fn significant(&self) -> usize {
        self.total - self.whitespace
    }

    /// Opening and closing parentheses are equal in number
    pub fn parentheses_balanced(&self) -> bool {
        self.by_kind.get(&TokenKind::LParen) == self.by_kind.get(&TokenKind::RParen)
    }
}

pub fn get_token_counts(token_stream: &TokenStream) -> TokenCounts {
    let mut counts = TokenCounts::default();

    for token in token_stream.all_tokens() {
        counts.total += 1;
        *counts.by_kind.entry(token.kind).or_insert(0) += 1;

        match token.kind {
            TokenKind::Num => counts.numbers += 1,
            TokenKind::LParen | TokenKind::RParen => counts.parentheses += 1,
            TokenKind::WhiteSpace => counts.whitespace += 1,
            kind if kind.is_additive() || kind.is_multiplicative() => counts.operators += 1,
            _ => {}
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_lexical_codes_registered() {
        assert!(init_lexical_analysis_logging().is_ok());
    }

    #[test]
    fn test_module_tokenize() {
        let stream = tokenize("2 * (3 + 4)").unwrap();
        assert_eq!(stream.len(), 7);
        assert_matches!(tokenize("2 ^ 3"), Err(LexerError::EmptyMatch { character: '^', .. }));
    }

    #[test]
    fn test_token_counts() {
        let stream = tokenize("(1 + 2) * 3.5 / ((4))").unwrap();
        let counts = get_token_counts(&stream);

        assert_eq!(counts.numbers, 4);
        assert_eq!(counts.operators, 3);
        assert_eq!(counts.parentheses, 6);
        assert_eq!(counts.whitespace, 6);
        assert_eq!(counts.significant(), 13);
        assert!(counts.parentheses_balanced());
    }

    #[test]
    fn test_limits_report() {
        let limits = get_lexical_limits();
        assert_eq!(limits.max_token_count, MAX_TOKEN_COUNT);
        assert!(limits.max_lexeme_length > 0);
    }
}
