//! Longest-match lexer driven by an ordered table of automata
//!
//! At every offset each registered automaton is run from its start state; the
//! longest accepted prefix wins and ties go to the kind registered first.

use crate::automaton::{patterns, Automaton, AutomatonError};
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind, TokenStream};
use crate::utils::{Position, Span};
use serde::Serialize;
use std::collections::BTreeMap;

/// Lexical analysis errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error("No token matches '{character}' at {position}")]
    NoMatchingToken { character: char, position: Position },

    #[error("Unexpected character '{character}' at {position}: only an empty {kind} match is possible")]
    EmptyMatch {
        kind: TokenKind,
        character: char,
        position: Position,
    },

    #[error("{kind} lexeme too long: {length} bytes (max {}) at {}", MAX_LEXEME_LENGTH, span.start)]
    LexemeTooLong {
        kind: TokenKind,
        length: usize,
        span: Span,
    },

    #[error("Too many tokens: {count} (max {})", MAX_TOKEN_COUNT)]
    TooManyTokens { count: usize, position: Position },

    #[error("Token kind {kind} is already registered")]
    DuplicateTokenKind { kind: TokenKind },

    #[error("Automaton for {kind} is invalid: {source}")]
    Automaton {
        kind: TokenKind,
        #[source]
        source: AutomatonError,
    },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::NoMatchingToken { .. } => codes::lexical::NO_MATCHING_TOKEN,
            LexerError::EmptyMatch { .. } => codes::lexical::EMPTY_MATCH,
            LexerError::LexemeTooLong { .. } => codes::lexical::LEXEME_TOO_LONG,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexerError::DuplicateTokenKind { .. } => codes::lexical::DUPLICATE_TOKEN_KIND,
            LexerError::Automaton { source, .. } => source.error_code(),
        }
    }

    /// Source location of the failure, when it has one
    pub fn span(&self) -> Option<Span> {
        match self {
            LexerError::NoMatchingToken {
                character,
                position,
            }
            | LexerError::EmptyMatch {
                character,
                position,
                ..
            } => Some(Span::single(*position, *character)),
            LexerError::LexemeTooLong { span, .. } => Some(*span),
            LexerError::TooManyTokens { position, .. } => Some(Span::point(*position)),
            LexerError::DuplicateTokenKind { .. } | LexerError::Automaton { .. } => None,
        }
    }

    /// Byte offset of the failure in the input
    pub fn offset(&self) -> Option<usize> {
        self.span().map(|span| span.start.offset)
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

/// Counters collected during one scan
#[derive(Debug, Default, Clone, Serialize)]
pub struct LexicalMetrics {
    /// Tokens counted toward the total (whitespace only when preferred)
    pub total_tokens: usize,
    pub significant_tokens: usize,
    pub whitespace_tokens: usize,
    pub longest_lexeme: usize,
    pub input_bytes: usize,
    /// Per-kind counts, collected when detailed metrics are enabled
    pub kind_counts: BTreeMap<TokenKind, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        if token.is_significant() {
            self.significant_tokens += 1;
            self.total_tokens += 1;
        } else {
            self.whitespace_tokens += 1;
            if preferences.include_whitespace_in_counts {
                self.total_tokens += 1;
            }
        }

        self.longest_lexeme = self.longest_lexeme.max(token.lexeme.len());

        if preferences.collect_detailed_metrics {
            *self.kind_counts.entry(token.kind).or_insert(0) += 1;
        }
    }
}

/// Ordered (kind, automaton) table plus scan preferences
///
/// Scanning borrows the table immutably, so one lexer can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    table: Vec<(TokenKind, Automaton)>,
    preferences: LexicalPreferences,
}

impl Lexer {
    /// Empty table; register automata with [`Lexer::add_automaton`]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            table: Vec::new(),
            preferences,
        }
    }

    /// The arithmetic token table, in order NUM, PLUS, MINUS, TIMES, DIV,
    /// LPAREN, RPAREN, WHITE_SPACE
    pub fn standard() -> Result<Self, LexerError> {
        Self::standard_with_preferences(LexicalPreferences::default())
    }

    pub fn standard_with_preferences(preferences: LexicalPreferences) -> Result<Self, LexerError> {
        let mut lexer = Self::with_preferences(preferences);

        for kind in TokenKind::ALL {
            let automaton = match kind {
                TokenKind::Num => patterns::number(),
                TokenKind::Plus => patterns::single_char('+'),
                TokenKind::Minus => patterns::single_char('-'),
                TokenKind::Times => patterns::single_char('*'),
                TokenKind::Div => patterns::single_char('/'),
                TokenKind::LParen => patterns::single_char('('),
                TokenKind::RParen => patterns::single_char(')'),
                TokenKind::WhiteSpace => patterns::whitespace(),
            }
            .map_err(|source| LexerError::Automaton { kind, source })?;

            lexer.add_automaton(kind, automaton)?;
        }

        log_success!(
            codes::success::LEXER_TABLE_READY,
            "Lexer automaton table constructed",
            "kinds" => lexer.table.len()
        );

        Ok(lexer)
    }

    /// Append `automaton` for `kind`; earlier registrations win ties
    pub fn add_automaton(
        &mut self,
        kind: TokenKind,
        automaton: Automaton,
    ) -> Result<(), LexerError> {
        if self.table.iter().any(|(existing, _)| *existing == kind) {
            let error = LexerError::DuplicateTokenKind { kind };
            log_error!(error.error_code(), "Token kind registered twice",
                "kind" => kind
            );
            return Err(error);
        }

        if let Err(source) = automaton.start_state() {
            let error = LexerError::Automaton { kind, source };
            log_error!(error.error_code(), "Automaton rejected by lexer",
                "kind" => kind,
                "reason" => &error
            );
            return Err(error);
        }

        self.table.push((kind, automaton));
        Ok(())
    }

    /// Registered kinds in tie-break order
    pub fn kinds(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.table.iter().map(|(kind, _)| *kind)
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Tokenize into a stream the parser can consume; whitespace is skipped
    pub fn tokenize(&self, input: &str) -> Result<TokenStream, LexerError> {
        self.tokenize_with_metrics(input).map(|(stream, _)| stream)
    }

    /// Every token including whitespace; the lexemes concatenate back to `input`
    pub fn tokenize_all(&self, input: &str) -> Result<Vec<Token>, LexerError> {
        self.scan(input).map(|(tokens, _)| tokens)
    }

    pub fn tokenize_with_metrics(
        &self,
        input: &str,
    ) -> Result<(TokenStream, LexicalMetrics), LexerError> {
        let (tokens, metrics) = self.scan(input)?;
        Ok((TokenStream::new(tokens), metrics))
    }

    /// Longest match at `offset`: (end offset, kind) with ties to the earliest kind
    fn best_match(&self, input: &str, offset: usize) -> Option<(usize, TokenKind)> {
        let mut best: Option<(usize, TokenKind)> = None;
        for (kind, automaton) in &self.table {
            if let Some(end) = automaton.longest_match(input, offset) {
                if best.map_or(true, |(best_end, _)| end > best_end) {
                    best = Some((end, *kind));
                }
            }
        }
        best
    }

    fn scan(&self, input: &str) -> Result<(Vec<Token>, LexicalMetrics), LexerError> {
        let mut metrics = LexicalMetrics {
            input_bytes: input.len(),
            ..LexicalMetrics::default()
        };
        let mut tokens = Vec::new();
        let mut position = Position::start();

        while position.offset < input.len() {
            let offset = position.offset;
            let character = input[offset..].chars().next().unwrap_or('\0');

            let (end, kind) = match self.best_match(input, offset) {
                Some((end, kind)) if end > offset => (end, kind),
                Some((_, kind)) => {
                    return Err(self.fail(LexerError::EmptyMatch {
                        kind,
                        character,
                        position,
                    }))
                }
                None => {
                    return Err(self.fail(LexerError::NoMatchingToken {
                        character,
                        position,
                    }))
                }
            };

            let lexeme = &input[offset..end];
            let span = Span::new(position, position.advance_str(lexeme));

            if lexeme.len() > MAX_LEXEME_LENGTH {
                return Err(self.fail(LexerError::LexemeTooLong {
                    kind,
                    length: lexeme.len(),
                    span,
                }));
            }

            if tokens.len() >= MAX_TOKEN_COUNT {
                return Err(self.fail(LexerError::TooManyTokens {
                    count: tokens.len() + 1,
                    position,
                }));
            }

            let token = Token::new(kind, lexeme, span);
            metrics.record_token(&token, &self.preferences);
            tokens.push(token);
            position = span.end;
        }

        log_success!(
            codes::success::TOKENIZATION_COMPLETE,
            "Tokenization completed",
            "tokens" => metrics.total_tokens,
            "significant_tokens" => metrics.significant_tokens,
            "bytes" => metrics.input_bytes
        );

        Ok((tokens, metrics))
    }

    fn fail(&self, error: LexerError) -> LexerError {
        let location = match (self.preferences.include_position_in_errors, error.span()) {
            (true, Some(span)) => span.start.to_string(),
            _ => "unknown".to_string(),
        };

        match error.span() {
            Some(span) => log_error!(error.error_code(), &error.to_string(),
                span = span,
                "location" => location
            ),
            None => log_error!(error.error_code(), &error.to_string()),
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::StateId;
    use crate::logging::{service, with_scoped_service};
    use assert_matches::assert_matches;

    fn lexer() -> Lexer {
        Lexer::standard().unwrap()
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        lexer().tokenize(input).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_standard_table_order() {
        let registered: Vec<TokenKind> = lexer().kinds().collect();
        assert_eq!(registered, TokenKind::ALL.to_vec());
    }

    #[test]
    fn test_decimal_number_is_one_token() {
        let stream = lexer().tokenize("3.5").unwrap();
        assert_eq!(stream.len(), 1);
        let token = stream.current().unwrap();
        assert_eq!(token.kind, TokenKind::Num);
        assert_eq!(token.lexeme, "3.5");
        assert_eq!(token.span.end.offset, 3);
    }

    #[test]
    fn test_malformed_numbers_fail() {
        assert_matches!(
            lexer().tokenize(".5"),
            Err(LexerError::EmptyMatch { character: '.', position, .. }) if position.offset == 0
        );
        assert_matches!(
            lexer().tokenize("5."),
            Err(LexerError::EmptyMatch { character: '.', position, .. }) if position.offset == 1
        );
    }

    #[test]
    fn test_operators_and_whitespace() {
        assert_eq!(
            kinds("(1 + 2)\t*\n3/4-5"),
            vec![
                TokenKind::LParen,
                TokenKind::Num,
                TokenKind::Plus,
                TokenKind::Num,
                TokenKind::RParen,
                TokenKind::Times,
                TokenKind::Num,
                TokenKind::Div,
                TokenKind::Num,
                TokenKind::Minus,
                TokenKind::Num,
            ]
        );
    }

    #[test]
    fn test_whitespace_is_one_maximal_token() {
        let tokens = lexer().tokenize_all("1 \t\r\n 2").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::WhiteSpace);
        assert_eq!(tokens[1].lexeme, " \t\r\n ");
        assert_eq!(tokens[2].span.start.line, 2);
        assert_eq!(tokens[2].span.start.column, 2);
    }

    #[test]
    fn test_lossless_partition() {
        let inputs = [
            "",
            "1",
            "  12.75*(3 -4)/ 5  ",
            "\n\n(1)\r\n",
            "((((2))))",
            "1+2+3+4+5+6+7+8+9+10",
            "0.0/0.00\t-\t9",
        ];
        for input in inputs {
            let tokens = lexer().tokenize_all(input).unwrap();
            let rebuilt: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
            assert_eq!(rebuilt, input);

            for pair in tokens.windows(2) {
                assert_eq!(pair[0].span.end, pair[1].span.start);
            }
        }
    }

    /// First offset where no `[0-9]+(\.[0-9]+)?`, operator, parenthesis or
    /// whitespace token can start, scanning left to right
    fn first_unlexable_offset(input: &str) -> Option<usize> {
        let bytes = input.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'0'..=b'9' => {
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        i += 1;
                    }
                    if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
                        i += 1;
                        while i < bytes.len() && bytes[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                b'+' | b'-' | b'*' | b'/' | b'(' | b')' | b' ' | b'\t' | b'\r' | b'\n' => i += 1,
                _ => return Some(i),
            }
        }
        None
    }

    #[test]
    fn test_exhaustive_partition_over_small_alphabet() {
        let alphabet = ['1', '.', '+', '(', ')', ' ', '\n'];
        let lexer = lexer();
        let (logger, _memory) = service::create_test_service();

        let mut inputs = vec![String::new()];
        let mut frontier = vec![String::new()];
        for _ in 0..5 {
            frontier = frontier
                .iter()
                .flat_map(|prefix| alphabet.iter().map(move |c| format!("{}{}", prefix, c)))
                .collect();
            inputs.extend(frontier.iter().cloned());
        }
        assert_eq!(inputs.len(), 1 + 7 + 49 + 343 + 2401 + 16807);

        with_scoped_service(logger, || {
            for input in &inputs {
                match (lexer.tokenize_all(input), first_unlexable_offset(input)) {
                    (Ok(tokens), None) => {
                        assert!(tokens.iter().all(|t| !t.lexeme.is_empty()), "{:?}", input);
                        let rebuilt: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
                        assert_eq!(&rebuilt, input);
                    }
                    (Err(error), Some(offset)) => {
                        assert_matches!(
                            error,
                            LexerError::EmptyMatch { character: '.', .. }
                                | LexerError::NoMatchingToken { character: '.', .. },
                            "{:?}",
                            input
                        );
                        assert_eq!(error.offset(), Some(offset), "{:?}", input);
                    }
                    (outcome, expected) => {
                        panic!("{:?}: got {:?}, expected failure at {:?}", input, outcome, expected)
                    }
                }
            }
        });
    }

    #[test]
    fn test_empty_input() {
        let stream = lexer().tokenize("").unwrap();
        assert!(stream.is_empty());
        assert!(lexer().tokenize_all("").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_character_reports_position() {
        let error = lexer().tokenize("1 +\n $").unwrap_err();
        assert_matches!(
            error,
            LexerError::EmptyMatch { character: '$', kind: TokenKind::WhiteSpace, .. }
        );
        let span = error.span().unwrap();
        assert_eq!((span.start.line, span.start.column), (2, 2));
        assert_eq!(error.offset(), Some(5));
    }

    #[test]
    fn test_no_matching_token_without_whitespace() {
        let mut lexer = Lexer::new();
        lexer
            .add_automaton(TokenKind::Num, patterns::number().unwrap())
            .unwrap();

        assert_matches!(
            lexer.tokenize("12x"),
            Err(LexerError::NoMatchingToken { character: 'x', .. })
        );
        assert_eq!(
            LexerError::NoMatchingToken {
                character: 'x',
                position: Position::new(2, 1, 3)
            }
            .error_code()
            .as_str(),
            "E020"
        );
    }

    #[test]
    fn test_tie_goes_to_first_registered() {
        // Both automata accept exactly "+": the first registration wins
        let mut lexer = Lexer::new();
        lexer
            .add_automaton(TokenKind::Minus, patterns::single_char('+').unwrap())
            .unwrap();
        lexer
            .add_automaton(TokenKind::Plus, patterns::single_char('+').unwrap())
            .unwrap();

        let stream = lexer.tokenize("+").unwrap();
        assert_eq!(stream.current_kind(), Some(TokenKind::Minus));
    }

    #[test]
    fn test_longer_match_beats_registration_order() {
        // PLUS accepts "1" only, NUM accepts "12": NUM wins despite registering later
        let mut lexer = Lexer::new();
        lexer
            .add_automaton(TokenKind::Plus, patterns::single_char('1').unwrap())
            .unwrap();
        lexer
            .add_automaton(TokenKind::Num, patterns::number().unwrap())
            .unwrap();

        let stream = lexer.tokenize("12").unwrap();
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.current_kind(), Some(TokenKind::Num));
    }

    #[test]
    fn test_registration_validation() {
        let mut lexer = Lexer::new();
        lexer
            .add_automaton(TokenKind::Plus, patterns::single_char('+').unwrap())
            .unwrap();

        assert_matches!(
            lexer.add_automaton(TokenKind::Plus, patterns::single_char('+').unwrap()),
            Err(LexerError::DuplicateTokenKind { kind: TokenKind::Plus })
        );

        let mut headless = Automaton::new();
        headless.add_state(StateId(0), false, true).unwrap();
        let error = lexer.add_automaton(TokenKind::Div, headless).unwrap_err();
        assert_matches!(
            error,
            LexerError::Automaton {
                kind: TokenKind::Div,
                source: AutomatonError::MissingStartState
            }
        );
        assert_eq!(error.error_code().as_str(), "E019");
        assert_eq!(lexer.kinds().count(), 1);
    }

    #[test]
    fn test_metrics() {
        let prefs = LexicalPreferences {
            collect_detailed_metrics: true,
            include_whitespace_in_counts: false,
            include_position_in_errors: true,
        };
        let lexer = Lexer::standard_with_preferences(prefs).unwrap();
        let (stream, metrics) = lexer.tokenize_with_metrics("12.5 + 3").unwrap();

        assert_eq!(stream.len(), 3);
        assert_eq!(metrics.total_tokens, 3);
        assert_eq!(metrics.whitespace_tokens, 2);
        assert_eq!(metrics.longest_lexeme, 4);
        assert_eq!(metrics.input_bytes, 8);
        assert_eq!(metrics.kind_counts.get(&TokenKind::Num), Some(&2));
        assert_eq!(metrics.kind_counts.get(&TokenKind::WhiteSpace), Some(&2));
    }

    #[test]
    fn test_lexeme_length_limit() {
        let long_number = "9".repeat(MAX_LEXEME_LENGTH + 1);
        assert_matches!(
            lexer().tokenize(&long_number),
            Err(LexerError::LexemeTooLong { kind: TokenKind::Num, .. })
        );
    }

    #[test]
    fn test_logs_success_and_failure_codes() {
        let (logger, memory) = service::create_test_service();

        with_scoped_service(logger, || {
            let lexer = lexer();
            lexer.tokenize("1+2").unwrap();
            let _ = lexer.tokenize("1 # 2");
        });

        assert!(memory.has_success_with_code(codes::success::LEXER_TABLE_READY));
        assert!(memory.has_success_with_code(codes::success::TOKENIZATION_COMPLETE));
        assert!(memory.has_error_with_code(codes::lexical::EMPTY_MATCH));
    }

    #[test]
    fn test_lexer_is_shared_across_threads() {
        let lexer = std::sync::Arc::new(lexer());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let lexer = lexer.clone();
                std::thread::spawn(move || {
                    let input = format!("{} * ({} + 1)", i, i);
                    lexer.tokenize(&input).map(|stream| stream.len())
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(7));
        }
    }
}
