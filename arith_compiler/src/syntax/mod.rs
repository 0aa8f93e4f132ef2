//! Syntax analysis: token stream to expression tree

mod error;
mod parser;

pub use error::{SyntaxError, SyntaxResult};
pub use parser::{create_parser, ExpressionParser};

use crate::config::runtime::SyntaxPreferences;
use crate::grammar::Expression;
use crate::logging::codes;
use crate::tokens::TokenStream;

/// Parse a complete expression from `tokens` with default preferences
pub fn parse(tokens: TokenStream) -> SyntaxResult<Expression> {
    parse_with_preferences(tokens, SyntaxPreferences::default())
}

pub fn parse_with_preferences(
    tokens: TokenStream,
    preferences: SyntaxPreferences,
) -> SyntaxResult<Expression> {
    log_debug!("Starting syntax analysis", "tokens" => tokens.len());
    ExpressionParser::with_preferences(tokens, preferences).parse_expression()
}

/// Check that every syntax code is registered (for system startup)
pub fn init_syntax_logging() -> Result<(), String> {
    codes::ensure_registered(
        "Syntax",
        &[
            codes::syntax::UNEXPECTED_END_OF_INPUT,
            codes::syntax::UNMATCHED_PARENTHESIS,
            codes::syntax::TRAILING_TOKENS,
            codes::syntax::INVALID_NUMBER_LITERAL,
            codes::syntax::UNEXPECTED_TOKEN,
            codes::syntax::MAX_RECURSION_DEPTH,
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical;

    #[test]
    fn test_syntax_codes_registered() {
        assert!(init_syntax_logging().is_ok());
    }

    #[test]
    fn test_parse_entry_point() {
        let tokens = lexical::tokenize("2 * (3 + 4)").unwrap();
        let tree = parse(tokens).unwrap();
        assert_eq!(tree.evaluate(), 14.0);
        assert_eq!(tree.to_string(), "(2 * (3 + 4))");
    }

    #[test]
    fn test_parse_reports_first_error() {
        let tokens = lexical::tokenize("(1 +").unwrap();
        let error = parse(tokens).unwrap_err();
        assert_eq!(error.error_code(), codes::syntax::UNEXPECTED_END_OF_INPUT);
    }
}
