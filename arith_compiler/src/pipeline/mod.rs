mod error;
mod info;
pub mod output;
mod result;
mod validation;

pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use output::PipelineOutput;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::runtime::{RuntimeConfig, SyntaxPreferences};
use crate::lexical::Lexer;
use crate::logging;
use crate::tokens::TokenStream;
use std::time::Instant;

/// Lexer table plus parser preferences, reused across inputs
///
/// In debug mode every significant token is logged before parsing.
#[derive(Debug, Clone)]
pub struct Frontend {
    lexer: Lexer,
    syntax: SyntaxPreferences,
    debug: bool,
}

impl Frontend {
    /// Standard token table with default preferences
    pub fn new() -> Result<Self, PipelineError> {
        Ok(Self::with_lexer(Lexer::standard()?))
    }

    pub fn with_config(config: &RuntimeConfig) -> Result<Self, PipelineError> {
        let lexer = Lexer::standard_with_preferences(config.lexical.clone())?;
        Ok(Self {
            lexer,
            syntax: config.syntax.clone(),
            debug: false,
        })
    }

    pub fn with_lexer(lexer: Lexer) -> Self {
        Self {
            lexer,
            syntax: SyntaxPreferences::default(),
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    /// Tokenize without parsing
    pub fn tokenize(&self, source: &str) -> Result<TokenStream, PipelineError> {
        Ok(self.lexer.tokenize(source)?)
    }

    /// Lex and parse `source`
    pub fn run(&self, source: &str) -> Result<PipelineResult, PipelineError> {
        let start_time = Instant::now();

        let (tokens, lexical_metrics) = self.lexer.tokenize_with_metrics(source)?;
        let significant = tokens.significant_tokens();

        if self.debug {
            self.trace_tokens(&tokens);
        }

        let ast = crate::syntax::parse_with_preferences(tokens, self.syntax.clone())?;

        Ok(PipelineResult::new(
            ast,
            significant,
            lexical_metrics,
            start_time.elapsed(),
        ))
    }

    /// Read, lex and parse the file at `file_path`
    pub fn run_file(&self, file_path: &str) -> Result<PipelineResult, PipelineError> {
        let start_time = Instant::now();

        logging::with_source_context(file_path, 0, || {
            log_info!("Starting expression file pipeline", "file" => file_path);

            let file_result = crate::file_processor::process_file(file_path)?;
            let mut result = self
                .run(&file_result.source)?
                .with_file_metadata(file_result.metadata);
            result.processing_duration = start_time.elapsed();

            result.log_success(file_path);
            Ok(result)
        })
    }

    fn trace_tokens(&self, tokens: &TokenStream) {
        for token in tokens.iter() {
            log_info!("Token",
                "kind" => token.kind,
                "lexeme" => &token.lexeme,
                "span" => token.span
            );
        }
    }
}

/// Lex and parse an in-memory expression with the standard token table
pub fn compile_source(source: &str) -> Result<PipelineResult, PipelineError> {
    let result = Frontend::new()?.run(source)?;
    result.log_success("<input>");
    Ok(result)
}

/// Process a single file through file processing, lexing and parsing
pub fn process_file(file_path: &str) -> Result<PipelineResult, PipelineError> {
    Frontend::new()?.run_file(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Expression;
    use crate::logging::{codes, service, with_scoped_service};
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_validate_pipeline() {
        assert!(validate_pipeline().is_ok());
    }

    #[test]
    fn test_compile_source() {
        let result = compile_source("2 * (3 + 4) - 1").unwrap();

        assert_eq!(result.value(), 13.0);
        assert_eq!(result.token_count, 9);
        assert_eq!(result.tokens.len(), 9);
        assert!(result.tokens.iter().all(|t| t.kind != TokenKind::WhiteSpace));
        assert_eq!(result.lexical_metrics.whitespace_tokens, 6);
        assert!(result.file_metadata.is_none());
    }

    #[test]
    fn test_pinned_examples() {
        let lit = Expression::literal;
        assert_eq!(
            compile_source("1+2*3").unwrap().ast,
            Expression::plus(lit(1.0), Expression::times(lit(2.0), lit(3.0)))
        );
        assert_eq!(compile_source("5-3-1").unwrap().value(), 3.0);
        assert!(compile_source("1/0").unwrap().value().is_infinite());
    }

    #[test]
    fn test_stage_errors_are_wrapped() {
        let error = compile_source("1 $ 2").unwrap_err();
        assert_matches!(error, PipelineError::LexicalAnalysis(_));
        assert_eq!(error.stage(), "lexical");
        assert_eq!(error.span().map(|s| s.start.offset), Some(2));

        let error = compile_source("(1").unwrap_err();
        assert_matches!(error, PipelineError::SyntaxAnalysis(_));
        assert_eq!(error.error_code(), codes::syntax::UNMATCHED_PARENTHESIS);

        let error = compile_source("").unwrap_err();
        assert_eq!(error.error_code(), codes::syntax::UNEXPECTED_END_OF_INPUT);
    }

    #[test]
    fn test_process_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(1.5 + 2.5)\n/ 2\n").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let result = process_file(&path).unwrap();

        assert_eq!(result.value(), 2.0);
        assert_eq!(result.file_metadata.as_ref().map(|m| m.line_count), Some(2));

        let error = process_file("/nonexistent/expr.arith").unwrap_err();
        assert_matches!(error, PipelineError::FileProcessing(_));
        assert_eq!(error.span(), None);
    }

    #[test]
    fn test_debug_mode_logs_tokens() {
        let (logger, memory) = service::create_test_service();
        let frontend = Frontend::new().unwrap().with_debug(true);
        assert!(frontend.is_debug());

        with_scoped_service(logger, || {
            frontend.run("1 + 2").unwrap();
        });

        let traced: Vec<String> = memory
            .get_events()
            .into_iter()
            .filter(|event| event.message == "Token")
            .filter_map(|event| event.context.get("kind").cloned())
            .collect();
        assert_eq!(traced, vec!["NUM", "PLUS", "NUM"]);
    }

    #[test]
    fn test_frontend_is_reusable() {
        let frontend = Frontend::new().unwrap();
        for (source, expected) in [("1", 1.0), ("2*3", 6.0), ("8/(2+2)", 2.0)] {
            assert_eq!(frontend.run(source).unwrap().value(), expected);
        }
        assert_eq!(frontend.tokenize("1 + 1").unwrap().len(), 3);
    }

    #[test]
    fn test_output_serialization() {
        let result = compile_source("1 + 2").unwrap();
        let output = PipelineOutput::from(&result);
        let json: serde_json::Value =
            serde_json::from_str(&output.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["value"], 3.0);
        assert_eq!(json["tokens"][1]["kind"], "PLUS");
        assert_eq!(json["ast"]["Plus"][0]["Literal"], 1.0);
    }

    #[test]
    fn test_pipeline_info() {
        let info = get_pipeline_info();
        assert_eq!(info.token_kinds.len(), 8);
        assert!(info.report().contains("WHITE_SPACE"));
        assert!(info.summary().starts_with("3-stage"));
    }
}
