use crate::file_processor::FileMetadata;
use crate::grammar::Expression;
use crate::lexical::LexicalMetrics;
use crate::tokens::Token;
use std::time::Duration;

/// Everything one lexing and parsing run produced
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub ast: Expression,
    /// Significant tokens handed to the parser
    pub tokens: Vec<Token>,
    pub lexical_metrics: LexicalMetrics,
    pub token_count: usize,
    pub processing_duration: Duration,
    /// Present when the source came from a file
    pub file_metadata: Option<FileMetadata>,
}

impl PipelineResult {
    pub fn new(
        ast: Expression,
        tokens: Vec<Token>,
        lexical_metrics: LexicalMetrics,
        processing_duration: Duration,
    ) -> Self {
        Self {
            ast,
            token_count: tokens.len(),
            tokens,
            lexical_metrics,
            processing_duration,
            file_metadata: None,
        }
    }

    pub fn with_file_metadata(mut self, metadata: FileMetadata) -> Self {
        self.file_metadata = Some(metadata);
        self
    }

    /// Value of the parsed expression
    pub fn value(&self) -> f64 {
        self.ast.evaluate()
    }

    pub fn log_success(&self, source_name: &str) {
        log_performance!(
            crate::logging::codes::success::PIPELINE_COMPLETE,
            "Expression pipeline succeeded",
            duration = self.processing_duration,
            "source" => source_name,
            "tokens" => self.token_count,
            "nodes" => self.ast.node_count()
        );
    }
}
