use super::PipelineResult;
use crate::grammar::Expression;
use crate::lexical::LexicalMetrics;
use crate::tokens::Token;
use serde::Serialize;

/// Serializable view of a pipeline run, used for JSON output
#[derive(Debug, Serialize)]
pub struct PipelineOutput {
    /// Significant tokens in source order
    pub tokens: Vec<Token>,
    pub ast: Expression,
    /// IEEE result; serialized as `null` when not finite
    pub value: f64,
    pub metrics: LexicalMetrics,
    pub duration_ms: f64,
}

impl PipelineOutput {
    pub fn new(result: &PipelineResult) -> Self {
        Self {
            tokens: result.tokens.clone(),
            ast: result.ast.clone(),
            value: result.value(),
            metrics: result.lexical_metrics.clone(),
            duration_ms: result.processing_duration.as_secs_f64() * 1000.0,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&PipelineResult> for PipelineOutput {
    fn from(result: &PipelineResult) -> Self {
        Self::new(result)
    }
}
