use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::syntax::SyntaxError;
use crate::utils::Span;

/// Pipeline processing errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Syntax analysis failed: {0}")]
    SyntaxAnalysis(#[from] SyntaxError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(error) => error.error_code(),
            Self::LexicalAnalysis(error) => error.error_code(),
            Self::SyntaxAnalysis(error) => error.error_code(),
            Self::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// Location in the expression source, for lexical and syntax failures
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::LexicalAnalysis(error) => error.span(),
            Self::SyntaxAnalysis(error) => error.span(),
            Self::FileProcessing(_) | Self::Pipeline { .. } => None,
        }
    }

    /// Short stage name for diagnostics
    pub fn stage(&self) -> &'static str {
        match self {
            Self::FileProcessing(_) => "file",
            Self::LexicalAnalysis(_) => "lexical",
            Self::SyntaxAnalysis(_) => "syntax",
            Self::Pipeline { .. } => "pipeline",
        }
    }

    /// Message of the underlying stage error without the stage prefix
    pub fn detail(&self) -> String {
        match self {
            Self::FileProcessing(error) => error.to_string(),
            Self::LexicalAnalysis(error) => error.to_string(),
            Self::SyntaxAnalysis(error) => error.to_string(),
            Self::Pipeline { message } => message.clone(),
        }
    }
}
