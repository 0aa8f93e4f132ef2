use crate::config::build_info;
use crate::config::compile_time::{file_processing, lexical, syntax};
use crate::tokens::TokenKind;

/// Information about pipeline capabilities and limits
#[derive(Debug, Clone, serde::Serialize)]
pub struct PipelineInfo {
    pub pipeline_stages: usize,
    pub token_kinds: Vec<TokenKind>,
    pub max_file_size: u64,
    pub max_token_count: usize,
    pub max_parse_depth: usize,
    pub build_profile: &'static str,
    pub global_logging_enabled: bool,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        let kinds: Vec<&str> = self.token_kinds.iter().map(TokenKind::as_str).collect();
        format!(
            "Arithmetic Expression Pipeline:\n\
             - Pipeline Stages: {}\n\
             - Token Kinds: {}\n\
             - Max File Size: {} bytes\n\
             - Max Token Count: {}\n\
             - Max Parse Depth: {}\n\
             - Build Profile: {}\n\
             - Global Logging: {}",
            self.pipeline_stages,
            kinds.join(", "),
            self.max_file_size,
            self.max_token_count,
            self.max_parse_depth,
            self.build_profile,
            self.global_logging_enabled
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{}-stage arithmetic frontend ({} token kinds, {} profile)",
            self.pipeline_stages,
            self.token_kinds.len(),
            self.build_profile
        )
    }
}

/// Get pipeline capabilities information
pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        pipeline_stages: 3,
        token_kinds: TokenKind::ALL.to_vec(),
        max_file_size: file_processing::MAX_FILE_SIZE,
        max_token_count: lexical::MAX_TOKEN_COUNT,
        max_parse_depth: syntax::MAX_PARSE_DEPTH,
        build_profile: build_info::profile(),
        global_logging_enabled: crate::logging::is_initialized(),
    }
}
