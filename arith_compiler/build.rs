// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    lexical: LexicalLimits,
    syntax: SyntaxLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    max_line_count: usize,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_token_count: usize,
    max_lexeme_length: usize,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_parse_depth: usize,
    max_context_stack_depth: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_events_per_source: usize,
    max_log_message_length: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=ARITH_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=ARITH_CONFIG_DIR");

    let profile = env::var("ARITH_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("ARITH_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of this crate's directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 100_000_000;
    const ABSOLUTE_MAX_PARSE_DEPTH: usize = 10_000;

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("LIMITS: max_file_size exceeds absolute maximum");
    }

    if config.syntax.max_parse_depth == 0
        || config.syntax.max_parse_depth > ABSOLUTE_MAX_PARSE_DEPTH
    {
        panic!("LIMITS: max_parse_depth must be within 1..={}", ABSOLUTE_MAX_PARSE_DEPTH);
    }

    if config.lexical.max_token_count == 0 {
        panic!("LIMITS: max_token_count cannot be zero");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("LIMITS: security_min_log_level too high (max: 2)");
    }

    if config.logging.max_log_events_per_source > config.logging.log_buffer_size {
        panic!("LIMITS: max_log_events_per_source exceeds log_buffer_size");
    }

    if profile == "production" && config.file_processing.max_file_size > 10_000_000 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time limits from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        /// Largest expression source file accepted, in bytes
        pub const MAX_FILE_SIZE: u64 = {};
        /// Largest line count accepted for a source file
        pub const MAX_LINE_COUNT: usize = {};
    }}

    pub mod lexical {{
        /// Maximum number of tokens (whitespace included) produced by one scan
        pub const MAX_TOKEN_COUNT: usize = {};
        /// Maximum byte length of a single lexeme
        pub const MAX_LEXEME_LENGTH: usize = {};
    }}

    pub mod syntax {{
        /// Maximum nesting of grammar productions before parsing aborts
        pub const MAX_PARSE_DEPTH: usize = {};
        /// Maximum number of production names kept for diagnostics
        pub const MAX_CONTEXT_STACK_DEPTH: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_EVENTS_PER_SOURCE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        config.file_processing.max_file_size,
        config.file_processing.max_line_count,
        config.lexical.max_token_count,
        config.lexical.max_lexeme_length,
        config.syntax.max_parse_depth,
        config.syntax.max_context_stack_depth,
        config.logging.log_buffer_size,
        config.logging.max_log_events_per_source,
        config.logging.max_log_message_length,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
