// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Runtime configuration loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid configuration: {message}")]
    Parse { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to collect per-kind token metrics
    pub collect_detailed_metrics: bool,

    /// Whether whitespace tokens count toward the reported totals
    pub include_whitespace_in_counts: bool,

    /// Whether to show line/column information in error messages
    pub include_position_in_errors: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env::var(env_vars::LEXICAL_DETAILED_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_whitespace_in_counts: env::var(env_vars::LEXICAL_INCLUDE_WHITESPACE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_position_in_errors: env::var(env_vars::LEXICAL_INCLUDE_POSITIONS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxPreferences {
    /// Log every production entered by the parser at debug level
    pub trace_productions: bool,

    /// Include the production stack in error log context
    pub include_context_in_errors: bool,
}

impl Default for SyntaxPreferences {
    fn default() -> Self {
        Self {
            trace_productions: env::var(env_vars::SYNTAX_TRACE_PRODUCTIONS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_context_in_errors: env::var(env_vars::SYNTAX_INCLUDE_CONTEXT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Preferred minimum log level (within security constraints)
    pub min_log_level: LogLevel,

    /// Whether to include timing metrics in logs
    pub log_performance_events: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_performance_events: env::var(env_vars::LOGGING_LOG_PERFORMANCE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables and CLI flags)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub syntax: SyntaxPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a runtime configuration from TOML text; missing sections take defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Load a runtime configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize back to TOML (used by `--print-config`)
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "ARITH_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_INCLUDE_WHITESPACE: &str = "ARITH_LEXICAL_INCLUDE_WHITESPACE";
    pub const LEXICAL_INCLUDE_POSITIONS: &str = "ARITH_LEXICAL_INCLUDE_POSITIONS";

    // Syntax
    pub const SYNTAX_TRACE_PRODUCTIONS: &str = "ARITH_SYNTAX_TRACE_PRODUCTIONS";
    pub const SYNTAX_INCLUDE_CONTEXT: &str = "ARITH_SYNTAX_INCLUDE_CONTEXT";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "ARITH_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "ARITH_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "ARITH_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "ARITH_LOGGING_LOG_PERFORMANCE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("1"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [syntax]
            trace_productions = true

            [logging]
            min_log_level = "debug"
            "#,
        )
        .unwrap();

        assert!(config.syntax.trace_productions);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        // Untouched section falls back to its Default impl
        assert!(config.lexical.include_position_in_errors);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let result = RuntimeConfig::from_toml_str("[logging]\nmin_log_level = \"loud\"");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arith.toml");
        std::fs::write(&path, "[lexical]\ncollect_detailed_metrics = false\n").unwrap();

        let config = RuntimeConfig::load(&path).unwrap();
        assert!(!config.lexical.collect_detailed_metrics);

        let missing = RuntimeConfig::load(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_toml_roundtrip_keeps_level() {
        let mut config = RuntimeConfig::default();
        config.logging.min_log_level = LogLevel::Warning;
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("min_log_level = \"warning\""));
    }
}
