//! Consolidated error codes and classification system
//!
//! Single source of truth for every code the compiler logs, together with the
//! metadata used to classify it.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Automaton construction error codes
pub mod automaton {
    use super::Code;

    pub const DUPLICATE_START_STATE: Code = Code::new("E015");
    pub const DUPLICATE_STATE: Code = Code::new("E016");
    pub const UNKNOWN_STATE: Code = Code::new("E017");
    pub const NONDETERMINISTIC_TRANSITION: Code = Code::new("E018");
    pub const MISSING_START_STATE: Code = Code::new("E019");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const NO_MATCHING_TOKEN: Code = Code::new("E020");
    pub const EMPTY_MATCH: Code = Code::new("E021");
    pub const DUPLICATE_TOKEN_KIND: Code = Code::new("E022");
    pub const LEXEME_TOO_LONG: Code = Code::new("E023");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_END_OF_INPUT: Code = Code::new("E040");
    pub const UNMATCHED_PARENTHESIS: Code = Code::new("E042");
    pub const TRAILING_TOKENS: Code = Code::new("E044");
    pub const INVALID_NUMBER_LITERAL: Code = Code::new("E045");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E087");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const LEXER_TABLE_READY: Code = Code::new("I010");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const AST_CONSTRUCTION_COMPLETE: Code = Code::new("I040");
    pub const PIPELINE_COMPLETE: Code = Code::new("I090");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the failing input",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check configuration files and environment variables",
            ),
            // File processing
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File not found at specified path",
                "Check file path and ensure file exists",
            ),
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File exceeds maximum size limit",
                "Split the input or rebuild with a larger file size limit",
            ),
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Permission denied accessing file",
                "Check file permissions and user access rights",
            ),
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File content is not valid UTF-8",
                "Save the expression file as ASCII or UTF-8",
            ),
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "I/O error while reading file",
                "Check disk health and retry",
            ),
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Path is empty or does not name a regular file",
                "Provide the path of an expression file",
            ),
            ErrorMetadata::new(
                "E013",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File exceeds maximum line count",
                "Reduce the number of lines in the input",
            ),
            // Automaton construction
            ErrorMetadata::new(
                "E015",
                "Automaton",
                Severity::Critical,
                false,
                true,
                "Automaton already has a start state",
                "Register exactly one start state per automaton",
            ),
            ErrorMetadata::new(
                "E016",
                "Automaton",
                Severity::Critical,
                false,
                true,
                "State identifier registered twice",
                "Use unique state identifiers within an automaton",
            ),
            ErrorMetadata::new(
                "E017",
                "Automaton",
                Severity::Critical,
                false,
                true,
                "Transition references an unregistered state",
                "Add both states before adding the transition",
            ),
            ErrorMetadata::new(
                "E018",
                "Automaton",
                Severity::Critical,
                false,
                true,
                "Second transition for the same state and character",
                "Keep automata deterministic: one target per (state, character)",
            ),
            ErrorMetadata::new(
                "E019",
                "Automaton",
                Severity::Critical,
                false,
                true,
                "Automaton has no start state",
                "Register a start state before using the automaton",
            ),
            // Lexical
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::High,
                false,
                true,
                "No token pattern matches at this position",
                "Remove or replace the offending character",
            ),
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::High,
                false,
                true,
                "Only an empty match is possible at this position",
                "Remove or replace the offending character",
            ),
            ErrorMetadata::new(
                "E022",
                "Lexical",
                Severity::Critical,
                false,
                true,
                "Token kind registered twice in the lexer table",
                "Register each token kind with exactly one automaton",
            ),
            ErrorMetadata::new(
                "E023",
                "Lexical",
                Severity::Medium,
                false,
                true,
                "Lexeme exceeds maximum length",
                "Shorten the numeric literal or whitespace run",
            ),
            ErrorMetadata::new(
                "E027",
                "Lexical",
                Severity::High,
                false,
                true,
                "Token count exceeds maximum",
                "Split the expression into smaller inputs",
            ),
            // Syntax
            ErrorMetadata::new(
                "E040",
                "Syntax",
                Severity::High,
                false,
                true,
                "Input ended where a literal or operator was required",
                "Complete the expression",
            ),
            ErrorMetadata::new(
                "E042",
                "Syntax",
                Severity::High,
                false,
                true,
                "Opening parenthesis is never closed",
                "Add the missing ')'",
            ),
            ErrorMetadata::new(
                "E044",
                "Syntax",
                Severity::High,
                false,
                true,
                "Tokens remain after a complete expression",
                "Insert an operator or remove the extra tokens",
            ),
            ErrorMetadata::new(
                "E045",
                "Syntax",
                Severity::High,
                false,
                true,
                "Numeric literal cannot be represented",
                "Check the number's digits",
            ),
            ErrorMetadata::new(
                "E050",
                "Syntax",
                Severity::High,
                false,
                true,
                "Token does not fit the grammar here",
                "Check operator placement and parentheses",
            ),
            ErrorMetadata::new(
                "E087",
                "Syntax",
                Severity::Critical,
                false,
                true,
                "Expression nests deeper than the parser allows",
                "Flatten the expression or rebuild with a larger parse depth",
            ),
            // Success
            ErrorMetadata::new(
                "I004",
                "Success",
                Severity::Low,
                true,
                false,
                "Logging system initialized",
                "No action required",
            ),
            ErrorMetadata::new(
                "I006",
                "Success",
                Severity::Low,
                true,
                false,
                "Source file read successfully",
                "No action required",
            ),
            ErrorMetadata::new(
                "I010",
                "Success",
                Severity::Low,
                true,
                false,
                "Lexer automaton table constructed",
                "No action required",
            ),
            ErrorMetadata::new(
                "I020",
                "Success",
                Severity::Low,
                true,
                false,
                "Tokenization completed",
                "No action required",
            ),
            ErrorMetadata::new(
                "I040",
                "Success",
                Severity::Low,
                true,
                false,
                "Expression tree constructed",
                "No action required",
            ),
            ErrorMetadata::new(
                "I090",
                "Success",
                Severity::Low,
                true,
                false,
                "Full compilation pipeline completed",
                "No action required",
            ),
        ];

        entries.into_iter().map(|meta| (meta.code, meta)).collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

/// Ensure every code in `codes` has registry metadata
pub fn ensure_registered(stage: &str, codes: &[Code]) -> Result<(), String> {
    for code in codes {
        if get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "{} code {} not found in metadata registry",
                stage,
                code.as_str()
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_code_metadata() {
        assert_eq!(get_category("E020"), "Lexical");
        assert_eq!(get_category("E018"), "Automaton");
        assert_eq!(get_severity("E087"), Severity::Critical);
        assert!(requires_halt("ERR001"));
        assert!(!requires_halt("I040"));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_category("E999"), "Unknown");
        assert_eq!(get_action("E999"), "No specific action available");
        assert!(is_recoverable("E999"));
    }

    #[test]
    fn test_ensure_registered() {
        assert!(ensure_registered("Syntax", &[syntax::TRAILING_TOKENS]).is_ok());
        let err = ensure_registered("Test", &[Code::new("E999")]).unwrap_err();
        assert!(err.contains("E999"));
    }

    #[test]
    fn test_code_display() {
        assert_eq!(lexical::NO_MATCHING_TOKEN.to_string(), "E020");
    }
}
