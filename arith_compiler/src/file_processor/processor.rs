//! File processor: path validation, size and line limits, UTF-8 decoding

use crate::config::compile_time::file_processing::{MAX_FILE_SIZE, MAX_LINE_COUNT};
use crate::logging::codes;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path} (byte {valid_up_to})")]
    InvalidEncoding { path: String, valid_up_to: usize },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            Self::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            Self::PermissionDenied { .. } => codes::file_processing::PERMISSION_DENIED,
            Self::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            Self::IoError { .. } => codes::file_processing::IO_ERROR,
            Self::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            Self::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> codes::Severity {
        codes::get_severity(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(error: std::io::Error, path: &Path) -> Self {
        match error.kind() {
            ErrorKind::NotFound => Self::FileNotFound {
                path: path.display().to_string(),
            },
            ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => Self::IoError {
                message: format!("'{}': {}", path.display(), error),
            },
        }
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    pub extension: Option<String>,
    pub line_count: usize,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// File contents with metadata
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Only whitespace; such a file lexes to an empty stream
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

/// Reads expression source files under the compile-time limits
#[derive(Debug, Clone)]
pub struct FileProcessor {
    /// Attach size and duration figures to the success event
    pub enable_performance_logging: bool,
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            enable_performance_logging: crate::logging::config::log_performance_events(),
        }
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Process a file and return contents with metadata
    pub fn process_file(
        &self,
        file_path: &str,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();

        log_debug!("Starting file processing", "file" => file_path);

        let result = self.validate_path(file_path).and_then(|path| {
            let metadata = self.get_metadata(&path)?;
            self.validate_size(&metadata)?;
            let source = self.read_source(&path)?;

            let line_count = source.lines().count();
            if line_count > MAX_LINE_COUNT {
                return Err(FileProcessorError::TooManyLines {
                    lines: line_count,
                    max_lines: MAX_LINE_COUNT,
                });
            }

            Ok(FileProcessingResult {
                source,
                metadata: FileMetadata {
                    line_count,
                    ..metadata
                },
                processing_duration: start_time.elapsed(),
            })
        });

        match &result {
            Ok(processed) => self.log_processing_success(processed, file_path),
            Err(error) => {
                log_error!(error.error_code(), &error.to_string(), "file" => file_path);
            }
        }

        result
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        if self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "duration_ms" => format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0)
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path,
                "lines" => result.metadata.line_count
            );
        }
    }

    fn validate_path(&self, file_path: &str) -> Result<PathBuf, FileProcessorError> {
        if file_path.trim().is_empty() {
            return Err(FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            });
        }

        let path = Path::new(file_path);

        if !path.exists() {
            return Err(FileProcessorError::FileNotFound {
                path: file_path.to_string(),
            });
        }

        if !path.is_file() {
            return Err(FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            });
        }

        let canonical = path
            .canonicalize()
            .map_err(|e| FileProcessorError::from_io(e, path))?;
        log_debug!("Path validation successful", "canonical_path" => canonical.display());
        Ok(canonical)
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| FileProcessorError::from_io(e, path))?;

        Ok(FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension: path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_lowercase),
            line_count: 0,
            modified: metadata.modified().ok(),
        })
    }

    fn validate_size(&self, metadata: &FileMetadata) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            return Err(FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            });
        }
        Ok(())
    }

    fn read_source(&self, path: &Path) -> Result<String, FileProcessorError> {
        let bytes = fs::read(path).map_err(|e| FileProcessorError::from_io(e, path))?;

        String::from_utf8(bytes).map_err(|e| FileProcessorError::InvalidEncoding {
            path: path.display().to_string(),
            valid_up_to: e.utf8_error().valid_up_to(),
        })
    }
}

/// Process a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{service, with_scoped_service};
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(contents: &[u8]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".arith").tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    fn path_of(file: &NamedTempFile) -> String {
        file.path().to_str().unwrap().to_string()
    }

    #[test]
    fn test_process_valid_file() {
        let file = temp_file(b"1 + 2\n* 3\n");
        let result = process_file(&path_of(&file)).unwrap();

        assert_eq!(result.source, "1 + 2\n* 3\n");
        assert_eq!(result.metadata.size, 10);
        assert_eq!(result.metadata.line_count, 2);
        assert_eq!(result.metadata.extension.as_deref(), Some("arith"));
        assert!(!result.is_effectively_empty());
        assert_eq!(result.char_count(), 10);
    }

    #[test]
    fn test_empty_file_is_accepted() {
        let file = temp_file(b"");
        let result = process_file(&path_of(&file)).unwrap();
        assert!(result.is_effectively_empty());
        assert_eq!(result.metadata.line_count, 0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.arith");

        let error = process_file(missing.to_str().unwrap()).unwrap_err();
        assert_matches!(error, FileProcessorError::FileNotFound { .. });
        assert_eq!(error.error_code().as_str(), "E005");
    }

    #[test]
    fn test_invalid_paths() {
        assert_matches!(process_file(""), Err(FileProcessorError::InvalidPath { .. }));

        let dir = tempfile::tempdir().unwrap();
        assert_matches!(
            process_file(dir.path().to_str().unwrap()),
            Err(FileProcessorError::InvalidPath { .. })
        );
    }

    #[test]
    fn test_invalid_encoding() {
        let file = temp_file(&[b'1', b'+', 0xff, 0xfe]);
        assert_matches!(
            process_file(&path_of(&file)),
            Err(FileProcessorError::InvalidEncoding { valid_up_to: 2, .. })
        );
    }

    #[test]
    fn test_size_limit() {
        let file = temp_file(&vec![b' '; MAX_FILE_SIZE as usize + 1]);
        assert_matches!(
            process_file(&path_of(&file)),
            Err(FileProcessorError::FileTooLarge { max_size, .. }) if max_size == MAX_FILE_SIZE
        );
    }

    #[test]
    fn test_line_limit() {
        let file = temp_file("1\n".repeat(MAX_LINE_COUNT + 1).as_bytes());
        let error = process_file(&path_of(&file)).unwrap_err();
        assert_matches!(error, FileProcessorError::TooManyLines { .. });
        assert_eq!(error.error_code(), codes::file_processing::TOO_MANY_LINES);
    }

    #[test]
    fn test_logs_success_and_failure() {
        let (logger, memory) = service::create_test_service();
        let file = temp_file(b"42");

        with_scoped_service(logger, || {
            FileProcessor::new()
                .with_performance_logging(true)
                .process_file(&path_of(&file))
                .unwrap();
            let _ = process_file("");
        });

        assert!(memory.has_success_with_code(codes::success::FILE_PROCESSING_SUCCESS));
        assert!(memory.has_error_with_code(codes::file_processing::INVALID_PATH));
    }

    #[test]
    fn test_human_readable_size() {
        let metadata = FileMetadata {
            path: PathBuf::from("/tmp/expr.arith"),
            size: 2048,
            extension: Some("arith".to_string()),
            line_count: 1,
            modified: None,
        };
        assert_eq!(metadata.human_readable_size(), "2.00 KB");
        assert_eq!(metadata.file_name(), "expr.arith");
    }
}
