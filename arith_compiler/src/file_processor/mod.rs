//! File processor module with compile-time limits and global logging integration

mod processor;

use crate::config::compile_time::file_processing::{MAX_FILE_SIZE, MAX_LINE_COUNT};
pub use processor::{
    process_file, FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError,
};

/// Get the compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

pub fn get_max_line_count() -> usize {
    MAX_LINE_COUNT
}

/// Check that every file processing code is registered (for system startup)
pub fn init_file_processor_logging() -> Result<(), String> {
    use crate::logging::codes::{ensure_registered, file_processing};

    ensure_registered(
        "File processing",
        &[
            file_processing::FILE_NOT_FOUND,
            file_processing::FILE_TOO_LARGE,
            file_processing::PERMISSION_DENIED,
            file_processing::INVALID_ENCODING,
            file_processing::IO_ERROR,
            file_processing::INVALID_PATH,
            file_processing::TOO_MANY_LINES,
        ],
    )?;

    log_debug!("File processor limits initialized",
        "max_file_size" => MAX_FILE_SIZE,
        "max_line_count" => MAX_LINE_COUNT
    );

    Ok(())
}
