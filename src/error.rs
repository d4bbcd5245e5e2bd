//! Error types for xsvstream

use thiserror::Error;

/// Result type alias for xsvstream operations
pub type Result<T> = std::result::Result<T, XsvError>;

/// Errors that can occur while configuring or driving a parser
///
/// In the default permissive mode only configuration, state and I/O errors
/// are ever returned. The data errors (`InvalidUtf8`, `UnterminatedQuote`,
/// `DanglingEscape`) are raised only under [`Strictness::Strict`].
///
/// [`Strictness::Strict`]: crate::config::Strictness::Strict
#[derive(Error, Debug)]
pub enum XsvError {
    /// Configuration is not usable (e.g. quote byte equal to the separator)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Parser used after it finished or failed
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Field bytes are not valid UTF-8
    #[error("Invalid UTF-8 in field {field} on line {line}")]
    InvalidUtf8 {
        /// 1-based physical line the field ended on
        line: u64,
        /// 1-based field position within the row
        field: usize,
    },

    /// End of input reached inside a quoted field
    #[error("Unterminated quoted field at end of input (line {line})")]
    UnterminatedQuote {
        /// 1-based physical line the input ended on
        line: u64,
    },

    /// End of input reached right after an escape byte
    #[error("Escape byte without a following byte at end of input (line {line})")]
    DanglingEscape {
        /// 1-based physical line the input ended on
        line: u64,
    },

    /// Failed to read from the underlying source
    #[error("Read error: {0}")]
    ReadError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl XsvError {
    /// Whether this error was caused by malformed input data
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            XsvError::InvalidUtf8 { .. }
                | XsvError::UnterminatedQuote { .. }
                | XsvError::DanglingEscape { .. }
        )
    }
}
