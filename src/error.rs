//! Error types for csvtable
//!
//! The tokenizer itself never fails. Errors only come from the surfaces
//! around it: loading files, unpacking archives and validating a dialect.

use thiserror::Error;

/// Result type alias for csvtable operations
pub type Result<T> = std::result::Result<T, CsvTableError>;

/// Errors raised outside the parse loop
#[derive(Error, Debug)]
pub enum CsvTableError {
    /// Underlying I/O failure (opening or reading a plain file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure while opening or reading a compressed archive
    #[error("Read error: {0}")]
    ReadError(String),

    /// Dialect options that cannot produce a meaningful parse
    #[error("Invalid dialect: {0}")]
    InvalidDialect(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CsvTableError::InvalidDialect("delimiter equals quote".to_string());
        assert_eq!(err.to_string(), "Invalid dialect: delimiter equals quote");
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CsvTableError = io.into();
        assert!(matches!(err, CsvTableError::Io(_)));
    }
}
