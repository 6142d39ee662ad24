//! Error types for reliefmesh

use thiserror::Error;

/// reliefmesh error types
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File load error
    #[error("File load error: {0}")]
    FileLoad(String),

    /// File save error
    #[error("File save error: {0}")]
    FileSave(String),

    /// Operation failed
    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type alias for reliefmesh operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("scale out of range".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: scale out of range");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::from(io);
        assert!(matches!(err, Error::Io(_)));
    }
}
