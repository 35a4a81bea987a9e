//! Error types for the bring-up server.

use sai_hal::SaiError;
use thiserror::Error;

/// Errors that terminate bring-up.
#[derive(Error, Debug)]
pub enum ServerError {
    /// A configuration file could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The hardware abstraction layer reported a non-success status.
    #[error("HAL error: {0}")]
    Hal(#[from] SaiError),

    /// The RPC endpoint could not be started.
    #[error("RPC endpoint error: {0}")]
    Rpc(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ServerError::Config("failed to open profile map".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: failed to open profile map"
        );
    }

    #[test]
    fn test_hal_error_conversion() {
        let err: ServerError = SaiError::Uninitialized.into();
        assert!(matches!(err, ServerError::Hal(_)));
        assert_eq!(err.to_string(), "HAL error: SAI not initialized");
    }
}
