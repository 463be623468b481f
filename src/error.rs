//! Error types for PQChain

use crate::blockchain::BlockRejection;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ChainError {
    #[error("Unsupported algorithm: family {family}, variant {variant}")]
    UnsupportedAlgorithm { family: String, variant: String },

    #[error("No signature oracle available for {0}")]
    OracleUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{algorithm} secret key must be {expected} bytes, got {actual}")]
    SecretKeySize {
        algorithm: String,
        expected: usize,
        actual: usize,
    },

    #[error("Signature oracle failure: {0}")]
    OracleFailure(String),

    #[error("Wallet error: {0}")]
    WalletError(String),

    #[error("Invalid block: {0}")]
    InvalidBlock(#[from] BlockRejection),

    #[error("Self-check failed: {0}")]
    SelfCheckFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl ChainError {
    /// True for errors raised while building a backend or loading configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ChainError::UnsupportedAlgorithm { .. }
                | ChainError::OracleUnavailable(_)
                | ChainError::ConfigError(_)
        )
    }
}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::IoError(format!("JSON encoding failed: {}", err))
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
