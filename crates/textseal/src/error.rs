//! Error types for textseal

use thiserror::Error;

/// Result type alias for textseal operations
pub type Result<T> = std::result::Result<T, SealError>;

/// Coarse classification of a [`SealError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An argument was not valid text or key material was rejected on import
    InputValidation,
    /// Envelope text was not valid Base64, or plaintext was not valid UTF-8
    Encoding,
    /// The AEAD operation failed: wrong key, tampered or truncated envelope
    CryptoOperation,
    /// Settings could not be read or parsed
    Configuration,
}

/// textseal error types
#[derive(Error, Debug)]
pub enum SealError {
    #[error("Invalid input: {0}")]
    InputValidation(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Crypto operation failed: {0}")]
    CryptoOperation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SealError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InputValidation(_) => ErrorKind::InputValidation,
            Self::Encoding(_) => ErrorKind::Encoding,
            Self::CryptoOperation(_) => ErrorKind::CryptoOperation,
            Self::Config(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorKind::Configuration
            }
        }
    }

    /// Check if this is an input validation error
    pub fn is_input_validation(&self) -> bool {
        self.kind() == ErrorKind::InputValidation
    }

    /// Check if this is an encoding error
    pub fn is_encoding(&self) -> bool {
        self.kind() == ErrorKind::Encoding
    }

    /// Check if the AEAD layer rejected the operation.
    ///
    /// On decryption this means tampering, corruption or the wrong key.
    pub fn is_crypto_failure(&self) -> bool {
        self.kind() == ErrorKind::CryptoOperation
    }
}
