//! Error types for memsight.
//!
//! Open and acquisition failures carry their own `OpenError` taxonomy; this
//! module wraps it together with configuration and serialization failures.

use crate::io::error::OpenError;
use thiserror::Error;

/// Main error type for memsight operations.
#[derive(Debug, Error)]
pub enum MemsightError {
    /// Opening, mapping or staging a file failed
    #[error(transparent)]
    Open(#[from] OpenError),

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for memsight operations
pub type Result<T> = std::result::Result<T, MemsightError>;
