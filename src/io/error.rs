//! Custom error types for the I/O module.

use std::path::PathBuf;
use thiserror::Error;

use crate::io::OpenMode;

#[derive(Error, Debug)]
pub enum OpenError {
    #[error("No regular file exists at {}.", .path.display())]
    NotFound { path: PathBuf },

    #[error("Open mode {mode:?} is not supported; only read-existing mappings are allowed.")]
    UnsupportedMode { mode: OpenMode },

    #[error("Mapping {} failed: {reason}", .path.display())]
    Map { path: PathBuf, reason: String },

    #[error("Acquiring {location} failed: {reason}")]
    Acquisition { location: String, reason: String },

    #[error("An underlying I/O error occurred.")]
    StdIo(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OpenError>;
