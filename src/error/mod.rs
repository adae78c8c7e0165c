//! # Error Module
//!
//! Error types for fingerprint computation.
//!
//! ## Design Principles
//! - **Never panic** on caller data - return errors instead
//! - **Include context** - image dimensions, what went wrong
//! - The core does no I/O; decode and filesystem errors belong to the caller

use thiserror::Error;

/// Top-level library error
#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid fingerprint: {0:?} (expected 1-16 hex digits)")]
    InvalidFingerprint(String),
}

/// Errors that occur while computing a fingerprint
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Image is {width}x{height}, smaller than the 9x8 sampling grid")]
    ImageTooSmall { width: u32, height: u32 },

    #[error("Resampling failed: {0}")]
    Resample(String),

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),
}

impl From<rayon::ThreadPoolBuildError> for HashError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        HashError::WorkerPool(err.to_string())
    }
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, FingerprintError>;
