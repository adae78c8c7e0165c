//! # dHash Core
//!
//! A 64-bit perceptual "difference hash" for near-duplicate image detection.
//!
//! ## Core Philosophy
//! - **Stable bit layout** - fingerprints from different builds stay comparable
//! - **No I/O** - callers decode images; the core only sees pixels
//! - **Parallel inside, blocking outside** - rows and cells fan out over
//!   rayon, but every call returns a finished fingerprint
//!
//! ## Architecture
//! - `core` - The fingerprinting engine
//! - `error` - Error types
//!
//! ## Example
//! ```rust,ignore
//! use dhash_core::{compute_fingerprint, hamming_distance};
//!
//! let a = compute_fingerprint(&image::open("a.jpg")?)?;
//! let b = compute_fingerprint(&image::open("b.jpg")?)?;
//! println!("{} bits differ", hamming_distance(a.value(), b.value()));
//! ```

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use crate::core::{
    compare_images, compute_fingerprint, hamming_distance, DifferenceHasher, DownsampleKind,
    Fingerprint, HasherConfig, MatchType, PixelSource,
};
pub use error::{FingerprintError, HashError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point, never by the
/// library itself. Filtering follows `RUST_LOG`.
pub fn init_tracing() -> std::result::Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}
