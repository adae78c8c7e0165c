//! # Core Module
//!
//! The fingerprinting engine.
//!
//! ## Modules
//! - `source` - Pixel source abstraction over decoded images
//! - `hasher` - Grayscale, downsample and encode stages
//! - `comparator` - Hamming distance and match classification

pub mod comparator;
pub mod hasher;
pub mod source;

// Re-export commonly used types
pub use comparator::{compare_images, MatchType};
pub use hasher::{
    compute_fingerprint, hamming_distance, DifferenceHasher, DownsampleKind, Fingerprint,
    HasherConfig,
};
pub use source::{Bounds, PixelSource, YCbCrImage};
