//! # Comparator Module
//!
//! Measures how similar two images are from their fingerprints.
//!
//! ## Comparison Thresholds
//! | Distance | Classification |
//! |----------|---------------|
//! | 0        | Exact match   |
//! | 1-4      | Near-exact    |
//! | 5-10     | Similar       |
//! | 11+      | Different     |
//!
//! Storing and indexing fingerprints is left to the caller.

use crate::core::hasher::{DifferenceHasher, Fingerprint};
use crate::core::source::PixelSource;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

pub use crate::core::hasher::hamming_distance;

/// Bucket a Hamming distance falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    /// No bits differ
    Exact,
    /// At most 4 bits differ; typical of re-encodes and rescales
    NearExact,
    /// 5 to 10 bits differ
    Similar,
    /// More than 10 bits differ; not a duplicate
    Different,
}

impl MatchType {
    /// Bucket a distance in `[0, 64]`
    pub fn from_distance(distance: u32) -> Self {
        match distance {
            0 => MatchType::Exact,
            1..=4 => MatchType::NearExact,
            5..=10 => MatchType::Similar,
            _ => MatchType::Different,
        }
    }

    /// Bucket the distance between two fingerprints
    pub fn between(a: &Fingerprint, b: &Fingerprint) -> Self {
        Self::from_distance(a.distance(b))
    }

    /// Every bucket except `Different` counts as a duplicate
    pub fn is_duplicate(&self) -> bool {
        !matches!(self, MatchType::Different)
    }

    /// Largest distance that still lands in this bucket
    pub fn max_distance(&self) -> u32 {
        match self {
            MatchType::Exact => 0,
            MatchType::NearExact => 4,
            MatchType::Similar => 10,
            MatchType::Different => Fingerprint::BITS,
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MatchType::Exact => "exact",
            MatchType::NearExact => "near-exact",
            MatchType::Similar => "similar",
            MatchType::Different => "different",
        };
        f.write_str(label)
    }
}

/// Hash two images with `hasher` and return the Hamming distance between them
pub fn compare_images<A, B>(hasher: &DifferenceHasher, a: &A, b: &B) -> Result<u32>
where
    A: PixelSource + ?Sized,
    B: PixelSource + ?Sized,
{
    let start = Instant::now();
    let hash_a = hasher.hash(a)?;
    let first_ms = start.elapsed().as_millis() as u64;

    let start = Instant::now();
    let hash_b = hasher.hash(b)?;
    let second_ms = start.elapsed().as_millis() as u64;

    let distance = hash_a.distance(&hash_b);
    debug!(first_ms, second_ms, distance, "Images compared");

    Ok(distance)
}
