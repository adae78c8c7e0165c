//! Trait definitions for grid downsampling.

use super::grid::DownsampleGrid;
use super::luminance::GrayPlane;
use crate::error::HashError;
use serde::{Deserialize, Serialize};

/// Available downsampling strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownsampleKind {
    /// Mean of fixed-stride blocks - self-contained, parallel per cell
    #[default]
    BlockAverage,
    /// Lanczos3 resize to 9x8 - higher fidelity, delegated to fast_image_resize
    Lanczos,
}

impl DownsampleKind {
    /// Get a human-readable description of the strategy
    pub fn description(&self) -> &'static str {
        match self {
            DownsampleKind::BlockAverage => {
                "Block averaging - mean luminance of 72 fixed-stride blocks"
            }
            DownsampleKind::Lanczos => {
                "Lanczos3 resampling - convolution resize of the whole plane to 9x8"
            }
        }
    }
}

impl std::fmt::Display for DownsampleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DownsampleKind::BlockAverage => write!(f, "block-average"),
            DownsampleKind::Lanczos => write!(f, "lanczos3"),
        }
    }
}

/// Reduces a grayscale plane to the 9x8 hashing grid.
///
/// Implementations must be deterministic: the same plane always yields the
/// same grid.
pub trait Downsampler: Send + Sync {
    /// Downsample a fully populated plane
    fn downsample(&self, plane: &GrayPlane) -> Result<DownsampleGrid, HashError>;

    /// Get the strategy kind
    fn kind(&self) -> DownsampleKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_block_average() {
        assert_eq!(DownsampleKind::default(), DownsampleKind::BlockAverage);
    }

    #[test]
    fn kind_display() {
        assert_eq!(DownsampleKind::BlockAverage.to_string(), "block-average");
        assert_eq!(DownsampleKind::Lanczos.to_string(), "lanczos3");
    }

    #[test]
    fn kind_descriptions_differ() {
        assert_ne!(
            DownsampleKind::BlockAverage.description(),
            DownsampleKind::Lanczos.description()
        );
    }
}
