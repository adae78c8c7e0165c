//! The 64-bit fingerprint value.

use crate::error::FingerprintError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A 64-bit difference hash.
///
/// Bit `i = y * 8 + x` (bit 0 is the least significant) is set when grid
/// cell `(x, y)` is strictly brighter than cell `(x + 1, y)`. Fingerprints
/// from any build using this layout are comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Total number of bits in a fingerprint
    pub const BITS: u32 = 64;

    /// Wrap a raw hash value
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// The raw hash value
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Whether bit `index` is set; panics if `index >= 64`
    pub fn bit(&self, index: u32) -> bool {
        assert!(index < Self::BITS, "bit index {index} out of range");
        (self.0 >> index) & 1 == 1
    }

    /// Compute the Hamming distance to another fingerprint
    ///
    /// Returns the number of bits that differ, in `[0, 64]`.
    /// Lower distance = more similar images.
    pub fn distance(&self, other: &Self) -> u32 {
        hamming_distance(self.0, other.0)
    }

    /// Calculate similarity as a percentage (0-100)
    pub fn similarity(&self, other: &Self) -> f64 {
        (1.0 - f64::from(self.distance(other)) / f64::from(Self::BITS)) * 100.0
    }

    /// Get the hash as 16 lowercase hexadecimal digits
    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.0)
    }

    /// Parse a hash from 1 to 16 hexadecimal digits
    pub fn from_hex(hex: &str) -> Result<Self, FingerprintError> {
        if hex.is_empty() || hex.len() > 16 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FingerprintError::InvalidFingerprint(hex.to_string()));
        }
        u64::from_str_radix(hex, 16)
            .map(Self)
            .map_err(|_| FingerprintError::InvalidFingerprint(hex.to_string()))
    }
}

/// Count the bit positions where `a` and `b` differ
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<u64> for Fingerprint {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<Fingerprint> for u64 {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let hash = Fingerprint::new(0xFF00_AA55_1234_5678);
        assert_eq!(hash.distance(&hash), 0);
    }

    #[test]
    fn distance_is_symmetric() {
        let hash_a = Fingerprint::new(0xFF00);
        let hash_b = Fingerprint::new(0x00FF);
        assert_eq!(hash_a.distance(&hash_b), hash_b.distance(&hash_a));
    }

    #[test]
    fn distance_counts_differing_bits() {
        assert_eq!(hamming_distance(0b1111_1111, 0), 8);
        assert_eq!(hamming_distance(u64::MAX, 0), 64);
        assert_eq!(hamming_distance(0b1010, 0b0110), 2);
    }

    #[test]
    fn similarity_bounds() {
        let hash = Fingerprint::new(0xDEAD_BEEF);
        assert_eq!(hash.similarity(&hash), 100.0);
        assert_eq!(Fingerprint::new(0).similarity(&Fingerprint::new(u64::MAX)), 0.0);
    }

    #[test]
    fn bit_zero_is_least_significant() {
        let hash = Fingerprint::new(0b101);
        assert!(hash.bit(0));
        assert!(!hash.bit(1));
        assert!(hash.bit(2));
        assert!(!hash.bit(63));
    }

    #[test]
    fn hex_is_zero_padded() {
        let hash = Fingerprint::new(0xBEEF);
        assert_eq!(hash.to_hex(), "000000000000beef");
        assert_eq!(hash.to_string(), "000000000000beef");
    }

    #[test]
    fn parses_hex() {
        let hash: Fingerprint = "007f00ff00ff00ff".parse().unwrap();
        assert_eq!(hash.value(), 0x007F_00FF_00FF_00FF);
        assert_eq!(Fingerprint::from_hex(&hash.to_hex()).unwrap(), hash);
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(Fingerprint::from_hex("").is_err());
        assert!(Fingerprint::from_hex("xyz").is_err());
        assert!(Fingerprint::from_hex("00000000000000000").is_err());
        assert!(Fingerprint::from_hex("+ff").is_err());
        assert!(Fingerprint::from_hex("-1").is_err());
    }

    #[test]
    fn converts_to_and_from_u64() {
        let hash = Fingerprint::from(42u64);
        assert_eq!(u64::from(hash), 42);
    }
}
