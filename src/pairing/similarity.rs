//! 64-bit perceptual hash comparison.

use std::fmt;
use std::str::FromStr;

/// Default Hamming threshold: 12 of 64 bits, roughly 81% similarity
pub const DEFAULT_SIMILARITY_THRESHOLD: u32 = 12;

/// Hex digits in a serialized hash
pub const HASH_HEX_LEN: usize = 16;

/// A 64-bit perceptual thumbnail hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PerceptualHash(u64);

impl PerceptualHash {
    /// Parse exactly sixteen hex digits; `None` for anything else
    pub fn parse(text: &str) -> Option<Self> {
        if text.len() != HASH_HEX_LEN || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u64::from_str_radix(text, 16).ok().map(Self)
    }

    pub fn bits(&self) -> u64 {
        self.0
    }

    /// Number of differing bits
    pub fn distance(&self, other: &PerceptualHash) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}

impl From<u64> for PerceptualHash {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl FromStr for PerceptualHash {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("not a {}-digit hex hash: {:?}", HASH_HEX_LEN, s))
    }
}

impl fmt::Display for PerceptualHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Hamming distance between two serialized hashes
///
/// `None` stands for an infinite distance: either hash is missing, the two
/// differ in length, or either is not sixteen hex digits. An infinite
/// distance never satisfies a similarity threshold.
pub fn hamming_distance(first: Option<&str>, second: Option<&str>) -> Option<u32> {
    let (first, second) = (first?, second?);
    if first.len() != second.len() {
        return None;
    }

    let a = PerceptualHash::parse(first)?;
    let b = PerceptualHash::parse(second)?;
    Some(a.distance(&b))
}

/// Whether two hashes are within `threshold` differing bits
pub fn are_similar(first: Option<&str>, second: Option<&str>, threshold: u32) -> bool {
    matches!(hamming_distance(first, second), Some(distance) if distance <= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "0000000000000000",
        "ffffffffffffffff",
        "FFFFFFFFFFFFFFFF",
        "8f3c0a1b2d4e6f70",
        "8f3c0a1b2d4e6f7f",
        "123456789abcdef0",
    ];

    #[test]
    fn test_identical_hashes() {
        for hash in SAMPLES {
            assert_eq!(hamming_distance(Some(hash), Some(hash)), Some(0));
        }
        assert_eq!(hamming_distance(Some("ffffffffffffffff"), Some("FFFFFFFFFFFFFFFF")), Some(0));
    }

    #[test]
    fn test_distance_counts_bits() {
        assert_eq!(hamming_distance(Some("0000000000000000"), Some("ffffffffffffffff")), Some(64));
        assert_eq!(hamming_distance(Some("0000000000000000"), Some("0000000000000001")), Some(1));
        assert_eq!(hamming_distance(Some("8f3c0a1b2d4e6f70"), Some("8f3c0a1b2d4e6f7f")), Some(4));
    }

    #[test]
    fn test_symmetry() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(hamming_distance(Some(a), Some(b)), hamming_distance(Some(b), Some(a)));
            }
        }
        assert_eq!(hamming_distance(None, Some("0000000000000000")), hamming_distance(Some("0000000000000000"), None));
    }

    #[test]
    fn test_invalid_hashes_are_infinitely_far() {
        let valid = Some("8f3c0a1b2d4e6f70");
        assert_eq!(hamming_distance(None, valid), None);
        assert_eq!(hamming_distance(valid, None), None);
        assert_eq!(hamming_distance(Some(""), Some("")), None);
        assert_eq!(hamming_distance(Some("8f3c0a1b"), Some("8f3c0a1b")), None);
        assert_eq!(hamming_distance(Some("8f3c0a1b2d4e6f70aa"), Some("8f3c0a1b2d4e6f70aa")), None);
        assert_eq!(hamming_distance(valid, Some("8f3c0a1b2d4e6f7")), None);
        assert_eq!(hamming_distance(valid, Some("zz3c0a1b2d4e6f70")), None);
        assert_eq!(hamming_distance(valid, Some("+f3c0a1b2d4e6f70")), None);
    }

    #[test]
    fn test_similarity_threshold() {
        // Twelve differing bits: three nibbles flipped from 0 to f
        let a = Some("0000000000000000");
        let b = Some("0000000000000fff");
        let c = Some("0000000000001fff");

        assert!(are_similar(a, b, DEFAULT_SIMILARITY_THRESHOLD));
        assert!(!are_similar(a, c, DEFAULT_SIMILARITY_THRESHOLD));
        assert!(are_similar(a, c, 13));
        assert!(!are_similar(a, None, 64));
        assert!(!are_similar(Some("bogus"), Some("bogus"), 64));
    }

    #[test]
    fn test_display_round_trip() {
        let hash: PerceptualHash = "8F3C0A1B2D4E6F70".parse().unwrap();
        assert_eq!(hash.to_string(), "8f3c0a1b2d4e6f70");
        assert_eq!(hash.bits(), 0x8f3c0a1b2d4e6f70);
        assert!("xyz".parse::<PerceptualHash>().is_err());
    }
}
