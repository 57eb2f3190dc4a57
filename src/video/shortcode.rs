//! Platform short codes and link building.
//!
//! Instagram addresses a post by a short code that is its numeric media id
//! written in a 64-character url-safe alphabet. Exports usually carry only
//! the numeric id, so the short code has to be rebuilt before a permalink or
//! embed URL can be formed.

use crate::video::types::{Platform, Video};

/// Digit alphabet of platform short codes, value 0 first
pub const SHORTCODE_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Numeric ids shorter than this are not media ids
const MIN_NUMERIC_ID_DIGITS: usize = 10;

/// Encode a numeric media id as a short code, most significant digit first
pub fn encode_shortcode(mut value: u64) -> String {
    if value == 0 {
        return "A".to_string();
    }

    let mut digits = Vec::with_capacity(11);
    while value > 0 {
        digits.push(SHORTCODE_ALPHABET[(value % 64) as usize]);
        value /= 64;
    }
    digits.reverse();

    // Alphabet is ASCII
    digits.into_iter().map(char::from).collect()
}

/// Turn a raw platform id into its canonical short code
///
/// All-digit ids of at least ten digits are treated as 64-bit media ids and
/// re-encoded; an all-digit id whose value is zero short-circuits to `"A"`.
/// Anything else (already a short code, too short, or too large for 64 bits)
/// comes back unchanged.
pub fn resolve_platform_shortcode(raw_id: &str) -> String {
    if raw_id.is_empty() || !raw_id.bytes().all(|b| b.is_ascii_digit()) {
        return raw_id.to_string();
    }

    match raw_id.parse::<u64>() {
        Ok(0) => encode_shortcode(0),
        Ok(value) if raw_id.len() >= MIN_NUMERIC_ID_DIGITS => encode_shortcode(value),
        _ => raw_id.to_string(),
    }
}

impl Video {
    /// Short code used in links for this video
    ///
    /// Instagram ids are resolved through [`resolve_platform_shortcode`];
    /// TikTok links use the numeric id as is. Falls back to the record id
    /// when no platform id was exported.
    pub fn shortcode(&self) -> String {
        let raw = self
            .platform_id
            .clone()
            .unwrap_or_else(|| self.id.to_string());

        match self.platform {
            Platform::Instagram => resolve_platform_shortcode(&raw),
            Platform::TikTok => raw,
        }
    }

    /// Public permalink of the post
    pub fn permalink(&self) -> String {
        match self.platform {
            Platform::Instagram => format!("https://www.instagram.com/reel/{}/", self.shortcode()),
            Platform::TikTok => format!("https://www.tiktok.com/video/{}", self.shortcode()),
        }
    }

    /// URL suitable for an embedding iframe
    pub fn embed_url(&self) -> String {
        match self.platform {
            Platform::Instagram => format!("https://www.instagram.com/p/{}/embed", self.shortcode()),
            Platform::TikTok => format!("https://www.tiktok.com/embed/v2/{}", self.shortcode()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_resolves_to_first_digit() {
        assert_eq!(resolve_platform_shortcode("0"), "A");
        assert_eq!(resolve_platform_shortcode("0000000000"), "A");
        assert_eq!(encode_shortcode(0), "A");
    }

    #[test]
    fn test_small_values() {
        assert_eq!(encode_shortcode(1), "B");
        assert_eq!(encode_shortcode(63), "_");
        assert_eq!(encode_shortcode(64), "BA");
        assert_eq!(encode_shortcode(64 * 64 + 1), "BAB");
    }

    #[test]
    fn test_u64_max() {
        // 2^64 - 1 is sixteen 4-bit groups: one leading 4-bit digit then ten 6-bit digits
        assert_eq!(encode_shortcode(u64::MAX), "P__________");
        assert_eq!(resolve_platform_shortcode("18446744073709551615"), "P__________");
    }

    #[test]
    fn test_known_media_id() {
        // 1234567890 = 1*64^5 + 9*64^4 + 37*64^3 + 32*64^2 + 11*64 + 18
        assert_eq!(resolve_platform_shortcode("1234567890"), "BJlgLS");
    }

    #[test]
    fn test_numeric_ids_use_alphabet_only() {
        for raw in ["1234567890", "3141592653589793238", "9999999999", "2718281828459045"] {
            let code = resolve_platform_shortcode(raw);
            assert!(!code.is_empty());
            assert!(code.bytes().all(|b| SHORTCODE_ALPHABET.contains(&b)), "{}", code);
            assert_eq!(code, resolve_platform_shortcode(raw));
        }
    }

    #[test]
    fn test_non_numeric_ids_pass_through() {
        assert_eq!(resolve_platform_shortcode("CxYz-_12"), "CxYz-_12");
        assert_eq!(resolve_platform_shortcode("123456789"), "123456789");
        assert_eq!(resolve_platform_shortcode(""), "");
        assert_eq!(resolve_platform_shortcode("99999999999999999999"), "99999999999999999999");
    }

    #[test]
    fn test_links() {
        let reel = Video::new(7, Platform::Instagram).with_platform_id("1234567890");
        assert_eq!(reel.permalink(), "https://www.instagram.com/reel/BJlgLS/");
        assert_eq!(reel.embed_url(), "https://www.instagram.com/p/BJlgLS/embed");

        let clip = Video::new(7312345678901234567, Platform::TikTok);
        assert_eq!(clip.embed_url(), "https://www.tiktok.com/embed/v2/7312345678901234567");
        assert_eq!(clip.permalink(), "https://www.tiktok.com/video/7312345678901234567");
    }
}
