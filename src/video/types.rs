use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::pairing::window::{parse_timestamp, RawTimestamp};

/// Platform a video was published on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    TikTok,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instagram" | "ig" => Ok(Platform::Instagram),
            "tiktok" | "tt" => Ok(Platform::TikTok),
            other => Err(format!("unknown platform: {}", other)),
        }
    }
}

/// A video record as exported by the data layer
///
/// Exports disagree on field names, so every known spelling is kept as its
/// own field and [`RawVideo::resolve`] picks one per concern.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideo {
    pub id: u64,
    pub platform: String,

    pub timestamp: Option<RawTimestamp>,
    #[serde(rename = "postedAt")]
    pub posted_at_camel: Option<RawTimestamp>,
    pub posted_at: Option<RawTimestamp>,

    #[serde(default, deserialize_with = "lenient_seconds")]
    pub duration: Option<f64>,
    pub caption: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub views: Option<u64>,

    #[serde(rename = "thumbnailHash")]
    pub thumbnail_hash_camel: Option<String>,
    pub thumbnail_hash: Option<String>,
    pub phash: Option<String>,

    #[serde(rename = "platformId")]
    pub platform_id_camel: Option<String>,
    pub platform_id: Option<String>,
    pub shortcode: Option<String>,
}

impl RawVideo {
    /// Resolve alternate field names into a [`Video`]
    ///
    /// Precedence, first present wins:
    /// - posting time: `timestamp`, `postedAt`, `posted_at`
    /// - thumbnail hash: `thumbnailHash`, `thumbnail_hash`, `phash`
    /// - platform id: `platformId`, `platform_id`, `shortcode`
    ///
    /// Blank strings count as absent. Returns `None` only for an unknown
    /// platform.
    pub fn resolve(self) -> Option<Video> {
        let platform = self.platform.parse::<Platform>().ok()?;

        let posted_at = first_timestamp([self.timestamp, self.posted_at_camel, self.posted_at])
            .and_then(|raw| parse_timestamp(&raw));

        Some(Video {
            id: self.id,
            platform,
            posted_at,
            duration: self.duration.filter(|d| d.is_finite()),
            caption: non_blank(self.caption),
            thumbnail_hash: first_text([
                self.thumbnail_hash_camel,
                self.thumbnail_hash,
                self.phash,
            ]),
            views: self.views,
            platform_id: first_text([self.platform_id_camel, self.platform_id, self.shortcode]),
        })
    }
}

/// Any finite number, or a numeric string; other shapes read as absent
fn lenient_seconds<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

/// Non-negative integer counts; fractions are truncated toward zero
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let as_count = |n: f64| (n.is_finite() && n >= 0.0).then(|| n.trunc() as u64);
    Ok(value.and_then(|value| match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(as_count)),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(as_count),
        _ => None,
    }))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn first_text<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().find_map(non_blank)
}

fn first_timestamp<const N: usize>(candidates: [Option<RawTimestamp>; N]) -> Option<RawTimestamp> {
    candidates.into_iter().flatten().find(|raw| match raw {
        RawTimestamp::Text(text) => !text.trim().is_empty(),
        _ => true,
    })
}

/// A resolved video record, ready for pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: u64,
    pub platform: Platform,

    /// Posting time; `None` when missing or unparseable
    pub posted_at: Option<DateTime<Utc>>,

    /// Length in seconds
    pub duration: Option<f64>,

    pub caption: Option<String>,

    /// 16 hex digit perceptual hash of the thumbnail
    pub thumbnail_hash: Option<String>,

    pub views: Option<u64>,

    /// The platform's own identifier (numeric media id or short code)
    pub platform_id: Option<String>,
}

impl Video {
    /// Create a bare record with every optional field empty
    pub fn new(id: u64, platform: Platform) -> Self {
        Self {
            id,
            platform,
            posted_at: None,
            duration: None,
            caption: None,
            thumbnail_hash: None,
            views: None,
            platform_id: None,
        }
    }

    pub fn with_posted_at(mut self, posted_at: DateTime<Utc>) -> Self {
        self.posted_at = Some(posted_at);
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_caption<S: Into<String>>(mut self, caption: S) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_thumbnail_hash<S: Into<String>>(mut self, hash: S) -> Self {
        self.thumbnail_hash = Some(hash.into());
        self
    }

    pub fn with_views(mut self, views: u64) -> Self {
        self.views = Some(views);
        self
    }

    pub fn with_platform_id<S: Into<String>>(mut self, platform_id: S) -> Self {
        self.platform_id = Some(platform_id.into());
        self
    }

    /// View count, missing counts as zero
    pub fn view_count(&self) -> u64 {
        self.views.unwrap_or(0)
    }
}

/// How the two halves of a row were matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Duration,
    Thumbnail,
    /// Only one platform present
    #[serde(rename = "none")]
    Unmatched,
}

/// One dashboard row: a cross-platform pair or a single unmatched video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairedVideoRow {
    pub id: String,
    pub date: DateTime<Utc>,
    pub caption: String,
    pub instagram_video: Option<Video>,
    pub tiktok_video: Option<Video>,
    pub match_type: MatchType,
    pub winner_platform: Option<Platform>,
}

impl PairedVideoRow {
    /// Whether both platforms are present
    pub fn is_matched(&self) -> bool {
        self.instagram_video.is_some() && self.tiktok_video.is_some()
    }

    /// Combined views of both halves
    pub fn total_views(&self) -> u64 {
        self.instagram_video.iter()
            .chain(self.tiktok_video.iter())
            .map(Video::view_count)
            .sum()
    }
}
