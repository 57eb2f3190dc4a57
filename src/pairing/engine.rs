use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    config::PairingConfig,
    pairing::{
        similarity::are_similar,
        window::{abs_millis_between, is_within_window},
    },
    video::types::{MatchType, PairedVideoRow, Platform, Video},
};

/// Caption shown when a video has none
pub const NO_CAPTION: &str = "No caption";

/// TikTok videos already paired during one pairing run
///
/// Created fresh for every call to [`PairingEngine::pair`] and handed to each
/// matching step explicitly.
#[derive(Debug, Default)]
pub struct ClaimSet {
    claimed: HashSet<u64>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed(&self, id: u64) -> bool {
        self.claimed.contains(&id)
    }

    /// Claim an id; returns false if it was already taken
    pub fn claim(&mut self, id: u64) -> bool {
        self.claimed.insert(id)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

/// Best duration candidate seen so far in a scan
struct DurationCandidate<'a> {
    video: &'a Video,
    duration_diff: f64,
    time_diff: i64,
}

/// Pairs Instagram posts with their TikTok reposts
///
/// Pairing runs in two passes per Instagram video:
/// 1. Duration - the unclaimed TikTok in the time window with the closest
///    duration (ties broken by closest posting time), within tolerance
/// 2. Thumbnail - failing that, the first unclaimed TikTok in the window whose
///    thumbnail hash is similar
///
/// Instagram rows come first in input order, followed by unclaimed TikTok
/// videos in input order. Rows are not sorted by date.
#[derive(Debug, Clone, Default)]
pub struct PairingEngine {
    config: PairingConfig,
}

impl PairingEngine {
    /// Create a new engine with the given matching heuristics
    pub fn new(config: PairingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PairingConfig {
        &self.config
    }

    /// Pair a mixed list of videos
    pub fn pair(&self, videos: &[Video]) -> Vec<PairedVideoRow> {
        self.pair_at(videos, Utc::now())
    }

    /// Pair a mixed list of videos, dating undated TikTok-only rows at `now`
    pub fn pair_at(&self, videos: &[Video], now: DateTime<Utc>) -> Vec<PairedVideoRow> {
        let (instagram, tiktok): (Vec<&Video>, Vec<&Video>) = videos
            .iter()
            .partition(|video| video.platform == Platform::Instagram);

        debug!("Pairing {} Instagram against {} TikTok videos", instagram.len(), tiktok.len());

        let mut claims = ClaimSet::new();
        let mut rows = Vec::with_capacity(instagram.len() + tiktok.len());

        for ig in &instagram {
            if let Some(row) = self.pair_instagram(ig, &tiktok, &mut claims) {
                rows.push(row);
            }
        }

        let leftover = tiktok.iter().filter(|tt| !claims.is_claimed(tt.id));
        for tt in leftover {
            rows.push(Self::tiktok_only_row(tt, now));
        }

        info!("Paired {} rows ({} TikTok videos claimed)", rows.len(), claims.len());
        rows
    }

    /// Build the row for one Instagram video, claiming its TikTok match
    fn pair_instagram(
        &self,
        ig: &Video,
        tiktok: &[&Video],
        claims: &mut ClaimSet,
    ) -> Option<PairedVideoRow> {
        let Some(date) = ig.posted_at else {
            debug!("Skipping Instagram video {}: no usable posting time", ig.id);
            return None;
        };

        let matched = self
            .find_duration_match(ig, tiktok, claims)
            .map(|tt| (tt, MatchType::Duration))
            .or_else(|| {
                self.find_thumbnail_match(ig, tiktok, claims)
                    .map(|tt| (tt, MatchType::Thumbnail))
            });

        let (tiktok_video, match_type, winner) = match matched {
            Some((tt, match_type)) => {
                let newly_claimed = claims.claim(tt.id);
                debug_assert!(newly_claimed, "TikTok {} matched twice", tt.id);
                let winner = if ig.view_count() >= tt.view_count() {
                    Platform::Instagram
                } else {
                    Platform::TikTok
                };
                debug!("Instagram {} <-> TikTok {} by {:?}, winner {}", ig.id, tt.id, match_type, winner);
                (Some(tt.clone()), match_type, winner)
            }
            None => (None, MatchType::Unmatched, Platform::Instagram),
        };

        Some(PairedVideoRow {
            id: format!("pair-{}", ig.id),
            date,
            caption: ig.caption.clone().unwrap_or_else(|| NO_CAPTION.to_string()),
            instagram_video: Some(ig.clone()),
            tiktok_video,
            match_type,
            winner_platform: Some(winner),
        })
    }

    /// Closest duration within tolerance, ties broken by closest posting time
    ///
    /// A later candidate replaces the running best only on strict improvement,
    /// so among equals the first encountered wins.
    fn find_duration_match<'a>(
        &self,
        ig: &Video,
        tiktok: &[&'a Video],
        claims: &ClaimSet,
    ) -> Option<&'a Video> {
        let ig_duration = ig.duration?;
        let ig_date = ig.posted_at?;

        let mut best: Option<DurationCandidate<'a>> = None;

        for tt in self.candidates(ig, tiktok, claims) {
            let (Some(tt_duration), Some(tt_date)) = (tt.duration, tt.posted_at) else {
                continue;
            };

            // NaN or infinite durations never qualify
            let duration_diff = (ig_duration - tt_duration).abs();
            if !duration_diff.is_finite() || duration_diff > self.config.max_duration_diff_secs {
                continue;
            }
            let time_diff = abs_millis_between(ig_date, tt_date);

            let improves = match &best {
                None => true,
                Some(current) => {
                    duration_diff < current.duration_diff
                        || (duration_diff == current.duration_diff && time_diff < current.time_diff)
                }
            };
            if improves {
                best = Some(DurationCandidate { video: tt, duration_diff, time_diff });
            }
        }

        best.map(|candidate| candidate.video)
    }

    /// First similar thumbnail in the window
    fn find_thumbnail_match<'a>(
        &self,
        ig: &Video,
        tiktok: &[&'a Video],
        claims: &ClaimSet,
    ) -> Option<&'a Video> {
        let ig_hash = ig.thumbnail_hash.as_deref()?;

        self.candidates(ig, tiktok, claims).find(|tt| {
            are_similar(Some(ig_hash), tt.thumbnail_hash.as_deref(), self.config.similarity_threshold)
        })
    }

    /// Unclaimed TikTok videos posted within the window of `ig`
    fn candidates<'a, 'b>(
        &'b self,
        ig: &'b Video,
        tiktok: &'b [&'a Video],
        claims: &'b ClaimSet,
    ) -> impl Iterator<Item = &'a Video> + 'b
    where
        'a: 'b,
    {
        tiktok.iter().copied().filter(move |tt| {
            !claims.is_claimed(tt.id)
                && is_within_window(ig.posted_at, tt.posted_at, self.config.window_hours)
        })
    }

    fn tiktok_only_row(tt: &Video, now: DateTime<Utc>) -> PairedVideoRow {
        let date = tt.posted_at.unwrap_or_else(|| {
            debug!("TikTok video {} has no usable posting time, dating it now", tt.id);
            now
        });

        PairedVideoRow {
            id: format!("pair-{}", tt.id),
            date,
            caption: tt.caption.clone().unwrap_or_else(|| NO_CAPTION.to_string()),
            instagram_video: None,
            tiktok_video: Some(tt.clone()),
            match_type: MatchType::Unmatched,
            winner_platform: Some(Platform::TikTok),
        }
    }
}

/// Pair videos with the default heuristics
pub fn pair_videos(videos: &[Video]) -> Vec<PairedVideoRow> {
    PairingEngine::default().pair(videos)
}
