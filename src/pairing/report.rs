//! Summaries and orderings over paired rows.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::{
    pairing::window::date_key,
    video::types::{MatchType, PairedVideoRow, Platform, Video},
};

/// Aggregate counts over one pairing run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PairingSummary {
    pub total_rows: usize,
    pub matched_by_duration: usize,
    pub matched_by_thumbnail: usize,
    pub instagram_only: usize,
    pub tiktok_only: usize,
    pub instagram_wins: usize,
    pub tiktok_wins: usize,
    /// Instagram videos dropped for lacking a usable posting time
    pub skipped_instagram: usize,
}

impl PairingSummary {
    /// Count the rows produced from `videos`
    pub fn compute(videos: &[Video], rows: &[PairedVideoRow]) -> Self {
        let mut summary = Self {
            total_rows: rows.len(),
            ..Self::default()
        };

        for row in rows {
            match row.match_type {
                MatchType::Duration => summary.matched_by_duration += 1,
                MatchType::Thumbnail => summary.matched_by_thumbnail += 1,
                MatchType::Unmatched if row.instagram_video.is_some() => summary.instagram_only += 1,
                MatchType::Unmatched => summary.tiktok_only += 1,
            }

            match row.winner_platform {
                Some(Platform::Instagram) => summary.instagram_wins += 1,
                Some(Platform::TikTok) => summary.tiktok_wins += 1,
                None => {}
            }
        }

        let instagram_inputs = videos
            .iter()
            .filter(|video| video.platform == Platform::Instagram)
            .count();
        let instagram_rows = rows.iter().filter(|row| row.instagram_video.is_some()).count();
        summary.skipped_instagram = instagram_inputs.saturating_sub(instagram_rows);

        summary
    }

    /// Rows holding a cross-platform pair
    pub fn matched(&self) -> usize {
        self.matched_by_duration + self.matched_by_thumbnail
    }
}

impl fmt::Display for PairingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows: {} paired ({} by duration, {} by thumbnail), {} Instagram-only, {} TikTok-only; \
             wins Instagram {} / TikTok {}; {} Instagram skipped",
            self.total_rows,
            self.matched(),
            self.matched_by_duration,
            self.matched_by_thumbnail,
            self.instagram_only,
            self.tiktok_only,
            self.instagram_wins,
            self.tiktok_wins,
            self.skipped_instagram,
        )
    }
}

/// Sort rows by date, keeping input order among equal dates
pub fn sort_rows_by_date(rows: &mut [PairedVideoRow], newest_first: bool) {
    if newest_first {
        rows.sort_by(|a, b| b.date.cmp(&a.date));
    } else {
        rows.sort_by(|a, b| a.date.cmp(&b.date));
    }
}

/// Group rows under their UTC day key
pub fn group_rows_by_day(rows: &[PairedVideoRow]) -> BTreeMap<String, Vec<&PairedVideoRow>> {
    let mut groups: BTreeMap<String, Vec<&PairedVideoRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(date_key(Some(row.date))).or_default().push(row);
    }
    groups
}
