//! # Video-Pairing
//!
//! Pair a creator's Instagram posts with their TikTok reposts and decide which
//! platform performed better.
//!
//! Videos are matched inside a time window, first by near-identical duration
//! and then by perceptual thumbnail hash. Every input video ends up in exactly
//! one row, either as half of a pair or on its own.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use video_pairing::{PairingEngine, VideoLoader, Config};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let videos = VideoLoader::load("videos.json")?;
//!
//! let engine = PairingEngine::new(config.pairing);
//! for row in engine.pair(&videos) {
//!     println!("{} {:?} -> {:?}", row.id, row.match_type, row.winner_platform);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`video`] - Record types, export loading, short codes and links
//! - [`pairing`] - Time windows, hash similarity, the pairing engine and summaries
//! - [`config`] - Configuration management
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod pairing;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{PairingError, Result},
    pairing::{pair_videos, PairingEngine, PairingSummary},
    video::{MatchType, PairedVideoRow, Platform, Video, VideoLoader},
};
