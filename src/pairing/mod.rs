//! # Pairing Engine
//!
//! Matches Instagram posts to their TikTok reposts and turns both lists into
//! one set of dashboard rows.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use video_pairing::{pairing::{PairingEngine, PairingSummary}, video::VideoLoader, Config};
//!
//! # fn main() -> anyhow::Result<()> {
//! let videos = VideoLoader::load("videos.json")?;
//! let engine = PairingEngine::new(Config::default().pairing);
//! let rows = engine.pair(&videos);
//!
//! println!("{}", PairingSummary::compute(&videos, &rows));
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod report;
pub mod similarity;
pub mod window;

// Re-exports for convenience
pub use engine::{pair_videos, ClaimSet, PairingEngine};
pub use report::{group_rows_by_day, sort_rows_by_date, PairingSummary};
pub use similarity::{are_similar, hamming_distance, PerceptualHash};
pub use window::{date_key, is_within_window, parse_timestamp};
