//! # Video Records Module
//!
//! Video record types, export loading, and platform link building.

pub mod loader;
pub mod shortcode;
pub mod types;

pub use loader::VideoLoader;
pub use shortcode::{encode_shortcode, resolve_platform_shortcode};
pub use types::{MatchType, PairedVideoRow, Platform, RawVideo, Video};
