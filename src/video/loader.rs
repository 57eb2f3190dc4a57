use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{InputError, Result};
use crate::video::types::{RawVideo, Video};

/// Exports come either as a bare array or wrapped in an object
#[derive(Deserialize)]
#[serde(untagged)]
enum VideoExport {
    List(Vec<RawVideo>),
    Wrapped { videos: Vec<RawVideo> },
}

/// Loads exported video records and resolves them for pairing
pub struct VideoLoader;

impl VideoLoader {
    /// Load records from a `.json` export
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Video>> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        if extension != "json" {
            return Err(InputError::UnsupportedFormat { format: extension }.into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|_| InputError::LoadFailed {
                path: path.display().to_string()
            })?;

        info!("Loading video records from {:?}", path);
        Self::parse(&content, &path.display().to_string())
    }

    /// Load records from an in-memory JSON document
    pub fn from_json_str(json: &str) -> Result<Vec<Video>> {
        Self::parse(json, "<memory>")
    }

    fn parse(json: &str, source_name: &str) -> Result<Vec<Video>> {
        let export: VideoExport = serde_json::from_str(json)
            .map_err(|e| InputError::ParseFailed {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            })?;

        let raw = match export {
            VideoExport::List(videos) | VideoExport::Wrapped { videos } => videos,
        };

        let total = raw.len();
        let videos = Self::resolve_all(raw);

        info!("   Resolved {} of {} records", videos.len(), total);
        Ok(videos)
    }

    /// Resolve raw records, dropping those on unknown platforms
    pub fn resolve_all(raw: Vec<RawVideo>) -> Vec<Video> {
        raw.into_iter()
            .filter_map(|record| {
                let (id, platform) = (record.id, record.platform.clone());
                let resolved = record.resolve();
                match &resolved {
                    Some(video) if video.posted_at.is_none() => {
                        debug!("Video {} has no usable posting time", id);
                    }
                    None => warn!("Dropping video {} on unknown platform {:?}", id, platform),
                    _ => {}
                }
                resolved
            })
            .collect()
    }
}
