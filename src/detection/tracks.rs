/*!
 * Track enumeration and payload acquisition for container sources.
 */

use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::FailureReason;
use crate::file_utils::FileManager;
use crate::tools::{Extractor, Prober};

use super::types::SubtitleTrack;

/// Destination extension for a stream copied out of a container
pub fn payload_extension(codec: &str) -> &'static str {
    match codec {
        "ass" => "ass",
        "subrip" => "srt",
        "hdmv_pgs_subtitle" => "sup",
        "dvd_subtitle" => "sub",
        _ => "sub",
    }
}

/// List the subtitle tracks of `media`, optionally narrowed to one stream index.
/// An unreadable stream listing yields no tracks.
pub async fn enumerate_tracks(prober: &dyn Prober, media: &Path, target: Option<usize>) -> Vec<SubtitleTrack> {
    let tracks = match prober.subtitle_streams(media).await {
        Ok(tracks) => tracks,
        Err(e) => {
            warn!("Could not list subtitle streams of {:?}: {}", media, e);
            return Vec::new();
        }
    };

    match target {
        Some(index) => tracks.into_iter().filter(|t| t.index == index).collect(),
        None => tracks,
    }
}

/// Copies a single stream out of a container into the working directory
#[derive(Debug, Clone)]
pub struct PayloadAcquirer {
    prober: Arc<dyn Prober>,
    extractor: Arc<dyn Extractor>,
}

impl PayloadAcquirer {
    pub fn new(prober: Arc<dyn Prober>, extractor: Arc<dyn Extractor>) -> Self {
        Self { prober, extractor }
    }

    /// Extract stream `index` of `media` into `out_dir` as `track_<index>.<ext>`
    pub async fn acquire(&self, media: &Path, index: usize, out_dir: &Path) -> Result<PathBuf, FailureReason> {
        let codec = match self.prober.stream_info(media, index).await {
            Ok(Some(info)) => info.codec,
            Ok(None) => String::new(),
            Err(e) => {
                debug!("Stream info lookup failed for #{}: {}", index, e);
                String::new()
            }
        };

        FileManager::ensure_dir(out_dir).map_err(|e| {
            warn!("Cannot create track directory {:?}: {}", out_dir, e);
            FailureReason::ExtractionFailure
        })?;

        let destination = out_dir.join(format!("track_{}.{}", index, payload_extension(&codec)));

        if let Err(e) = self.extractor.extract_stream(media, index, &destination).await {
            warn!("Extraction of stream #{} failed: {}", index, e);
            return Err(FailureReason::ExtractionFailure);
        }

        if !destination.exists() {
            warn!("Extraction of stream #{} produced no file", index);
            return Err(FailureReason::ExtractionFailure);
        }

        debug!("Extracted stream #{} to {:?}", index, destination);
        Ok(destination)
    }
}
