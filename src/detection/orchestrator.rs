/*!
 * Detection orchestrator.
 *
 * Chooses a strategy for every track of the input and assembles one
 * `DetectionResult` per processed track:
 * - standalone file: text sampling or OCR depending on the payload format
 * - container track with a language tag: metadata, no extraction
 * - container track without a tag: extract, then text sampling or OCR by codec
 *
 * All working files of a run live in one temporary directory that is removed
 * when the run ends, whichever way it ends.
 */

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::app_config::{Config, DetectionConfig};
use crate::errors::{DetectionError, FailureReason};
use crate::file_utils::FileManager;
use crate::tools::{
    Extractor, FfmpegExtractor, FfmpegFrameExtractor, FfprobeProber, FrameExtractor, OcrService, Prober,
    TesseractOcr, TextLanguageIdentifier, WhatlangIdentifier,
};

use super::classifier::{classify_format, classify_source};
use super::identifier::LanguageIdentifier;
use super::ocr::{OcrAggregator, extract_keyframes};
use super::text_sample::sample_payload;
use super::tracks::{PayloadAcquirer, enumerate_tracks};
use super::types::{DetectionResult, DetectionSource, Identification, SourceKind, SubtitleFormat, SubtitleTrack};

/// Codec family handled by text sampling
fn is_text_codec(codec: &str) -> bool {
    matches!(codec, "ass" | "subrip" | "srt")
}

/// Codec family handled by OCR
fn is_image_codec(codec: &str) -> bool {
    matches!(codec, "hdmv_pgs_subtitle" | "dvd_subtitle")
}

/// The external collaborators a detector works with
#[derive(Debug, Clone)]
pub struct Collaborators {
    pub prober: Arc<dyn Prober>,
    pub extractor: Arc<dyn Extractor>,
    pub frame_extractor: Arc<dyn FrameExtractor>,
    pub ocr: Arc<dyn OcrService>,
    pub identifier: Arc<dyn TextLanguageIdentifier>,
}

impl Collaborators {
    /// ffprobe, ffmpeg, tesseract and whatlang as configured
    pub fn from_config(config: &Config) -> Self {
        Self {
            prober: Arc::new(FfprobeProber::new(&config.tools)),
            extractor: Arc::new(FfmpegExtractor::new(&config.tools)),
            frame_extractor: Arc::new(FfmpegFrameExtractor::new(&config.tools)),
            ocr: Arc::new(TesseractOcr::new(&config.tools)),
            identifier: Arc::new(
                WhatlangIdentifier::new().with_reliability_check(config.detection.require_reliable),
            ),
        }
    }
}

/// Outcome of one detection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionRun {
    /// How the input was classified
    pub source: SourceKind,
    /// One result per processed track, in enumeration order
    pub results: Vec<DetectionResult>,
}

/// Top-level detection pipeline
#[derive(Debug, Clone)]
pub struct Detector {
    tools: Collaborators,
    acquirer: PayloadAcquirer,
    identifier: LanguageIdentifier,
    ocr: OcrAggregator,
    config: DetectionConfig,
}

impl Detector {
    pub fn new(tools: Collaborators, config: DetectionConfig) -> Self {
        Self {
            acquirer: PayloadAcquirer::new(tools.prober.clone(), tools.extractor.clone()),
            identifier: LanguageIdentifier::new(tools.identifier.clone()),
            ocr: OcrAggregator::new(tools.ocr.clone(), config.ocr_frame_limit),
            tools,
            config,
        }
    }

    /// Detector backed by the real external tools
    pub fn from_config(config: &Config) -> Self {
        Self::new(Collaborators::from_config(config), config.detection.clone())
    }

    /// Detect subtitle languages of `path`.
    ///
    /// `track` narrows a container to a single stream index and is ignored for
    /// standalone files. Only a missing input or an unusable working directory
    /// is an error; every other failure degrades the affected track.
    pub async fn detect(&self, path: &Path, track: Option<usize>) -> Result<DetectionRun, DetectionError> {
        if !path.exists() {
            return Err(DetectionError::InputNotFound(path.to_path_buf()));
        }

        let work_dir = FileManager::create_work_dir()?;
        debug!("Working directory for {:?}: {:?}", path, work_dir.path());

        let source = classify_source(self.tools.prober.as_ref(), path).await;
        let results = match source {
            SourceKind::Standalone => {
                if let Some(index) = track {
                    debug!("Track index {} ignored for standalone subtitle file", index);
                }
                vec![self.detect_standalone(path, work_dir.path()).await]
            }
            SourceKind::Media => self.detect_media(path, track, work_dir.path()).await,
        };

        info!("Detection finished for {:?}: {} result(s)", path, results.len());
        Ok(DetectionRun { source, results })
    }

    async fn detect_standalone(&self, path: &Path, work_dir: &Path) -> DetectionResult {
        let format = FileManager::extension(path);

        let (source, identification) = match classify_format(path, &self.config) {
            SubtitleFormat::Text => (DetectionSource::TextDetection, self.detect_text(path)),
            SubtitleFormat::Image => (DetectionSource::OcrDetection, self.detect_image(path, work_dir).await),
        };

        DetectionResult::from_identification(0, format, source, identification)
    }

    async fn detect_media(&self, path: &Path, track: Option<usize>, work_dir: &Path) -> Vec<DetectionResult> {
        let tracks = enumerate_tracks(self.tools.prober.as_ref(), path, track).await;
        if tracks.is_empty() {
            return Vec::new();
        }

        stream::iter(tracks.iter())
            .map(|t| self.detect_track(path, t, work_dir))
            .buffered(self.config.max_concurrent_tracks.max(1))
            .collect()
            .await
    }

    async fn detect_track(&self, media: &Path, track: &SubtitleTrack, work_dir: &Path) -> DetectionResult {
        // A blank tag carries no language; such tracks are detected like untagged ones
        if let Some(language) = track.language.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            debug!("Stream #{} tagged '{}' in metadata", track.index, language);
            return DetectionResult::from_metadata(track, language);
        }

        // Concurrent tracks never share a directory
        let track_dir = work_dir.join(format!("track_{}", track.index));

        let payload = match self.acquirer.acquire(media, track.index, &track_dir).await {
            Ok(payload) => payload,
            Err(reason) => return DetectionResult::unknown_format(track, reason),
        };

        let (source, identification) = if is_text_codec(&track.codec) {
            (DetectionSource::TextDetection, self.detect_text(&payload))
        } else if is_image_codec(&track.codec) {
            (DetectionSource::OcrDetection, self.detect_image(&payload, &track_dir).await)
        } else {
            warn!("Stream #{} has unsupported codec '{}'", track.index, track.codec);
            return DetectionResult::unknown_format(track, FailureReason::UnsupportedCodec);
        };

        DetectionResult::from_identification(track.index, track.codec.clone(), source, identification)
    }

    fn detect_text(&self, payload: &Path) -> Identification {
        let sample = sample_payload(payload, &self.config)?;
        self.identifier.identify(sample.as_str())
    }

    async fn detect_image(&self, payload: &Path, work_dir: &Path) -> Identification {
        let frames_dir = work_dir.join("frames");
        let frames = extract_keyframes(
            self.tools.frame_extractor.as_ref(),
            payload,
            &frames_dir,
            self.config.max_frames,
        )
        .await?;

        if frames.is_empty() {
            return Err(FailureReason::NoFrames);
        }

        let aggregate = self.ocr.aggregate(&frames).await;
        if aggregate.text.trim().is_empty() {
            return Err(aggregate.empty_reason());
        }

        self.identifier.identify(&aggregate.text)
    }
}
