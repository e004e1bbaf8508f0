/*!
 * Image subtitle path: keyframe extraction glue and OCR aggregation.
 */

use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::FailureReason;
use crate::file_utils::FileManager;
use crate::tools::{FrameExtractor, OcrService};

/// Extract up to `max_frames` keyframes of `payload` into `frames_dir`
pub async fn extract_keyframes(
    extractor: &dyn FrameExtractor,
    payload: &Path,
    frames_dir: &Path,
    max_frames: usize,
) -> Result<Vec<PathBuf>, FailureReason> {
    FileManager::ensure_dir(frames_dir).map_err(|e| {
        warn!("Cannot create frame directory {:?}: {}", frames_dir, e);
        FailureReason::FrameExtractionFailure
    })?;

    let mut frames = extractor
        .extract_frames(payload, frames_dir, max_frames)
        .await
        .map_err(|e| {
            warn!("Frame extraction failed for {:?}: {}", payload, e);
            FailureReason::FrameExtractionFailure
        })?;

    frames.truncate(max_frames);
    debug!("Extracted {} keyframe(s) from {:?}", frames.len(), payload);
    Ok(frames)
}

/// Merged OCR output of a batch of frames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OcrAggregate {
    /// Non-empty recognized texts joined by newlines
    pub text: String,
    /// Frames handed to OCR
    pub attempted: usize,
    /// Frames whose OCR call failed
    pub failed: usize,
}

impl OcrAggregate {
    /// Reason to report when the aggregate holds no text
    pub fn empty_reason(&self) -> FailureReason {
        if self.attempted > 0 && self.failed == self.attempted {
            FailureReason::OcrFailure
        } else {
            FailureReason::NoRecognizedText
        }
    }
}

/// Runs OCR over the leading frames and merges the recognized text
#[derive(Debug, Clone)]
pub struct OcrAggregator {
    ocr: Arc<dyn OcrService>,
    frame_limit: usize,
}

impl OcrAggregator {
    pub fn new(ocr: Arc<dyn OcrService>, frame_limit: usize) -> Self {
        Self { ocr, frame_limit }
    }

    /// OCR the first `frame_limit` frames. A failing frame is logged and skipped.
    pub async fn aggregate(&self, frames: &[PathBuf]) -> OcrAggregate {
        let mut texts = Vec::new();
        let mut aggregate = OcrAggregate::default();

        for frame in frames.iter().take(self.frame_limit) {
            aggregate.attempted += 1;
            match self.ocr.recognize(frame).await {
                Ok(text) if !text.trim().is_empty() => texts.push(text),
                Ok(_) => debug!("No text recognized in {:?}", frame),
                Err(e) => {
                    warn!("OCR error on {:?}: {}", frame, e);
                    aggregate.failed += 1;
                }
            }
        }

        aggregate.text = texts.join("\n");
        aggregate
    }
}
