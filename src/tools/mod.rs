/*!
 * External collaborators of the detection pipeline.
 *
 * Every external tool sits behind a narrow capability trait so the pipeline
 * can be driven by test doubles:
 * - `Prober`: media inspection (ffprobe)
 * - `Extractor`: raw stream copy out of a container (ffmpeg)
 * - `FrameExtractor`: keyframe images from an image subtitle payload (ffmpeg)
 * - `OcrService`: text recognition on a single image (tesseract)
 * - `TextLanguageIdentifier`: statistical language identification (whatlang)
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::detection::types::SubtitleTrack;
use crate::errors::ToolError;

pub mod ffmpeg;
pub mod process;
pub mod statistical;
pub mod tesseract;

pub use ffmpeg::{FfmpegExtractor, FfmpegFrameExtractor, FfprobeProber};
pub use statistical::WhatlangIdentifier;
pub use tesseract::TesseractOcr;

/// Media inspection capability
#[async_trait]
pub trait Prober: Send + Sync + Debug {
    /// Check whether the tool can open the path as media at all
    async fn probe(&self, path: &Path) -> Result<(), ToolError>;

    /// List the subtitle-type streams of a container, in stream order
    async fn subtitle_streams(&self, path: &Path) -> Result<Vec<SubtitleTrack>, ToolError>;

    /// Describe a single stream selected by index
    async fn stream_info(&self, path: &Path, index: usize) -> Result<Option<SubtitleTrack>, ToolError>;
}

/// Stream copy capability
#[async_trait]
pub trait Extractor: Send + Sync + Debug {
    /// Write the payload of stream `index` verbatim to `destination`
    async fn extract_stream(&self, media: &Path, index: usize, destination: &Path) -> Result<(), ToolError>;
}

/// Keyframe extraction capability
#[async_trait]
pub trait FrameExtractor: Send + Sync + Debug {
    /// Write up to `max_frames` keyframe images into `out_dir` and return them in order
    async fn extract_frames(&self, payload: &Path, out_dir: &Path, max_frames: usize) -> Result<Vec<PathBuf>, ToolError>;
}

/// Optical character recognition capability
#[async_trait]
pub trait OcrService: Send + Sync + Debug {
    /// Recognize the text in one image; empty text is a valid answer
    async fn recognize(&self, image: &Path) -> Result<String, ToolError>;
}

/// Statistical language identification capability
pub trait TextLanguageIdentifier: Send + Sync + Debug {
    /// Identify the language of `text`, failing when the signal is insufficient
    fn identify(&self, text: &str) -> Result<String, ToolError>;
}
