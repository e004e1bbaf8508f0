/*!
 * Subtitle language detection pipeline.
 *
 * - `classifier`: container vs. standalone, text vs. image payloads
 * - `tracks`: subtitle stream enumeration and payload extraction
 * - `text_sample`: decoding, ASS/SSA dialogue extraction and line sampling
 * - `ocr`: keyframe extraction glue and OCR aggregation
 * - `identifier`: failure-contained language identification
 * - `orchestrator`: per-track strategy selection and result assembly
 */

pub mod classifier;
pub mod identifier;
pub mod ocr;
pub mod orchestrator;
pub mod text_sample;
pub mod tracks;
pub mod types;

pub use orchestrator::{Collaborators, DetectionRun, Detector};
pub use types::{DetectionResult, DetectionSource, SourceKind, SubtitleFormat, SubtitleTrack};
