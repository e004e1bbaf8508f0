/*!
 * # subdetect - Subtitle language detection
 *
 * A Rust library for best-effort identification of the natural language of
 * subtitle tracks, embedded in media containers or stored as standalone files.
 *
 * ## Features
 *
 * - Classify inputs as multi-track containers or standalone subtitle files
 * - Read language tags from container metadata when present
 * - Statistical language identification on text subtitles (SRT, ASS/SSA, VTT, text SUB)
 * - OCR-based identification for image subtitles (PGS/SUP, VobSub)
 * - Every processed track yields a result, with a reason code when the language stays unknown
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `detection`: The detection pipeline:
 *   - `detection::classifier`: Source and format classification
 *   - `detection::tracks`: Stream enumeration and payload extraction
 *   - `detection::text_sample`: Text normalization and sampling
 *   - `detection::ocr`: Keyframe extraction glue and OCR aggregation
 *   - `detection::identifier`: Failure-contained language identification
 *   - `detection::orchestrator`: Per-track strategy selection
 * - `tools`: External collaborators (ffprobe, ffmpeg, tesseract, whatlang)
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `report`: Result rendering
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod detection;
pub mod tools;
pub mod app_controller;
pub mod language_utils;
pub mod report;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use detection::{DetectionResult, DetectionRun, DetectionSource, Detector, SourceKind};
pub use errors::{AppError, DetectionError, FailureReason, ToolError};
