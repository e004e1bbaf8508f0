/*!
 * Error types for the subdetect application.
 *
 * This module contains the error types for the external tool layer, the
 * detection pipeline and the application shell, using the thiserror crate
 * for ergonomic error definitions. It also defines `FailureReason`, the
 * non-fatal outcome code attached to a track whose language stayed unknown.
 */

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by an external collaborator (ffprobe, ffmpeg, tesseract, language ID)
#[derive(Error, Debug)]
pub enum ToolError {
    /// The executable could not be started at all
    #[error("Failed to execute {tool}: {message}")]
    SpawnFailed {
        /// Name of the tool
        tool: String,
        /// Underlying OS error
        message: String,
    },

    /// The tool ran but reported failure
    #[error("{tool} exited with failure: {message}")]
    ExitFailure {
        /// Name of the tool
        tool: String,
        /// Filtered stderr of the tool
        message: String,
    },

    /// The tool did not finish within the configured timeout
    #[error("{tool} timed out after {seconds} seconds")]
    TimedOut {
        /// Name of the tool
        tool: String,
        /// Configured timeout
        seconds: u64,
    },

    /// The tool output could not be interpreted
    #[error("Failed to parse {tool} output: {message}")]
    ParseFailed {
        /// Name of the tool
        tool: String,
        /// Parser message
        message: String,
    },

    /// The tool succeeded but the expected output file is missing
    #[error("Expected output was not produced: {0:?}")]
    OutputMissing(PathBuf),

    /// The analysis service could not produce an answer for the input
    #[error("No result: {0}")]
    NoResult(String),

    /// Filesystem error while preparing or reading tool files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a detection run
#[derive(Error, Debug)]
pub enum DetectionError {
    /// The input path does not exist
    #[error("File '{}' does not exist", .0.display())]
    InputNotFound(PathBuf),

    /// The per-run working directory could not be created
    #[error("Failed to create working directory: {0}")]
    WorkDir(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the detection pipeline
    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

/// Why a processed track came back without a language
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    /// The stream payload could not be copied out of the container
    #[error("extraction-failure")]
    ExtractionFailure,
    /// The frame extraction tool failed
    #[error("frame-extraction-failure")]
    FrameExtractionFailure,
    /// Frame extraction ran but produced no images
    #[error("no-frames")]
    NoFrames,
    /// Every OCR attempt failed
    #[error("ocr-failure")]
    OcrFailure,
    /// OCR ran but recognized no text
    #[error("no-recognized-text")]
    NoRecognizedText,
    /// The payload could not be read or decoded
    #[error("decode-failure")]
    DecodeFailure,
    /// The payload held no usable text
    #[error("empty-sample")]
    EmptySample,
    /// The language identification service gave no answer
    #[error("identification-failure")]
    IdentificationFailure,
    /// The codec is neither a known text nor image subtitle codec
    #[error("unsupported-codec")]
    UnsupportedCodec,
}

impl FailureReason {
    /// Stable identifier used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtractionFailure => "extraction-failure",
            Self::FrameExtractionFailure => "frame-extraction-failure",
            Self::NoFrames => "no-frames",
            Self::OcrFailure => "ocr-failure",
            Self::NoRecognizedText => "no-recognized-text",
            Self::DecodeFailure => "decode-failure",
            Self::EmptySample => "empty-sample",
            Self::IdentificationFailure => "identification-failure",
            Self::UnsupportedCodec => "unsupported-codec",
        }
    }
}
