/*!
 * Data types shared by the detection pipeline.
 */

use serde::Serialize;
use std::fmt;

use crate::errors::FailureReason;

/// One subtitle stream of a container, or the implicit track of a standalone file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleTrack {
    /// Stream index inside the container (0 for standalone files)
    pub index: usize,

    /// Codec name for container streams, file extension for standalone files
    pub codec: String,

    /// Language tag from the container metadata, if any
    pub language: Option<String>,
}

impl SubtitleTrack {
    pub fn new(index: usize, codec: impl Into<String>, language: Option<String>) -> Self {
        Self {
            index,
            codec: codec.into(),
            language,
        }
    }
}

/// Whether the input is a multi-track container or a single subtitle file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Media,
    Standalone,
}

/// How a subtitle payload stores its content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    Text,
    Image,
}

/// Which strategy produced (or failed to produce) a track's language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionSource {
    /// Language tag read from container metadata
    Metadata,
    /// Statistical identification on subtitle text
    TextDetection,
    /// Statistical identification on OCR output
    OcrDetection,
    /// Payload could not be acquired or has an unsupported codec
    UnknownFormat,
}

impl DetectionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::TextDetection => "text-detection",
            Self::OcrDetection => "ocr-detection",
            Self::UnknownFormat => "unknown-format",
        }
    }
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of language identification: a language code or the reason there is none
pub type Identification = Result<String, FailureReason>;

/// Detection outcome for one processed track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    /// Stream index (0 for standalone files)
    pub track_index: usize,

    /// Codec name or file extension
    pub format: String,

    /// Detected language, absent when unknown
    pub language: Option<String>,

    /// Strategy that produced this result
    pub source: DetectionSource,

    /// Why `language` is absent; `None` whenever a language is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,
}

impl DetectionResult {
    /// Build a result from an identification outcome
    pub fn from_identification(
        track_index: usize,
        format: impl Into<String>,
        source: DetectionSource,
        identification: Identification,
    ) -> Self {
        let (language, failure) = match identification {
            Ok(code) => (Some(code), None),
            Err(reason) => (None, Some(reason)),
        };

        Self {
            track_index,
            format: format.into(),
            language,
            source,
            failure,
        }
    }

    /// Result for a track whose metadata already names its language
    pub fn from_metadata(track: &SubtitleTrack, language: &str) -> Self {
        Self::from_identification(track.index, track.codec.clone(), DetectionSource::Metadata, Ok(language.to_string()))
    }

    /// Result for a track that could not be analysed
    pub fn unknown_format(track: &SubtitleTrack, reason: FailureReason) -> Self {
        Self::from_identification(track.index, track.codec.clone(), DetectionSource::UnknownFormat, Err(reason))
    }
}
