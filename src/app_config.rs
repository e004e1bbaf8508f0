use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and locating configuration files.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// External tool settings
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Detection pipeline limits
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// External tool configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolsConfig {
    // @field: Media inspection executable
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,

    // @field: Media extraction / frame extraction executable
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    // @field: OCR executable
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: String,

    // @field: Tesseract language packs, joined with '+'
    #[serde(default = "default_ocr_languages")]
    pub ocr_languages: String,

    // @field: Optional timeout applied to every external tool call
    #[serde(default)]
    pub tool_timeout_secs: Option<u64>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: default_ffprobe_path(),
            ffmpeg_path: default_ffmpeg_path(),
            tesseract_path: default_tesseract_path(),
            ocr_languages: default_ocr_languages(),
            tool_timeout_secs: None,
        }
    }
}

/// Detection pipeline configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DetectionConfig {
    /// Maximum keyframes extracted from an image subtitle payload
    #[serde(default = "default_max_frames")]
    pub max_frames: usize,

    /// Maximum extracted frames handed to OCR
    #[serde(default = "default_ocr_frame_limit")]
    pub ocr_frame_limit: usize,

    /// Maximum lines in a text sample
    #[serde(default = "default_sample_line_limit")]
    pub sample_line_limit: usize,

    /// Lines strictly longer than this are preferred for sampling
    #[serde(default = "default_min_line_length")]
    pub min_line_length: usize,

    /// Characters read when sniffing an ambiguous payload
    #[serde(default = "default_sniff_chars")]
    pub sniff_chars: usize,

    /// Consecutive ASCII letters that mark a payload as text
    #[serde(default = "default_min_alpha_run")]
    pub min_alpha_run: usize,

    /// Tracks processed concurrently (1 = sequential)
    #[serde(default = "default_max_concurrent_tracks")]
    pub max_concurrent_tracks: usize,

    /// Discard identifications the statistical model itself marks unreliable
    #[serde(default)]
    pub require_reliable: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_frames: default_max_frames(),
            ocr_frame_limit: default_ocr_frame_limit(),
            sample_line_limit: default_sample_line_limit(),
            min_line_length: default_min_line_length(),
            sniff_chars: default_sniff_chars(),
            min_alpha_run: default_min_alpha_run(),
            max_concurrent_tracks: default_max_concurrent_tracks(),
            require_reliable: false,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// File name looked up in the working directory when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "subdetect.json";

fn default_ffprobe_path() -> String {
    "ffprobe".to_string()
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_tesseract_path() -> String {
    "tesseract".to_string()
}

fn default_ocr_languages() -> String {
    "eng".to_string()
}

fn default_max_frames() -> usize {
    10
}

fn default_ocr_frame_limit() -> usize {
    5
}

fn default_sample_line_limit() -> usize {
    20
}

fn default_min_line_length() -> usize {
    20
}

fn default_sniff_chars() -> usize {
    1000
}

fn default_min_alpha_run() -> usize {
    5
}

fn default_max_concurrent_tracks() -> usize {
    1
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let tools = [
            ("ffprobe_path", &self.tools.ffprobe_path),
            ("ffmpeg_path", &self.tools.ffmpeg_path),
            ("tesseract_path", &self.tools.tesseract_path),
            ("ocr_languages", &self.tools.ocr_languages),
        ];
        for (name, value) in tools {
            if value.trim().is_empty() {
                return Err(anyhow!("tools.{} must not be empty", name));
            }
        }

        if self.tools.tool_timeout_secs == Some(0) {
            return Err(anyhow!("tools.tool_timeout_secs must be greater than zero when set"));
        }

        let limits = [
            ("max_frames", self.detection.max_frames),
            ("ocr_frame_limit", self.detection.ocr_frame_limit),
            ("sample_line_limit", self.detection.sample_line_limit),
            ("sniff_chars", self.detection.sniff_chars),
            ("min_alpha_run", self.detection.min_alpha_run),
            ("max_concurrent_tracks", self.detection.max_concurrent_tracks),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(anyhow!("detection.{} must be greater than zero", name));
            }
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Locate the configuration file to use.
    ///
    /// An explicit path always wins and must exist. Otherwise `subdetect.json`
    /// in the working directory, then `<config dir>/subdetect/config.json`.
    pub fn locate(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {:?}", path));
            }
            return Ok(Some(path.to_path_buf()));
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Ok(Some(local));
        }

        if let Some(dir) = dirs::config_dir() {
            let user = dir.join("subdetect").join("config.json");
            if user.is_file() {
                return Ok(Some(user));
            }
        }

        Ok(None)
    }

    /// Load the located configuration, falling back to defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit)? {
            Some(path) => {
                debug!("Loading configuration from {:?}", path);
                Self::from_file(path)
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}
