/*!
 * ffprobe / ffmpeg backed implementations of the media capabilities.
 */

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::app_config::ToolsConfig;
use crate::detection::types::SubtitleTrack;
use crate::errors::ToolError;
use crate::file_utils::FileManager;

use super::process::{ensure_success, run_tool};
use super::{Extractor, FrameExtractor, Prober};

/// Naming pattern handed to ffmpeg for extracted frames
pub const FRAME_PATTERN: &str = "frame_%04d.png";

// @struct: Top level of `ffprobe -print_format json -show_streams`
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

// @struct: One stream entry of the ffprobe report
#[derive(Debug, Deserialize)]
struct ProbeStream {
    index: usize,
    #[serde(default)]
    codec_name: Option<String>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

impl ProbeStream {
    fn into_track(self) -> SubtitleTrack {
        // Matroska writes `language`, some muxers `LANGUAGE`; the exact key wins
        let language = self
            .tags
            .get("language")
            .or_else(|| {
                let mut keys: Vec<&String> = self
                    .tags
                    .keys()
                    .filter(|key| key.eq_ignore_ascii_case("language"))
                    .collect();
                keys.sort();
                keys.first().and_then(|key| self.tags.get(*key))
            })
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        SubtitleTrack {
            index: self.index,
            codec: self.codec_name.unwrap_or_default(),
            language,
        }
    }
}

/// Parse the JSON stream report produced by ffprobe
pub fn parse_probe_streams(json: &str) -> Result<Vec<SubtitleTrack>, ToolError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    let output: ProbeOutput = serde_json::from_str(json).map_err(|e| ToolError::ParseFailed {
        tool: "ffprobe".to_string(),
        message: e.to_string(),
    })?;

    Ok(output.streams.into_iter().map(ProbeStream::into_track).collect())
}

/// Media inspection through ffprobe
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    program: String,
    timeout_secs: Option<u64>,
}

impl FfprobeProber {
    pub fn new(config: &ToolsConfig) -> Self {
        Self {
            program: config.ffprobe_path.clone(),
            timeout_secs: config.tool_timeout_secs,
        }
    }

    async fn select_streams(&self, path: &Path, selector: &str) -> Result<Vec<SubtitleTrack>, ToolError> {
        let args: [&OsStr; 8] = [
            "-v".as_ref(),
            "quiet".as_ref(),
            "-print_format".as_ref(),
            "json".as_ref(),
            "-show_streams".as_ref(),
            "-select_streams".as_ref(),
            selector.as_ref(),
            path.as_os_str(),
        ];
        let output = run_tool("ffprobe", &self.program, args, self.timeout_secs).await?;
        ensure_success("ffprobe", &output)?;

        parse_probe_streams(&String::from_utf8_lossy(&output.stdout))
    }
}

#[async_trait]
impl Prober for FfprobeProber {
    async fn probe(&self, path: &Path) -> Result<(), ToolError> {
        let args: [&OsStr; 3] = ["-v".as_ref(), "error".as_ref(), path.as_os_str()];
        let output = run_tool("ffprobe", &self.program, args, self.timeout_secs).await?;
        ensure_success("ffprobe", &output)
    }

    async fn subtitle_streams(&self, path: &Path) -> Result<Vec<SubtitleTrack>, ToolError> {
        let tracks = self.select_streams(path, "s").await?;
        debug!("ffprobe reported {} subtitle stream(s) in {:?}", tracks.len(), path);
        Ok(tracks)
    }

    async fn stream_info(&self, path: &Path, index: usize) -> Result<Option<SubtitleTrack>, ToolError> {
        let tracks = self.select_streams(path, &index.to_string()).await?;
        Ok(tracks.into_iter().next())
    }
}

/// Stream copy through ffmpeg
#[derive(Debug, Clone)]
pub struct FfmpegExtractor {
    program: String,
    timeout_secs: Option<u64>,
}

impl FfmpegExtractor {
    pub fn new(config: &ToolsConfig) -> Self {
        Self {
            program: config.ffmpeg_path.clone(),
            timeout_secs: config.tool_timeout_secs,
        }
    }
}

#[async_trait]
impl Extractor for FfmpegExtractor {
    async fn extract_stream(&self, media: &Path, index: usize, destination: &Path) -> Result<(), ToolError> {
        let map = format!("0:{}", index);
        let args: [&OsStr; 9] = [
            "-nostdin".as_ref(),
            "-y".as_ref(),
            "-i".as_ref(),
            media.as_os_str(),
            "-map".as_ref(),
            map.as_ref(),
            "-c".as_ref(),
            "copy".as_ref(),
            destination.as_os_str(),
        ];
        let output = run_tool("ffmpeg", &self.program, args, self.timeout_secs).await?;
        ensure_success("ffmpeg", &output)?;

        if !destination.exists() {
            return Err(ToolError::OutputMissing(destination.to_path_buf()));
        }
        Ok(())
    }
}

/// Keyframe extraction through ffmpeg's `select` filter
#[derive(Debug, Clone)]
pub struct FfmpegFrameExtractor {
    program: String,
    timeout_secs: Option<u64>,
}

impl FfmpegFrameExtractor {
    pub fn new(config: &ToolsConfig) -> Self {
        Self {
            program: config.ffmpeg_path.clone(),
            timeout_secs: config.tool_timeout_secs,
        }
    }
}

#[async_trait]
impl FrameExtractor for FfmpegFrameExtractor {
    async fn extract_frames(&self, payload: &Path, out_dir: &Path, max_frames: usize) -> Result<Vec<PathBuf>, ToolError> {
        let pattern = out_dir.join(FRAME_PATTERN);
        let frames = max_frames.to_string();
        let args: [&OsStr; 11] = [
            "-nostdin".as_ref(),
            "-y".as_ref(),
            "-i".as_ref(),
            payload.as_os_str(),
            "-vf".as_ref(),
            "select='eq(pict_type,I)'".as_ref(),
            "-vsync".as_ref(),
            "0".as_ref(),
            "-frames:v".as_ref(),
            frames.as_ref(),
            pattern.as_os_str(),
        ];
        let output = run_tool("ffmpeg", &self.program, args, self.timeout_secs).await?;

        // ffmpeg may fail half way and still leave usable frames behind
        let found = FileManager::find_files_with_prefix(out_dir, "frame_", "png")
            .map_err(|e| ToolError::Io(std::io::Error::other(e.to_string())))?;

        if found.is_empty() {
            ensure_success("ffmpeg", &output)?;
        }

        Ok(found.into_iter().take(max_frames).collect())
    }
}
