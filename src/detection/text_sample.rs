/*!
 * Text normalization and sampling for text-represented subtitles.
 *
 * The payload is decoded leniently, ASS/SSA files are reduced to their
 * dialogue text, and a bounded sample of lines is taken for identification.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::app_config::DetectionConfig;
use crate::errors::FailureReason;
use crate::file_utils::FileManager;

// @const: Start of the ASS/SSA events section
const EVENTS_MARKER: &str = "[Events]";

// @const: Dialogue line with the nine leading event fields, text captured
static DIALOGUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Dialogue:[^,]*(?:,[^,]*){8},([^\n]*)").unwrap()
});

// @const: Inline override block such as {\an8} or {\i1}
static OVERRIDE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\\[^}]*\}").unwrap()
});

/// A bounded text excerpt handed to language identification
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextSample(String);

impl TextSample {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for empty or whitespace-only samples
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn line_count(&self) -> usize {
        if self.0.is_empty() { 0 } else { self.0.lines().count() }
    }
}

/// Decode a subtitle payload: UTF-8 first, then Latin-1, both lossy.
/// Line endings are normalized to `\n`.
pub fn read_subtitle_text(path: &Path) -> Result<String, FailureReason> {
    let content = match FileManager::read_utf8_lossy(path) {
        Ok(content) => content,
        Err(utf8_err) => {
            debug!("UTF-8 read failed ({}), retrying as Latin-1", utf8_err);
            FileManager::read_latin1(path).map_err(|e| {
                debug!("Latin-1 read failed: {}", e);
                FailureReason::DecodeFailure
            })?
        }
    };

    Ok(normalize_newlines(&content))
}

fn normalize_newlines(content: &str) -> String {
    if content.contains('\r') {
        content.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        content.to_string()
    }
}

/// Reduce ASS/SSA content to its dialogue text.
///
/// Everything before `[Events]` is dropped. When no dialogue line matches the
/// nine-field prefix the remaining content is returned as is.
pub fn extract_ass_dialogue(content: &str) -> String {
    let events = match content.find(EVENTS_MARKER) {
        Some(pos) => &content[pos + EVENTS_MARKER.len()..],
        None => content,
    };

    let dialogue: Vec<&str> = DIALOGUE_REGEX
        .captures_iter(events)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    if dialogue.is_empty() {
        debug!("No dialogue lines matched, sampling raw events section");
        return events.to_string();
    }

    OVERRIDE_REGEX.replace_all(&dialogue.join(" "), "").into_owned()
}

/// Pick the sample lines: lines strictly longer than `min_line_length` chars
/// when any exist, otherwise all non-blank lines; at most `line_limit` of them.
pub fn build_sample(content: &str, min_line_length: usize, line_limit: usize) -> TextSample {
    let long_lines: Vec<&str> = content
        .split('\n')
        .filter(|line| line.chars().count() > min_line_length)
        .collect();

    let lines = if long_lines.is_empty() {
        content.split('\n').filter(|line| !line.trim().is_empty()).collect()
    } else {
        long_lines
    };

    let sample = lines.into_iter().take(line_limit).collect::<Vec<_>>().join("\n");

    if sample.trim().is_empty() {
        TextSample::default()
    } else {
        TextSample(sample)
    }
}

/// Produce the text sample for a text-represented payload
pub fn sample_payload(path: &Path, config: &DetectionConfig) -> Result<TextSample, FailureReason> {
    let content = read_subtitle_text(path)?;

    let content = match FileManager::extension_lowercase(path).as_str() {
        "ass" | "ssa" => extract_ass_dialogue(&content),
        _ => content,
    };

    let sample = build_sample(&content, config.min_line_length, config.sample_line_limit);
    debug!("Sampled {} line(s) from {:?}", sample.line_count(), path);
    Ok(sample)
}
