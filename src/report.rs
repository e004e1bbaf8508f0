/*!
 * Rendering of detection results for the command line.
 */

use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::Path;

use crate::detection::{DetectionResult, DetectionRun, SourceKind};
use crate::language_utils;

/// Message printed when a run produced no results
pub const NO_TRACKS_MESSAGE: &str = "No subtitle tracks found or specified track index doesn't exist";

/// Human readable language: `en (English)`, the raw code when unknown to ISO 639, or `Unknown`
pub fn display_language(language: Option<&str>) -> String {
    match language {
        Some(code) => match language_utils::get_language_name(code) {
            Ok(name) => format!("{} ({})", code, name),
            Err(_) => code.to_string(),
        },
        None => "Unknown".to_string(),
    }
}

/// One report line for a result
pub fn format_result_line(source: SourceKind, result: &DetectionResult) -> String {
    let mut line = match source {
        SourceKind::Media => format!(
            "Stream #{} ({}): {} [{}]",
            result.track_index,
            result.format,
            display_language(result.language.as_deref()),
            result.source
        ),
        SourceKind::Standalone => format!(
            "Subtitle file ({}): {} [{}]",
            result.format,
            display_language(result.language.as_deref()),
            result.source
        ),
    };

    if let Some(reason) = result.failure {
        let _ = write!(line, " ({})", reason);
    }
    line
}

/// Report header, printed before detection starts
pub fn render_header(path: &Path) -> String {
    format!("Detecting subtitle language in: {}\n", path.display())
}

/// Text report body for a finished run
pub fn render_results(run: &DetectionRun) -> String {
    let mut out = String::new();

    if run.results.is_empty() {
        let _ = writeln!(out, "{}", NO_TRACKS_MESSAGE);
        return out;
    }

    let _ = writeln!(out, "\nResults:");
    for result in &run.results {
        let _ = writeln!(out, "{}", format_result_line(run.source, result));
    }
    out
}

/// The results of a run as a JSON array
pub fn render_json(run: &DetectionRun) -> Result<String> {
    serde_json::to_string_pretty(&run.results).context("Failed to serialize detection results")
}
