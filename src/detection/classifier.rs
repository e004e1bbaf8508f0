/*!
 * Source and format classification.
 *
 * Both classifiers combine two inputs with a fixed precedence. The decision
 * rules are plain functions (`decide_source`, `decide_format`) so they can be
 * exercised without touching the filesystem or external tools; the async
 * wrappers only gather the inputs.
 */

use log::debug;
use std::path::Path;

use crate::app_config::DetectionConfig;
use crate::file_utils::FileManager;
use crate::tools::Prober;

use super::types::{SourceKind, SubtitleFormat};

/// Extensions that always mark an input as a standalone subtitle file
pub const STANDALONE_EXTENSIONS: [&str; 7] = ["srt", "ass", "ssa", "sub", "sup", "idx", "pgs"];

/// What the file extension alone says about a payload's representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionHint {
    Text,
    Image,
    /// `sub`/`idx` and unknown extensions: the content decides
    Ambiguous,
}

/// True when `extension` (without the dot, any case) is a standalone subtitle extension
pub fn is_standalone_extension(extension: &str) -> bool {
    let extension = extension.to_lowercase();
    STANDALONE_EXTENSIONS.contains(&extension.as_str())
}

/// Source decision.
///
/// Precedence: an extension match wins, then probe failure. A well-formed
/// container named `movie.sub` is therefore standalone even though the probe
/// succeeds; this keeps a subtitle extension authoritative.
pub fn decide_source(probe_succeeded: bool, extension: &str) -> SourceKind {
    if is_standalone_extension(extension) || !probe_succeeded {
        SourceKind::Standalone
    } else {
        SourceKind::Media
    }
}

/// Probe `path` and classify it as a container or a standalone subtitle file
pub async fn classify_source(prober: &dyn Prober, path: &Path) -> SourceKind {
    let probe_succeeded = match prober.probe(path).await {
        Ok(()) => true,
        Err(e) => {
            debug!("Probe failed for {:?}: {}", path, e);
            false
        }
    };

    let kind = decide_source(probe_succeeded, &FileManager::extension(path));
    debug!("Classified {:?} as {:?} (probe ok: {})", path, kind, probe_succeeded);
    kind
}

/// First precedence level of format classification
pub fn extension_hint(extension: &str) -> ExtensionHint {
    match extension.to_lowercase().as_str() {
        "srt" | "vtt" | "ass" | "ssa" => ExtensionHint::Text,
        "sup" | "pgs" => ExtensionHint::Image,
        _ => ExtensionHint::Ambiguous,
    }
}

/// True when `text` holds at least `min_run` consecutive ASCII letters
pub fn has_alpha_run(text: &str, min_run: usize) -> bool {
    let mut run = 0;
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            run += 1;
            if run >= min_run {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Format decision.
///
/// Precedence: a decisive extension wins; otherwise the sniffed content
/// prefix decides, and a prefix that could not be read means `Image`.
pub fn decide_format(hint: ExtensionHint, sniffed: Option<&str>, min_alpha_run: usize) -> SubtitleFormat {
    match hint {
        ExtensionHint::Text => SubtitleFormat::Text,
        ExtensionHint::Image => SubtitleFormat::Image,
        ExtensionHint::Ambiguous => match sniffed {
            Some(content) if has_alpha_run(content, min_alpha_run) => SubtitleFormat::Text,
            _ => SubtitleFormat::Image,
        },
    }
}

/// Classify a standalone payload as text or image represented
pub fn classify_format(path: &Path, config: &DetectionConfig) -> SubtitleFormat {
    let hint = extension_hint(&FileManager::extension(path));

    let sniffed = match hint {
        ExtensionHint::Ambiguous => match FileManager::read_prefix_lossy(path, config.sniff_chars) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!("Could not sniff {:?}: {}", path, e);
                None
            }
        },
        _ => None,
    };

    let format = decide_format(hint, sniffed.as_deref(), config.min_alpha_run);
    debug!("Format of {:?}: {:?} (extension hint {:?})", path, format, hint);
    format
}
