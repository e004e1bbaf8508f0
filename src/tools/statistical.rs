/*!
 * Statistical language identification backed by the whatlang trigram model.
 */

use crate::errors::ToolError;
use crate::language_utils;

use super::TextLanguageIdentifier;

/// Language identifier using `whatlang`.
///
/// whatlang reports ISO 639-3 codes; results are narrowed to ISO 639-1 when the
/// language has one, so English comes back as `en`.
#[derive(Debug, Clone, Default)]
pub struct WhatlangIdentifier {
    require_reliable: bool,
}

impl WhatlangIdentifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject detections whatlang itself marks as unreliable
    pub fn with_reliability_check(mut self, require_reliable: bool) -> Self {
        self.require_reliable = require_reliable;
        self
    }
}

impl TextLanguageIdentifier for WhatlangIdentifier {
    fn identify(&self, text: &str) -> Result<String, ToolError> {
        if text.trim().is_empty() {
            return Err(ToolError::NoResult("empty text".to_string()));
        }

        let info = whatlang::detect(text)
            .ok_or_else(|| ToolError::NoResult("no language features found".to_string()))?;

        if self.require_reliable && !info.is_reliable() {
            return Err(ToolError::NoResult(format!(
                "unreliable detection of {} (confidence {:.2})",
                info.lang().code(),
                info.confidence()
            )));
        }

        let code = info.lang().code();
        Ok(language_utils::normalize_to_part1_or_part2t(code).unwrap_or_else(|_| code.to_string()))
    }
}
