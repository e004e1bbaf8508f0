/*!
 * Failure-contained wrapper around the statistical language identifier.
 */

use log::debug;
use std::sync::Arc;

use crate::errors::FailureReason;
use crate::tools::TextLanguageIdentifier;

use super::types::Identification;

/// Runs language identification and turns every failure into a reason code.
/// Nothing here propagates an error to the caller.
#[derive(Debug, Clone)]
pub struct LanguageIdentifier {
    service: Arc<dyn TextLanguageIdentifier>,
}

impl LanguageIdentifier {
    pub fn new(service: Arc<dyn TextLanguageIdentifier>) -> Self {
        Self { service }
    }

    /// Identify the language of `text`
    pub fn identify(&self, text: &str) -> Identification {
        if text.trim().is_empty() {
            return Err(FailureReason::EmptySample);
        }

        match self.service.identify(text) {
            Ok(code) if !code.trim().is_empty() => Ok(code.trim().to_string()),
            Ok(_) => {
                debug!("Language identifier returned an empty code");
                Err(FailureReason::IdentificationFailure)
            }
            Err(e) => {
                debug!("Language identification failed: {}", e);
                Err(FailureReason::IdentificationFailure)
            }
        }
    }
}
