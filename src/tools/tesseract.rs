/*!
 * Tesseract CLI backed OCR.
 */

use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::Path;

use crate::app_config::ToolsConfig;
use crate::errors::ToolError;

use super::OcrService;
use super::process::{ensure_success, run_tool};

/// OCR through the `tesseract` executable, reading recognized text from stdout
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    program: String,
    languages: String,
    timeout_secs: Option<u64>,
}

impl TesseractOcr {
    pub fn new(config: &ToolsConfig) -> Self {
        Self {
            program: config.tesseract_path.clone(),
            languages: config.ocr_languages.clone(),
            timeout_secs: config.tool_timeout_secs,
        }
    }
}

#[async_trait]
impl OcrService for TesseractOcr {
    async fn recognize(&self, image: &Path) -> Result<String, ToolError> {
        let args: [&OsStr; 4] = [
            image.as_os_str(),
            "stdout".as_ref(),
            "-l".as_ref(),
            self.languages.as_ref(),
        ];
        let output = run_tool("tesseract", &self.program, args, self.timeout_secs).await?;
        ensure_success("tesseract", &output)?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
