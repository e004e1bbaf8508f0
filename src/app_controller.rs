use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::detection::{DetectionRun, Detector};
use crate::errors::{AppError, DetectionError};
use crate::report;

// @module: Application controller for subtitle language detection

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// What the command line should report back to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// At least one track produced a result
    Detected,
    /// No track matched
    NoTracks,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Detection pipeline
    detector: Detector,
}

impl Controller {
    // @method: Create a new controller backed by the configured external tools
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate().map_err(|e| AppError::Config(e.to_string()))?;
        let detector = Detector::from_config(&config);
        Ok(Self { config, detector })
    }

    /// Create a controller around an existing detector (test doubles)
    pub fn with_detector(config: Config, detector: Detector) -> Self {
        Self { config, detector }
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run detection on one input with a spinner on stderr
    pub async fn detect(&self, input: &Path, track: Option<usize>) -> Result<DetectionRun, AppError> {
        if !input.exists() {
            return Err(DetectionError::InputNotFound(input.to_path_buf()).into());
        }

        let start_time = Instant::now();
        let spinner = Self::create_spinner(input);

        let outcome = self.detector.detect(input, track).await;
        spinner.finish_and_clear();

        let run = outcome?;
        info!(
            "Analyzed {} track(s) of {:?} in {}",
            run.results.len(),
            input,
            Self::format_duration(start_time.elapsed())
        );
        Ok(run)
    }

    /// Run detection and print the report to stdout
    pub async fn run(&self, input: &Path, track: Option<usize>, format: OutputFormat) -> Result<RunStatus, AppError> {
        let mut stdout = std::io::stdout();
        self.run_to(&mut stdout, input, track, format).await
    }

    /// Run detection and write the report to `out`.
    /// The text header is written before detection starts.
    pub async fn run_to<W: Write>(
        &self,
        out: &mut W,
        input: &Path,
        track: Option<usize>,
        format: OutputFormat,
    ) -> Result<RunStatus, AppError> {
        if !input.exists() {
            return Err(DetectionError::InputNotFound(input.to_path_buf()).into());
        }

        if format == OutputFormat::Text {
            write!(out, "{}", report::render_header(input))?;
            out.flush()?;
        }

        let run = self.detect(input, track).await?;

        match format {
            OutputFormat::Text => write!(out, "{}", report::render_results(&run))?,
            OutputFormat::Json => writeln!(out, "{}", report::render_json(&run)?)?,
        }
        out.flush()?;

        if run.results.is_empty() {
            debug!("No results for {:?}", input);
            Ok(RunStatus::NoTracks)
        } else {
            Ok(RunStatus::Detected)
        }
    }

    fn create_spinner(input: &Path) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]") {
            spinner.set_style(style);
        }
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| input.display().to_string());
        spinner.set_message(format!("Analyzing {}", name));
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    // @returns: Duration as "1m 05s" or "4.2s"
    pub fn format_duration(duration: Duration) -> String {
        let secs = duration.as_secs();
        if secs >= 60 {
            format!("{}m {:02}s", secs / 60, secs % 60)
        } else {
            format!("{:.1}s", duration.as_secs_f64())
        }
    }
}
