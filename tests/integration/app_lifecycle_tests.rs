/*!
 * Application lifecycle tests
 *
 * Drive the controller the way the command line does, with mock tools behind
 * the detector.
 */

use anyhow::Result;
use std::io::{self, Write};
use std::time::Duration;
use subdetect::app_config::Config;
use subdetect::app_controller::{Controller, OutputFormat, RunStatus};
use subdetect::detection::{DetectionSource, SubtitleTrack};
use subdetect::errors::{AppError, DetectionError};
use crate::common;
use crate::common::mock_tools::MockTools;

fn controller_for(tools: &MockTools) -> Controller {
    Controller::with_detector(Config::default(), tools.detector())
}

/// Test that an invalid configuration is rejected up front
#[test]
fn test_with_config_withInvalidConfig_shouldReturnConfigError() {
    let mut config = Config::default();
    config.detection.max_frames = 0;

    let outcome = Controller::with_config(config);

    assert!(matches!(outcome, Err(AppError::Config(ref m)) if m.contains("max_frames")));
}

/// Test that a valid configuration builds a controller around the real tools
#[test]
fn test_with_config_withDefaults_shouldKeepConfig() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;

    assert_eq!(controller.config().detection.max_frames, 10);
    Ok(())
}

/// Test that a missing input is reported as an error and nothing runs
#[tokio::test]
async fn test_run_withMissingInput_shouldFailBeforePipeline() {
    let tools = MockTools::new();
    let controller = controller_for(&tools);

    let outcome = controller
        .run(std::path::Path::new("/nonexistent/subdetect/episode.srt"), None, OutputFormat::Text)
        .await;

    assert!(matches!(outcome, Err(AppError::Detection(DetectionError::InputNotFound(_)))));
    assert!(tools.calls().probes.is_empty());
}

/// Output sink that notes how many inspections had run when it first received bytes
struct OrderedOutput {
    tools: MockTools,
    inspections_at_first_write: Option<usize>,
    bytes: Vec<u8>,
}

impl Write for OrderedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.inspections_at_first_write.is_none() {
            self.inspections_at_first_write = Some(self.tools.calls().probes.len());
        }
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Test that the text header is written before detection touches the input
#[tokio::test]
async fn test_run_to_withTextFormat_shouldWriteHeaderBeforeDetection() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_file(temp_dir.path(), "episode.srt", common::ENGLISH_SRT)?;
    let tools = MockTools::new();
    let mut out = OrderedOutput { tools: tools.clone(), inspections_at_first_write: None, bytes: Vec::new() };

    let status = controller_for(&tools).run_to(&mut out, &srt, None, OutputFormat::Text).await?;

    assert_eq!(status, RunStatus::Detected);
    assert_eq!(out.inspections_at_first_write, Some(0));
    assert_eq!(tools.calls().probes.len(), 1);
    let text = String::from_utf8(out.bytes)?;
    assert!(text.starts_with(&format!("Detecting subtitle language in: {}\n", srt.display())));
    assert!(text.contains("Subtitle file (srt): en (English) [text-detection]"));
    Ok(())
}

/// Test that JSON output carries no header
#[tokio::test]
async fn test_run_to_withJsonFormat_shouldWriteOnlyJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_file(temp_dir.path(), "episode.srt", common::ENGLISH_SRT)?;
    let tools = MockTools::new();
    let mut out: Vec<u8> = Vec::new();

    controller_for(&tools).run_to(&mut out, &srt, None, OutputFormat::Json).await?;

    let parsed: serde_json::Value = serde_json::from_slice(&out)?;
    assert_eq!(parsed[0]["language"], "en");
    Ok(())
}

/// Test that a run with results reports success
#[tokio::test]
async fn test_run_withStandaloneFile_shouldReportDetected() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_file(temp_dir.path(), "episode.srt", common::ENGLISH_SRT)?;
    let tools = MockTools::new();

    let status = controller_for(&tools).run(&srt, None, OutputFormat::Text).await?;

    assert_eq!(status, RunStatus::Detected);
    Ok(())
}

/// Test that an unmatched track index reports no tracks
#[tokio::test]
async fn test_run_withUnmatchedTrack_shouldReportNoTracks() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mkv = common::create_binary_file(temp_dir.path(), "movie.mkv", b"\x1a\x45\xdf\xa3")?;
    let tools = MockTools::media(vec![SubtitleTrack::new(2, "subrip", Some("eng".to_string()))]);

    let status = controller_for(&tools).run(&mkv, Some(7), OutputFormat::Json).await?;

    assert_eq!(status, RunStatus::NoTracks);
    Ok(())
}

/// Test that detect hands back the run for further use
#[tokio::test]
async fn test_detect_withTaggedContainer_shouldReturnRun() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mkv = common::create_binary_file(temp_dir.path(), "movie.mkv", b"\x1a\x45\xdf\xa3")?;
    let tools = MockTools::media(vec![
        SubtitleTrack::new(2, "subrip", Some("eng".to_string())),
        SubtitleTrack::new(3, "subrip", Some("spa".to_string())),
    ]);

    let run = controller_for(&tools).detect(&mkv, None).await?;

    assert_eq!(run.results.len(), 2);
    assert!(run.results.iter().all(|r| r.source == DetectionSource::Metadata));
    Ok(())
}

/// Test duration formatting for the summary log line
#[test]
fn test_format_duration_shouldSwitchToMinutes() {
    assert_eq!(Controller::format_duration(Duration::from_millis(4200)), "4.2s");
    assert_eq!(Controller::format_duration(Duration::from_secs(65)), "1m 05s");
}
