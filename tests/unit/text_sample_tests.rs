/*!
 * Tests for subtitle text normalization and sampling
 */

use anyhow::Result;
use subdetect::app_config::DetectionConfig;
use subdetect::detection::text_sample::{build_sample, extract_ass_dialogue, read_subtitle_text, sample_payload};
use subdetect::errors::FailureReason;
use crate::common;

/// Test that SRT sampling keeps long lines only
#[test]
fn test_sample_payload_withSrt_shouldKeepLongLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_file(temp_dir.path(), "episode.srt", common::ENGLISH_SRT)?;

    let sample = sample_payload(&srt, &DetectionConfig::default())?;

    assert!(sample.as_str().contains("I never thought I would see this place again."));
    assert!(sample.as_str().split('\n').all(|line| line.chars().count() > 20));
    assert!(!sample.as_str().split('\n').any(|line| line == "1"));
    Ok(())
}

/// Test that ASS sampling keeps only dialogue text without overrides
#[test]
fn test_sample_payload_withAss_shouldExtractDialogueOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let ass = common::create_test_file(temp_dir.path(), "episode.ASS", common::FRENCH_ASS)?;

    let sample = sample_payload(&ass, &DetectionConfig::default())?;

    assert!(sample.as_str().starts_with("Je ne pensais pas revoir cette maison un jour."));
    assert!(sample.as_str().contains("Entre vite, avant que la pluie ne commence."));
    assert!(!sample.as_str().contains("{\\"));
    assert!(!sample.as_str().contains("Dialogue:"));
    assert!(!sample.as_str().contains("Script Info"));
    Ok(())
}

/// Test that an ASS file without an events marker is searched whole
#[test]
fn test_extract_ass_dialogue_withoutEventsMarker_shouldSearchWholeContent() {
    let content = "Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,Hello there, friend\n";

    assert_eq!(extract_ass_dialogue(content), "Hello there, friend");
}

/// Test that CRLF line endings do not leak into samples
#[test]
fn test_read_subtitle_text_withCrlf_shouldNormalizeNewlines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(
        temp_dir.path(),
        "windows.srt",
        "1\r\n00:00:01,000 --> 00:00:02,000\r\nA line written on a windows machine\r\n",
    )?;

    let text = read_subtitle_text(&file)?;

    assert!(!text.contains('\r'));
    assert_eq!(text.lines().count(), 3);
    Ok(())
}

/// Test that undecodable bytes are replaced instead of failing the read
#[test]
fn test_read_subtitle_text_withLatin1Bytes_shouldStillDecode() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_binary_file(temp_dir.path(), "latin.srt", b"Voil\xe0 une r\xe9plique assez longue\n")?;

    let text = read_subtitle_text(&file)?;

    assert!(text.starts_with("Voil"));
    assert!(text.contains("plique assez longue"));
    Ok(())
}

/// Test that an unreadable payload is a decode failure
#[test]
fn test_read_subtitle_text_withMissingFile_shouldReportDecodeFailure() {
    let missing = std::path::Path::new("/nonexistent/subdetect/missing.srt");

    assert_eq!(read_subtitle_text(missing), Err(FailureReason::DecodeFailure));
}

/// Test that the sample never exceeds the line limit
#[test]
fn test_build_sample_withManyLongLines_shouldStopAtLimit() {
    let content: String = (0..100).map(|i| format!("Dialogue line number {:03} is long enough\n", i)).collect();

    let sample = build_sample(&content, 20, 20);

    assert_eq!(sample.line_count(), 20);
    assert!(sample.as_str().ends_with("Dialogue line number 019 is long enough"));
}

/// Test that a line of exactly the threshold length is not preferred
#[test]
fn test_build_sample_withThresholdLengthLine_shouldRequireStrictlyLonger() {
    let exact = "a".repeat(20);
    let longer = "b".repeat(21);
    let content = format!("{}\n{}\n", exact, longer);

    assert_eq!(build_sample(&content, 20, 20).as_str(), longer);
}

/// Test that a whitespace-only payload yields an empty sample
#[test]
fn test_sample_payload_withBlankFile_shouldBeEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "blank.srt", "\n   \n\t\n")?;

    let sample = sample_payload(&file, &DetectionConfig::default())?;

    assert!(sample.is_empty());
    assert_eq!(sample.line_count(), 0);
    Ok(())
}
