/*!
 * Common test utilities for the subdetect test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;


/// Routes library logs through the test harness; safe to call repeatedly
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    create_binary_file(dir, filename, content.as_bytes())
}

/// Creates a test file with raw bytes in the specified directory
pub fn create_binary_file(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// English SRT dialogue
pub const ENGLISH_SRT: &str = "1
00:00:01,000 --> 00:00:04,000
I never thought I would see this place again.

2
00:00:05,000 --> 00:00:09,000
The old house looks exactly the way I remember it.

3
00:00:10,000 --> 00:00:14,000
Come inside before the rain starts, we have a lot to talk about.

4
00:00:15,000 --> 00:00:18,000
Where did everybody go after the summer ended?
";

/// French ASS script with override tags
pub const FRENCH_ASS: &str = "[Script Info]
Title: Episode 1
ScriptType: v4.00+

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour
Style: Default,Arial,20,&H00FFFFFF

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:01.00,0:00:04.00,Default,,0,0,0,,{\\an8}Je ne pensais pas revoir cette maison un jour.
Dialogue: 0,0:00:05.00,0:00:08.00,Default,,0,0,0,,{\\i1}Entre vite{\\i0}, avant que la pluie ne commence.
Dialogue: 0,0:00:09.00,0:00:12.00,Default,,0,0,0,,Nous avons beaucoup de choses à nous dire ce soir.
";

/// Opening of a text-based VobSub index file
pub const VOBSUB_IDX: &str = "# VobSub index file, v7 (do not modify this line!)
size: 720x480
palette: 000000, f0f0f0, cccccc, 999999
langidx: 0
id: en, index: 0
timestamp: 00:00:01:000, filepos: 000000000
";

/// Bytes that look like a binary image subtitle (no letter runs)
pub fn binary_payload() -> Vec<u8> {
    (0u8..=255).cycle().take(2048).map(|b| if b.is_ascii_alphabetic() { 0 } else { b }).collect()
}
