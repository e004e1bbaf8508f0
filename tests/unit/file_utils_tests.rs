/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::path::Path;
use subdetect::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "exists.srt", "content")?;

    assert!(FileManager::file_exists(&test_file));
    Ok(())
}

/// Test that file_exists returns false for directories and missing paths
#[test]
fn test_file_exists_withDirectoryOrMissingPath_shouldReturnFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.srt")));
    Ok(())
}

/// Test that the extension keeps its case as written while the lowercase variant folds it
#[test]
fn test_extension_withMixedCase_shouldKeepOrFoldCase() {
    let path = Path::new("/movies/Episode.SRT");

    assert_eq!(FileManager::extension(path), "SRT");
    assert_eq!(FileManager::extension_lowercase(path), "srt");
    assert_eq!(FileManager::extension(Path::new("/movies/noext")), "");
}

/// Test that the work directory is removed when its guard drops
#[test]
fn test_create_work_dir_whenDropped_shouldRemoveDirectory() -> Result<()> {
    let work_dir = FileManager::create_work_dir()?;
    let path = work_dir.path().to_path_buf();
    common::create_test_file(&path, "track_2.sup", "payload")?;
    assert!(path.exists());

    drop(work_dir);

    assert!(!path.exists());
    Ok(())
}

/// Test that ensure_dir creates nested directories and accepts existing ones
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("track_3").join("frames");

    FileManager::ensure_dir(&nested)?;
    FileManager::ensure_dir(&nested)?;

    assert!(nested.is_dir());
    Ok(())
}

/// Test that invalid UTF-8 bytes are replaced rather than rejected
#[test]
fn test_read_utf8_lossy_withInvalidBytes_shouldReplace() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_binary_file(temp_dir.path(), "mixed.srt", b"Caf\xe9 noir")?;

    let text = FileManager::read_utf8_lossy(&file)?;

    assert_eq!(text, "Caf\u{FFFD} noir");
    Ok(())
}

/// Test that Latin-1 decoding maps every byte to its code point
#[test]
fn test_read_latin1_withHighBytes_shouldMapEveryByte() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_binary_file(temp_dir.path(), "latin.srt", b"Caf\xe9")?;

    assert_eq!(FileManager::read_latin1(&file)?, "Café");
    Ok(())
}

/// Test that reading a missing file is an error, not an empty string
#[test]
fn test_read_utf8_lossy_withMissingFile_shouldFail() {
    assert!(FileManager::read_utf8_lossy("/nonexistent/subdetect/missing.srt").is_err());
}

/// Test that the prefix read stops after the requested number of characters
#[test]
fn test_read_prefix_lossy_withLongFile_shouldTruncateToChars() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "é".repeat(50);
    let file = common::create_test_file(temp_dir.path(), "long.sub", &content)?;

    let prefix = FileManager::read_prefix_lossy(&file, 10)?;

    assert_eq!(prefix.chars().count(), 10);
    assert!(prefix.chars().all(|c| c == 'é'));
    Ok(())
}

/// Test that frame files are found sorted and other files ignored
#[test]
fn test_find_files_with_prefix_withMixedFiles_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "frame_0002.png", "")?;
    common::create_test_file(temp_dir.path(), "frame_0001.png", "")?;
    common::create_test_file(temp_dir.path(), "frame_0003.txt", "")?;
    common::create_test_file(temp_dir.path(), "other_0001.png", "")?;

    let frames = FileManager::find_files_with_prefix(temp_dir.path(), "frame_", "png")?;
    let names: Vec<String> = frames
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["frame_0001.png", "frame_0002.png"]);
    Ok(())
}
