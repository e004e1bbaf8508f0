use anyhow::{Result, Context};
use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Create the scoped working directory for one detection run.
    /// The directory and everything in it is removed when the guard drops.
    pub fn create_work_dir() -> std::io::Result<TempDir> {
        tempfile::Builder::new().prefix("subdetect-").tempdir()
    }

    /// Extension exactly as written in the file name, without the dot
    pub fn extension<P: AsRef<Path>>(path: P) -> String {
        path.as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Lowercased extension, without the dot
    pub fn extension_lowercase<P: AsRef<Path>>(path: P) -> String {
        Self::extension(path).to_lowercase()
    }

    /// Read a whole file as UTF-8, replacing undecodable bytes
    pub fn read_utf8_lossy<P: AsRef<Path>>(path: P) -> Result<String> {
        let bytes = fs::read(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read a whole file as Latin-1. Every byte maps to one char, so decoding cannot fail.
    pub fn read_latin1<P: AsRef<Path>>(path: P) -> Result<String> {
        let bytes = fs::read(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))?;
        Ok(bytes.iter().map(|&b| b as char).collect())
    }

    /// Read at most `max_chars` characters from the start of a file as lossy UTF-8
    pub fn read_prefix_lossy<P: AsRef<Path>>(path: P, max_chars: usize) -> Result<String> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

        // A UTF-8 char is at most 4 bytes
        let mut buffer = Vec::with_capacity(max_chars.saturating_mul(4).min(64 * 1024));
        file.take(max_chars.saturating_mul(4) as u64)
            .read_to_end(&mut buffer)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))?;

        Ok(String::from_utf8_lossy(&buffer).chars().take(max_chars).collect())
    }

    /// Files directly inside `dir` named `<prefix>*.<extension>`, sorted by name
    pub fn find_files_with_prefix<P: AsRef<Path>>(dir: P, prefix: &str, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let name_matches = path
                .file_name()
                .map(|name| name.to_string_lossy().starts_with(prefix))
                .unwrap_or(false);
            let ext_matches = path
                .extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
                .unwrap_or(false);

            if name_matches && ext_matches {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }
}
