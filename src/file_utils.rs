use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file's raw bytes
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write raw bytes to a file, creating parent directories as needed
    pub fn write_bytes<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Check whether a path looks like a Word document package
    pub fn is_document_package<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        path.is_file()
            && path
                .extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("docx"))
                .unwrap_or(false)
    }

    /// Find all document packages under a directory
    pub fn find_document_packages<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            // Word drops lock files named ~$foo.docx next to open documents
            let hidden = path
                .file_name()
                .map(|name| name.to_string_lossy().starts_with("~$"))
                .unwrap_or(false);

            if Self::is_document_package(path) && !hidden {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    // @generates: Output path for a translated package
    // @params: display_name, fallback stem, output_dir, target_language
    pub fn generate_output_path<P: AsRef<Path>>(
        display_name: Option<&str>,
        input_stem: &str,
        output_dir: P,
        target_language: &str,
    ) -> PathBuf {
        let stem = display_name
            .map(Self::sanitize_file_stem)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("{}.{}", input_stem, target_language));

        output_dir.as_ref().join(format!("{}.docx", stem))
    }

    /// Strip path separators and control characters from a translated display name
    pub fn sanitize_file_stem(name: &str) -> String {
        name.trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => ' ',
                c if c.is_control() => ' ',
                c => c,
            })
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
