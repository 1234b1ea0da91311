use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use bytes::Bytes;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::errors::{MarkupError, ReassemblyError};
use crate::file_utils::FileManager;

// @module: Zip boundary for Word document packages

/// Archive path of the main body part
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

// @const: header/footer part path pattern
static AUXILIARY_PART_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^word/(header|footer)\d*\.xml$").unwrap());

/// One archive entry, kept in original order
#[derive(Debug, Clone)]
pub struct PackageEntry {
    /// Internal archive path (e.g. "word/document.xml")
    pub path: String,

    /// Raw entry bytes (empty for directory entries)
    pub data: Bytes,

    /// Whether the entry is a directory marker
    pub is_dir: bool,
}

/// An opened document package with all entries held in memory
#[derive(Debug, Clone)]
pub struct DocumentPackage {
    /// Source filename without extension
    pub file_stem: String,

    entries: Vec<PackageEntry>,
}

impl DocumentPackage {
    /// Read a package from raw archive bytes
    pub fn from_bytes(file_stem: &str, raw: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(raw))
            .context("Input is not a readable document package")?;

        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive
                .by_index(index)
                .with_context(|| format!("Failed to read archive entry {}", index))?;

            let path = file.name().to_string();
            let is_dir = file.is_dir();

            let mut data = Vec::with_capacity(file.size() as usize);
            if !is_dir {
                file.read_to_end(&mut data)
                    .with_context(|| format!("Failed to read archive entry '{}'", path))?;
            }

            entries.push(PackageEntry {
                path,
                data: Bytes::from(data),
                is_dir,
            });
        }

        debug!(
            "Opened package '{}' with {} entries",
            file_stem,
            entries.len()
        );

        Ok(Self {
            file_stem: file_stem.to_string(),
            entries,
        })
    }

    /// Open a package from a file on disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| anyhow!("Cannot determine file stem for {:?}", path))?;

        let raw = FileManager::read_bytes(path)?;
        Self::from_bytes(&stem, &raw)
    }

    /// All archive entries in original order
    pub fn entries(&self) -> &[PackageEntry] {
        &self.entries
    }

    /// Raw bytes of a part by archive path
    pub fn part_bytes(&self, path: &str) -> Option<&Bytes> {
        self.entries
            .iter()
            .find(|e| !e.is_dir && e.path == path)
            .map(|e| &e.data)
    }

    /// Archive paths of the parts to translate, in processing order:
    /// the main document first, then headers, then footers.
    pub fn translatable_part_paths(&self) -> Result<Vec<String>, MarkupError> {
        if self.part_bytes(MAIN_DOCUMENT_PART).is_none() {
            return Err(MarkupError::MissingPart(MAIN_DOCUMENT_PART.to_string()));
        }

        let mut headers = Vec::new();
        let mut footers = Vec::new();
        for entry in &self.entries {
            if entry.is_dir || !AUXILIARY_PART_REGEX.is_match(&entry.path) {
                continue;
            }
            if entry.path.starts_with("word/header") {
                headers.push(entry.path.clone());
            } else {
                footers.push(entry.path.clone());
            }
        }
        headers.sort();
        footers.sort();

        let mut paths = Vec::with_capacity(1 + headers.len() + footers.len());
        paths.push(MAIN_DOCUMENT_PART.to_string());
        paths.extend(headers);
        paths.extend(footers);
        Ok(paths)
    }

    /// Rebuild the archive with some parts replaced, preserving the original
    /// entry order and internal path layout exactly.
    pub fn repackage(
        &self,
        replacements: &HashMap<String, Vec<u8>>,
    ) -> Result<Bytes, ReassemblyError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in &self.entries {
            if entry.is_dir {
                writer
                    .add_directory(entry.path.clone(), options)
                    .map_err(|e| ReassemblyError::PackagingFailed(e.to_string()))?;
                continue;
            }

            writer
                .start_file(entry.path.clone(), options)
                .map_err(|e| ReassemblyError::PackagingFailed(e.to_string()))?;

            let data: &[u8] = match replacements.get(&entry.path) {
                Some(replaced) => replaced,
                None => &entry.data,
            };

            writer
                .write_all(data)
                .map_err(|e| ReassemblyError::PackagingFailed(e.to_string()))?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| ReassemblyError::PackagingFailed(e.to_string()))?;

        Ok(Bytes::from(cursor.into_inner()))
    }
}

/// Derive a part name from its archive path: "word/header1.xml" -> "header1"
pub fn part_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}
