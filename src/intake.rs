//! File gatekeeping ahead of any parsing.
//!
//! The gatekeeper inspects a candidate upload (extension, byte size,
//! non-emptiness) before a single byte of content is interpreted, then
//! decodes the raw bytes into text. Spreadsheet extensions (`.xlsx`, `.xls`)
//! pass the gate but must be converted to delimited text by an external
//! adapter before the tokenizer can read them.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use encoding_rs::UTF_8;
use thiserror::Error;

/// Upper bound on accepted input size: 50 MiB.
pub const MAX_FILE_BYTES: u64 = 52_428_800;

pub const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "xlsx", "xls"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("unsupported file format '{0}'; expected .csv, .xlsx, or .xls")]
    UnsupportedFormat(String),
    #[error("file is empty")]
    Empty,
    #[error("file exceeds the {} MiB size limit", MAX_FILE_BYTES / (1024 * 1024))]
    TooLarge,
    #[error("file is not valid {0} text")]
    Encoding(&'static str),
}

/// A candidate upload as handed over by the transport layer: a declared
/// name and the raw content bytes. Consumed once per validation run.
#[derive(Debug, Clone)]
pub struct RawFile {
    name: String,
    bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("Opening input file {path:?}"))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Declared extension: everything after the last dot in the name.
    pub fn extension(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext)
    }
}

pub fn check_file(file: &RawFile) -> Result<(), FileError> {
    let accepted = file
        .extension()
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)));
    if !accepted {
        return Err(FileError::UnsupportedFormat(
            file.extension().unwrap_or("").to_string(),
        ));
    }
    if file.is_empty() {
        return Err(FileError::Empty);
    }
    if file.len() > MAX_FILE_BYTES {
        return Err(FileError::TooLarge);
    }
    Ok(())
}

pub fn decode_text(file: &RawFile) -> Result<String, FileError> {
    let (text, _, had_errors) = UTF_8.decode(&file.bytes);
    if had_errors {
        Err(FileError::Encoding(UTF_8.name()))
    } else {
        Ok(text.into_owned())
    }
}
