#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Header shared by every well-formed fixture in the suite.
pub const HEADER: &str = "InvoiceNo,InvoiceDate,PULAU,PRODUCT_CATEGORY,Quantity";

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// A clean transaction file body with `rows` well-formed data rows.
pub fn clean_csv(rows: usize) -> String {
    let mut body = format!("{HEADER}\n");
    for idx in 0..rows {
        body.push_str(&format!(
            "INV-{idx},2024-01-{:02},JAWA,Beverages,{}\n",
            (idx % 28) + 1,
            idx + 1
        ));
    }
    body
}
