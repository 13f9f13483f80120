//! Single-pass file scanning.
//!
//! A scan reads the whole file once and hands out classified lines lazily,
//! in original order. Paths that are missing, non-regular, or unreadable
//! yield no scan at all; the caller records the skip and the batch
//! continues.

use crate::classify::{classify_line, ClassifiedLine};
use log::debug;
use std::fs;
use std::path::Path;

/// Content of one successfully read source file.
#[derive(Clone, Debug)]
pub struct FileScan {
    content: String,
}

impl FileScan {
    /// Build a scan from in-memory content. Used by tests and by callers
    /// that already hold the file body.
    pub fn from_content(content: String) -> Self {
        FileScan { content }
    }

    /// Classified lines in file order. Re-invoking restarts from the top.
    pub fn lines(&self) -> impl Iterator<Item = ClassifiedLine<'_>> {
        self.content.lines().map(classify_line)
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Read a file for scanning, or `None` when the path cannot be analyzed.
///
/// Skips are a per-file outcome, never a batch failure: the worst result of
/// a bad path is one fewer analyzed file in the report.
pub fn scan_file(path: &Path) -> Option<FileScan> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            debug!("skipping non-regular file {}", path.display());
            return None;
        }
        Err(err) => {
            debug!("skipping {}: {}", path.display(), err);
            return None;
        }
    }

    match fs::read_to_string(path) {
        Ok(content) => Some(FileScan { content }),
        Err(err) => {
            debug!("skipping unreadable {}: {}", path.display(), err);
            None
        }
    }
}
