//! Source directory enumeration.
//! A single shallow walk over the flat source directory, keeping only regular
//! files whose names carry the block-file suffix. Everything else (wrong
//! suffix, subdirectories, non-UTF-8 names) is counted but never opened.

use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::DistributeError;

use super::shard::is_block_file_name;

/// A qualifying file found in the source directory.
#[derive(Debug, Clone)]
pub struct SourceEntry {
    /// Filename (UTF-8; non-UTF-8 names never match the suffix)
    pub name: String,
    /// Full path in the source directory
    pub path: PathBuf,
}

/// Result of enumerating the source directory.
#[derive(Debug, Default)]
pub struct Scan {
    /// Qualifying block files, in filesystem enumeration order
    pub entries: Vec<SourceEntry>,
    /// Entries skipped without being read
    pub ignored: usize,
}

/// Enumerate `source_dir` (depth 1) and partition entries by the suffix filter.
/// An unreadable or missing source directory fails the whole run.
pub fn scan_source(source_dir: &Path) -> Result<Scan, DistributeError> {
    let mut scan = Scan::default();

    for entry in WalkDir::new(source_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| DistributeError::Enumerate {
            path: source_dir.to_path_buf(),
            source: e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("filesystem loop during enumeration")),
        })?;

        if !entry.file_type().is_file() {
            scan.ignored += 1;
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            scan.ignored += 1;
            continue;
        };
        if !is_block_file_name(name) {
            scan.ignored += 1;
            continue;
        }

        scan.entries.push(SourceEntry {
            name: name.to_owned(),
            path: entry.into_path(),
        });
    }

    debug!(
        matched = scan.entries.len(),
        ignored = scan.ignored,
        dir = %source_dir.display(),
        "source scan complete"
    );
    Ok(scan)
}
