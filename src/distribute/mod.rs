//! Block distribution engine.
//!
//! One sequential pass: enumerate the source directory, derive the shard
//! directory for each qualifying file, and copy it into place unless the
//! destination path already exists. The first failure aborts the run.

mod copy;
mod scan;
mod shard;

pub use scan::{Scan, SourceEntry, scan_source};
pub use shard::{BLOCK_FILE_SUFFIX, SHARD_KEY_CHARS, is_block_file_name, shard_key};

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::DistributeError;
use crate::shutdown;

/// Counters describing one distribution run.
#[derive(Debug, Default, Clone)]
pub struct RunReport {
    /// Source entries carrying the block-file suffix
    pub matched: usize,
    /// Files copied (or, in dry-run, that would be copied)
    pub copied: usize,
    /// Files whose destination path already existed
    pub skipped_existing: usize,
    /// Source entries ignored: wrong suffix, subdirectories, non-UTF-8 names
    pub ignored: usize,
    /// Shard directories created (or planned, in dry-run)
    pub shard_dirs_created: usize,
    /// Total bytes written (zero in dry-run)
    pub bytes_copied: u64,
}

impl RunReport {
    /// One-line human summary for the end of a run.
    pub fn summary(&self) -> String {
        format!(
            "{} copied, {} already present, {} ignored ({} shard dirs created, {} bytes)",
            self.copied, self.skipped_existing, self.ignored, self.shard_dirs_created,
            self.bytes_copied
        )
    }
}

/// Distribute every qualifying file from `config.source_dir` into the sharded
/// tree under `config.destination_dir`.
///
/// Behavior:
/// - A destination file that already exists is never touched, regardless of
///   its content.
/// - Shard directories are created lazily, parents included.
/// - Processing order follows filesystem enumeration; no ordering guarantee.
/// - Fail-fast: the first error stops the run, files after it are not visited.
pub fn distribute_all(config: &Config) -> Result<RunReport, DistributeError> {
    let scan = scan_source(&config.source_dir)?;

    let mut report = RunReport {
        matched: scan.entries.len(),
        ignored: scan.ignored,
        ..Default::default()
    };

    // Dry-run only: shard dirs we would have created, so repeats aren't
    // double-counted within one run.
    let mut planned_dirs: HashSet<PathBuf> = HashSet::new();

    for entry in &scan.entries {
        if shutdown::is_requested() {
            return Err(DistributeError::Interrupted);
        }

        let key = shard_key(&entry.name);
        let shard_dir = config.destination_dir.join(key);

        if !shard_dir.is_dir() {
            if config.dry_run {
                if planned_dirs.insert(shard_dir.clone()) {
                    info!(path = %shard_dir.display(), "dry-run: would create shard directory");
                    report.shard_dirs_created += 1;
                }
            } else {
                fs::create_dir_all(&shard_dir).map_err(|e| DistributeError::CreateShardDir {
                    path: shard_dir.clone(),
                    source: e,
                })?;
                debug!(path = %shard_dir.display(), "created shard directory");
                report.shard_dirs_created += 1;
            }
        }

        let dest = shard_dir.join(&entry.name);
        if dest.exists() {
            debug!(dest = %dest.display(), "destination present, leaving untouched");
            report.skipped_existing += 1;
            continue;
        }

        if config.dry_run {
            info!(src = %entry.path.display(), dest = %dest.display(), "dry-run: would copy");
            report.copied += 1;
            continue;
        }

        let bytes = copy::copy_into_place(&entry.path, &shard_dir, &dest).map_err(|e| {
            DistributeError::Copy {
                src: entry.path.clone(),
                dest: dest.clone(),
                source: e,
            }
        })?;
        info!(src = %entry.path.display(), dest = %dest.display(), bytes, "copied block file");
        report.bytes_copied += bytes;
        report.copied += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use serial_test::serial;

    fn test_config(temp: &assert_fs::TempDir) -> Config {
        let src = temp.child("blocks");
        let dst = temp.child("sharded");
        src.create_dir_all().unwrap();
        dst.create_dir_all().unwrap();
        Config::new(src.path(), dst.path())
    }

    #[test]
    #[serial]
    fn copies_into_shard_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let cfg = test_config(&temp);

        temp.child("blocks/012345.nyzoblock")
            .write_str("block data")
            .unwrap();

        let report = distribute_all(&cfg).unwrap();
        assert_eq!(report.matched, 1);
        assert_eq!(report.copied, 1);
        assert_eq!(report.shard_dirs_created, 1);

        let dest = cfg.destination_dir.join("012").join("012345.nyzoblock");
        assert_eq!(std::fs::read_to_string(dest).unwrap(), "block data");
    }

    #[test]
    #[serial]
    fn existing_destination_is_preserved() {
        let temp = assert_fs::TempDir::new().unwrap();
        let cfg = test_config(&temp);

        temp.child("blocks/abc123.nyzoblock")
            .write_str("fresh")
            .unwrap();
        temp.child("sharded/abc/abc123.nyzoblock")
            .write_str("stale")
            .unwrap();

        let report = distribute_all(&cfg).unwrap();
        assert_eq!(report.copied, 0);
        assert_eq!(report.skipped_existing, 1);

        let dest = cfg.destination_dir.join("abc").join("abc123.nyzoblock");
        assert_eq!(std::fs::read_to_string(dest).unwrap(), "stale");
    }

    #[test]
    #[serial]
    fn dry_run_touches_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let mut cfg = test_config(&temp);
        cfg.dry_run = true;

        temp.child("blocks/000001.nyzoblock")
            .write_str("x")
            .unwrap();
        temp.child("blocks/000002.nyzoblock")
            .write_str("y")
            .unwrap();

        let report = distribute_all(&cfg).unwrap();
        assert_eq!(report.copied, 2);
        assert_eq!(report.bytes_copied, 0);
        // Same prefix: the planned shard dir is counted once.
        assert_eq!(report.shard_dirs_created, 1);

        assert!(!cfg.destination_dir.join("000").exists());
    }

    #[test]
    #[serial]
    fn interrupt_stops_before_any_copy() {
        let temp = assert_fs::TempDir::new().unwrap();
        let cfg = test_config(&temp);
        temp.child("blocks/999999.nyzoblock")
            .write_str("z")
            .unwrap();

        shutdown::request();
        let err = distribute_all(&cfg).unwrap_err();
        shutdown::reset();

        assert!(matches!(err, DistributeError::Interrupted));
        assert!(!cfg.destination_dir.join("999").exists());
    }
}
