//! Config validation logic.
//! Verifies that the source is readable, the destination root exists (creating
//! it if missing) and is writable, and that the two trees are disjoint.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::utils::is_writable_probe;

use super::types::Config;

impl Config {
    /// Validate existence, readability/writability and canonical paths.
    pub fn validate(&self) -> Result<()> {
        let src = &self.source_dir;
        let dst = &self.destination_dir;

        // 1) Source: must exist, be a directory, and be readable.
        ensure_dir_exists_and_is_dir(src, "source_dir")?;
        ensure_readable(src, "source_dir")?;

        // 2) Destination root: must be a directory; create if missing; ensure writable.
        ensure_dir_is_or_create(dst, "destination_dir")?;
        ensure_writable(dst, "destination_dir")?;

        // 3) Resolve symlinks and ensure the trees are disjoint (neither contains the other).
        let src_real = fs::canonicalize(src).unwrap_or_else(|_| src.clone());
        let dst_real = fs::canonicalize(dst).unwrap_or_else(|_| dst.clone());

        if src_real == dst_real {
            bail!(
                "source_dir and destination_dir resolve to the same path: '{}'",
                src_real.display()
            );
        }
        if src_real.starts_with(&dst_real) {
            bail!(
                "source_dir '{}' must not be inside destination_dir '{}'",
                src_real.display(),
                dst_real.display()
            );
        }
        if dst_real.starts_with(&src_real) {
            bail!(
                "destination_dir '{}' must not be inside source_dir '{}'",
                dst_real.display(),
                src_real.display()
            );
        }

        info!(
            "Config validated: source='{}' destination='{}' log_file='{}'",
            src.display(),
            dst.display(),
            self.log_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<none>".into())
        );
        Ok(())
    }
}

/// Ensure path exists and is a directory; emit clear errors with path context.
fn ensure_dir_exists_and_is_dir(path: &Path, name: &str) -> Result<()> {
    if !path.exists() {
        error!("{name} does not exist: {}", path.display());
        bail!("{name} does not exist: {}", path.display());
    }
    if !path.is_dir() {
        error!("{name} is not a directory: {}", path.display());
        bail!("{name} is not a directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path, name: &str) -> Result<()> {
    fs::read_dir(path).with_context(|| {
        format!(
            "Cannot read {name} directory '{}'; check permissions",
            path.display()
        )
    })?;
    debug!("{name} readable: {}", path.display());
    Ok(())
}

/// Ensure directory exists (create if missing). If exists, it must be a directory.
fn ensure_dir_is_or_create(path: &Path, name: &str) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            error!("{name} exists but isn't a directory: {}", path.display());
            bail!("{name} exists but isn't a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create {name} directory '{}'", path.display()))?;
        info!("Created {name} directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is writable using a non-destructive probe file.
fn ensure_writable(path: &Path, name: &str) -> Result<()> {
    is_writable_probe(path).with_context(|| {
        format!(
            "Cannot write to {name} '{}'; check permissions",
            path.display()
        )
    })?;
    debug!("{name} writable: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::types::Config;
    use assert_fs::prelude::*;

    #[test]
    fn validate_creates_missing_destination() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("blocks");
        src.create_dir_all().unwrap();
        let dst = temp.child("sharded");

        let cfg = Config::new(src.path(), dst.path());
        cfg.validate().expect("validation should succeed");
        assert!(dst.path().is_dir());
    }

    #[test]
    fn validate_rejects_missing_source() {
        let temp = assert_fs::TempDir::new().unwrap();
        let cfg = Config::new(temp.path().join("absent"), temp.path().join("out"));
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("source_dir does not exist"));
    }

    #[test]
    fn validate_rejects_same_path() {
        let temp = assert_fs::TempDir::new().unwrap();
        let dir = temp.child("same");
        dir.create_dir_all().unwrap();
        let cfg = Config::new(dir.path(), dir.path());
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("resolve to the same path"));
    }

    #[test]
    fn validate_rejects_nested_destination() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("blocks");
        src.create_dir_all().unwrap();
        let nested = src.path().join("inner");

        let cfg = Config::new(src.path(), nested);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("must not be inside"));
    }
}
