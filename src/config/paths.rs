//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors
//! before anything is written under them.

use anyhow::{Context, Result};
use dirs::{config_dir, data_dir};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "nyzo_distribute";

/// OS-appropriate default config path.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(mut base) = config_dir() {
        base.push(APP_DIR);
        base.push("config.xml");
        return Ok(base);
    }
    let home = std::env::var("HOME").context("neither a config dir nor HOME is available")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join(APP_DIR)
        .join("config.xml"))
}

/// OS-appropriate default log file path (data dir).
pub fn default_log_path() -> Result<PathBuf> {
    if let Some(mut base) = data_dir() {
        base.push(APP_DIR);
        // ensure dir exists (best-effort)
        let _ = fs::create_dir_all(&base);
        base.push("nyzo_distribute.log");
        return Ok(base);
    }
    let home = std::env::var("HOME").context("neither a data dir nor HOME is available")?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join(APP_DIR)
        .join("nyzo_distribute.log"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn symlink_ancestor_detected() {
        #[cfg(unix)]
        {
            let td = tempdir().unwrap();
            let real = td.path().join("real");
            fs::create_dir_all(&real).unwrap();
            let link = td.path().join("link");
            std::os::unix::fs::symlink(&real, &link).unwrap();

            let inside_link = link.join("file.log");
            assert!(path_has_symlink_ancestor(&inside_link).unwrap());

            let inside_real = real.join("file.log");
            assert!(!path_has_symlink_ancestor(&inside_real).unwrap());
        }
    }
}
