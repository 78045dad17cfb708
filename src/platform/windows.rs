//! Windows implementations.
//! Unix file modes have no direct equivalent here; the mode setters are
//! accepted no-ops so call sites stay uniform.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

pub fn set_dir_mode_0700(_path: &Path) -> io::Result<()> {
    Ok(())
}

pub fn set_file_mode_0600(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Create a new file at `path` and write `content` to it.
/// Fails if the path already exists.
pub fn write_config_secure_new_0600(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut f = OpenOptions::new().write(true).create_new(true).open(path)?;
    f.write_all(content)?;
    f.sync_all()
}

/// Open a log file for appending, creating it when missing.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().append(true).create(true).open(path)
}
