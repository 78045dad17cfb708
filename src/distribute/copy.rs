//! Copy-into-place helper.
//! - Streams the source bytes to a temp file inside the shard directory
//! - Fsyncs the temp file, then atomically renames it onto the destination
//! - On failure, the temp file is removed best-effort
//!
//! The destination path was checked for existence by the caller; the rename
//! window against concurrent external writers is unsynchronized. No metadata
//! beyond content is carried over.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const BUF_SIZE: usize = 512 * 1024;

/// Copy `src` into `dest` via a temp file in `shard_dir`. Returns bytes written.
pub(super) fn copy_into_place(src: &Path, shard_dir: &Path, dest: &Path) -> io::Result<u64> {
    let tmp = unique_temp_path(shard_dir);

    let bytes = match stream_to_new_file(src, &tmp) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
    };

    if let Err(e) = fs::rename(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    // Persist the rename itself (best-effort; Unix only).
    let _ = fsync_dir(shard_dir);

    Ok(bytes)
}

/// Buffered byte copy into a freshly created file, fsynced before returning.
/// `create_new` means an existing path (file or symlink) fails the copy.
fn stream_to_new_file(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    Ok(bytes)
}

fn unique_temp_path(dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dir.join(format!(".nyzo_distribute.{pid}.{nanos}.tmp"))
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = File::open(dir)?;
    f.sync_all()
}

#[cfg(not(unix))]
fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn no_temp_files(dir: &Path) {
        for entry in fs::read_dir(dir).unwrap() {
            let name = entry.unwrap().file_name();
            let name = name.to_string_lossy();
            assert!(
                !(name.starts_with(".nyzo_distribute.") && name.ends_with(".tmp")),
                "tmp file left behind: {}",
                name
            );
        }
    }

    #[test]
    fn copies_bytes_exactly() {
        let td = tempdir().unwrap();
        let src = td.path().join("src.nyzoblock");
        let dest = td.path().join("dst.nyzoblock");
        fs::write(&src, b"block bytes").unwrap();

        let n = copy_into_place(&src, td.path(), &dest).unwrap();
        assert_eq!(n, 11);
        assert_eq!(fs::read(&dest).unwrap(), b"block bytes");
        no_temp_files(td.path());
    }

    #[test]
    fn zero_length_source_ok() {
        let td = tempdir().unwrap();
        let src = td.path().join("empty");
        let dest = td.path().join("out");
        File::create(&src).unwrap();

        let n = copy_into_place(&src, td.path(), &dest).unwrap();
        assert_eq!(n, 0);
        assert_eq!(fs::metadata(&dest).unwrap().len(), 0);
    }

    #[test]
    fn large_copy_crosses_buffer_boundaries() {
        let td = tempdir().unwrap();
        let src = td.path().join("big.nyzoblock");
        let dest = td.path().join("big.out");

        let size = 2 * BUF_SIZE + 123;
        let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &data).unwrap();

        let n = copy_into_place(&src, td.path(), &dest).unwrap();
        assert_eq!(n as usize, size);
        assert_eq!(fs::read(&dest).unwrap(), data);
        no_temp_files(td.path());
    }

    #[test]
    fn missing_source_cleans_up_temp() {
        let td = tempdir().unwrap();
        let src = td.path().join("gone.nyzoblock");
        let dest = td.path().join("never");

        let err = copy_into_place(&src, td.path(), &dest).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!dest.exists());
        no_temp_files(td.path());
    }
}
