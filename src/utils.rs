use std::fs;
use std::path::Path;

/// Quick writable probe: create and remove a small file in `dir`.
/// Uses create_new to avoid clobbering existing files.
pub(crate) fn is_writable_probe(dir: &Path) -> std::io::Result<()> {
    let probe = dir.join(format!(".nyzo_distribute_probe_{}.tmp", std::process::id()));
    match fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)
    {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn probe_leaves_no_file_behind() {
        let td = tempdir().unwrap();
        is_writable_probe(td.path()).unwrap();
        let leftovers: Vec<_> = fs::read_dir(td.path()).unwrap().collect();
        assert!(leftovers.is_empty());
    }
}
