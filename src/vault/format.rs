//! Whole-file reads and atomic writes of the store file.
//!
//! The file holds exactly one ciphertext blob (see
//! [`crate::crypto::cipher`] for its layout). There is no partial or
//! append write: every save replaces the file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Read the whole store file, or `None` if it does not exist yet.
pub fn read_store(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Replace the store file with `data` **atomically**.
///
/// 1. Write to a temp file in the same directory (owner-only on Unix).
/// 2. Flush it to disk.
/// 3. Rename it over the target path.
///
/// Readers see either the old file or the new one, never a mix.
pub fn write_store(path: &Path, data: &[u8]) -> io::Result<()> {
    let tmp_path = temp_path(path);

    let result = write_new_file(&tmp_path, data).and_then(|()| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// `<dir>/.<file name>.tmp`, next to the target so rename stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

fn write_new_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.sync_all()
}
