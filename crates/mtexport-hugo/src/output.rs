//! Content file placement and atomic writes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::EntryError;

/// `<output_dir>/<basename>.md`
pub fn markdown_path(output_dir: &Path, basename: &str) -> PathBuf {
    output_dir.join(format!("{}.md", basename))
}

/// Write `content` to `path` so readers never observe a partial file.
///
/// The bytes go to a uniquely named temp file in the destination directory,
/// synced under an exclusive lock, then persisted over `path`.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), EntryError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| EntryError::io(dir, e))?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| EntryError::io(dir, e))?;
    let lock_failed = || EntryError::LockFailed {
        path: path.to_path_buf(),
    };

    FileExt::lock_exclusive(temp.as_file()).map_err(|_| lock_failed())?;
    temp.write_all(content)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| EntryError::io(temp.path(), e))?;
    FileExt::unlock(temp.as_file()).map_err(|_| lock_failed())?;

    // A failed persist drops the temp file, which removes it
    temp.persist(path).map_err(|e| EntryError::io(path, e.error))?;
    Ok(())
}
