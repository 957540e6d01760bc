//! Whole-file replacement without torn writes.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{StoreError, StoreResult};

/// Writes `bytes` to `path` through a temp file in the same directory.
///
/// Readers see either the previous file or the complete new one. On failure
/// the temp file is removed when it drops and `path` is untouched.
pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let mut temp = temp_beside(path)?;

    temp.as_file_mut()
        .write_all(bytes)
        .map_err(|e| StoreError::io("write temp file for", path, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| StoreError::io("sync temp file for", path, e))?;

    temp.persist(path).map_err(|e| StoreError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

/// Copies `source` to `target` through a temp file, never replacing an
/// existing `target`. Returns the number of bytes copied.
///
/// A failed copy leaves nothing at `target`.
pub(crate) fn copy_file(source: &Path, target: &Path) -> StoreResult<u64> {
    let mut input = File::open(source).map_err(|e| StoreError::io("open", source, e))?;
    let mut temp = temp_beside(target)?;

    let bytes = io::copy(&mut input, temp.as_file_mut())
        .map_err(|e| StoreError::io("copy", source, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| StoreError::io("sync temp file for", target, e))?;

    temp.persist_noclobber(target)
        .map_err(|e| StoreError::Persist {
            path: target.to_path_buf(),
            source: e.error,
        })?;

    Ok(bytes)
}

fn temp_beside(path: &Path) -> StoreResult<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    NamedTempFile::new_in(dir).map_err(|e| StoreError::io("create temp file in", dir, e))
}
