//! Identity photo storage.
//!
//! Photos are copied byte-for-byte into the photo directory under a
//! timestamp-derived name; customers keep the returned path.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use roomrent_core::ValidationError;
use tracing::{info, warn};

use crate::atomic;
use crate::error::{StoreError, StoreResult};

/// Accepted image extensions, compared case-insensitively.
pub const PHOTO_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Debug, Clone)]
pub struct PhotoStorage {
    dir: PathBuf,
}

impl PhotoStorage {
    /// Uses `dir` as the photo directory. It must already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PhotoStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copies `source` into storage as `id_<unix-nanos>.<ext>`.
    ///
    /// The original extension is kept as written. Returns the stored path.
    pub fn import(&self, source: &Path) -> StoreResult<PathBuf> {
        let ext = photo_extension(source)?;

        let mut stamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let mut target = self.dir.join(format!("id_{}.{}", stamp, ext));
        while target.exists() {
            stamp += 1;
            target = self.dir.join(format!("id_{}.{}", stamp, ext));
        }

        let bytes = atomic::copy_file(source, &target)?;
        info!(
            source = %source.display(),
            stored = %target.display(),
            bytes,
            "Imported identity photo"
        );
        Ok(target)
    }

    /// Removes a photo this storage imported, e.g. when the customer it
    /// belonged to could not be saved. Paths outside the photo directory
    /// are refused.
    pub fn discard(&self, stored: &Path) -> StoreResult<()> {
        if stored.parent() != Some(self.dir.as_path()) {
            return Err(StoreError::io(
                "discard photo outside storage",
                stored,
                std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            ));
        }
        fs::remove_file(stored).map_err(|e| StoreError::io("remove photo", stored, e))?;
        warn!(stored = %stored.display(), "Discarded identity photo");
        Ok(())
    }
}

fn photo_extension(source: &Path) -> Result<String, ValidationError> {
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| PHOTO_EXTENSIONS.iter().any(|ok| ok.eq_ignore_ascii_case(e)));

    match ext {
        Some(ext) => Ok(ext.to_string()),
        None => Err(ValidationError::NotAllowed {
            field: "ID photo type".to_string(),
            allowed: PHOTO_EXTENSIONS.iter().map(|e| format!(".{}", e)).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomrent_core::CoreError;

    #[test]
    fn test_import_copies_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let photos_dir = dir.path().join("id_photos");
        fs::create_dir(&photos_dir).unwrap();
        let source = dir.path().join("scan.JPG");
        fs::write(&source, [0xFF, 0xD8, 0xFF, 0x00, 0x42]).unwrap();

        let photos = PhotoStorage::new(&photos_dir);
        let stored = photos.import(&source).unwrap();

        assert_eq!(stored.parent().unwrap(), photos_dir);
        let name = stored.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("id_"));
        assert!(name.ends_with(".JPG"));
        assert_eq!(fs::read(&stored).unwrap(), fs::read(&source).unwrap());
        assert!(source.exists());
    }

    #[test]
    fn test_two_imports_get_distinct_names() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("scan.png");
        fs::write(&source, b"png").unwrap();

        let photos = PhotoStorage::new(dir.path());
        let a = photos.import(&source).unwrap();
        let b = photos.import(&source).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let photos = PhotoStorage::new(dir.path());

        for name in ["scan.gif", "scan", "scan.png.exe"] {
            let err = photos.import(&dir.path().join(name)).unwrap_err();
            assert!(
                matches!(err, StoreError::Core(CoreError::Validation(ValidationError::NotAllowed { .. }))),
                "{}",
                name
            );
        }
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let photos = PhotoStorage::new(dir.path());
        let err = photos.import(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_discard_only_inside_photo_dir() {
        let dir = tempfile::tempdir().unwrap();
        let photos_dir = dir.path().join("id_photos");
        fs::create_dir(&photos_dir).unwrap();
        let source = dir.path().join("scan.png");
        fs::write(&source, b"png").unwrap();

        let photos = PhotoStorage::new(&photos_dir);
        let stored = photos.import(&source).unwrap();

        assert!(photos.discard(&source).is_err());
        assert!(source.exists());

        photos.discard(&stored).unwrap();
        assert!(!stored.exists());
    }
}
