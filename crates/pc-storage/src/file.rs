//! Directory-backed shared storage: one file per key.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::events::StorageEvents;
use crate::{SharedStorage, StorageError};

/// Storage shared between processes through a directory.
///
/// Values are written with owner-only permissions because the token lives
/// here. There is no change notification across processes.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) the store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(error) = fs::set_permissions(&dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!(%error, dir = %dir.display(), "failed to chmod 0700 storage dir");
            }
        }
        tracing::debug!(dir = %dir.display(), "opened file storage");
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if valid {
            Ok(self.dir.join(key))
        } else {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }
}

impl SharedStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let io_error = |source| StorageError::Io {
            path: path.clone(),
            source,
        };
        // Each writer stages into its own uniquely named sibling, created
        // owner-only, then renames it over the key so readers never see a
        // partial value.
        let mut staging = tempfile::NamedTempFile::new_in(&self.dir).map_err(io_error)?;
        staging.write_all(value.as_bytes()).map_err(io_error)?;
        staging.persist(&path).map_err(|error| io_error(error.error))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn subscribe(&self) -> Option<StorageEvents> {
        None
    }
}
