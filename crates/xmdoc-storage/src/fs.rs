//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] rooted at the output directory. Relative paths are
//! validated against traversal before touching the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::storage::{DocStorage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage rooted at an output directory.
///
/// The root does not need to exist: listing a missing root yields an empty
/// set, and the first write creates it.
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Create a storage rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Validate that a relative path doesn't escape the root.
    ///
    /// Rejects absolute paths and parent directory components.
    fn validate_path(path: &str) -> Result<(), StorageError> {
        let p = Path::new(path);
        let escapes = p.is_absolute()
            || p.components()
                .any(|c| matches!(c, std::path::Component::ParentDir));
        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    fn full_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        Self::validate_path(path)?;
        Ok(self.root.join(path))
    }

    fn collect_files(&self, dir: &Path, base: &str, out: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            let rel = if base.is_empty() {
                name
            } else {
                format!("{base}/{name}")
            };
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir {
                self.collect_files(&entry.path(), &rel, out);
            } else {
                out.push(rel);
            }
        }
    }
}

impl DocStorage for FsStorage {
    fn list(&self, pattern: &str) -> Result<Vec<String>, StorageError> {
        let pattern = Pattern::new(pattern).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidPath)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        self.collect_files(&self.root, "", &mut files);
        files.retain(|f| pattern.matches(f));
        files.sort();

        tracing::debug!(
            root = %self.root.display(),
            file_count = files.len(),
            "Listed managed files"
        );
        Ok(files)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full = self.full_path(path)?;
        fs::read(&full)
            .map_err(|e| StorageError::io(e, Some(full)).with_backend(BACKEND))
    }

    fn write(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        let full = self.full_path(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::io(e, Some(parent.to_path_buf())).with_backend(BACKEND))?;
        }
        fs::write(&full, content)
            .map_err(|e| StorageError::io(e, Some(full)).with_backend(BACKEND))
    }

    fn delete(&self, path: &str) -> Result<(), StorageError> {
        let full = self.full_path(path)?;
        fs::remove_file(&full)
            .map_err(|e| StorageError::io(e, Some(full)).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        self.full_path(path).is_ok_and(|full| full.exists())
    }
}
