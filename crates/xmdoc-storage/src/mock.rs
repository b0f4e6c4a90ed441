//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::sync::RwLock;

use glob::Pattern;

use crate::storage::{DocStorage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory storage for tests.
///
/// Stores file contents in a map. Use the builder methods to seed test data;
/// inspect state afterwards through the trait methods.
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MockStorage {
    /// Create an empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Number of stored files.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.read().unwrap().len()
    }
}

impl DocStorage for MockStorage {
    fn list(&self, pattern: &str) -> Result<Vec<String>, StorageError> {
        let pattern = Pattern::new(pattern).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidPath)
                .with_backend(BACKEND)
                .with_source(e)
        })?;
        Ok(self
            .files
            .read()
            .unwrap()
            .keys()
            .filter(|k| pattern.matches(k))
            .cloned()
            .collect())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn write(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        self.files
            .write()
            .unwrap()
            .insert(path.to_owned(), content.to_vec());
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.files
            .write()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        self.files.read().unwrap().contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_mock_roundtrip() {
        let storage = MockStorage::new().with_file("index.md", "# Index\n");

        assert!(storage.exists("index.md"));
        assert_eq!(storage.read("index.md").unwrap(), b"# Index\n");

        storage.write("Acme/Widget.md", b"# Widget\n").unwrap();
        assert_eq!(
            storage.list("*.md").unwrap(),
            vec!["Acme/Widget.md", "index.md"]
        );

        storage.delete("index.md").unwrap();
        assert!(!storage.exists("index.md"));
        assert_eq!(storage.file_count(), 1);
    }

    #[test]
    fn test_mock_read_missing() {
        let storage = MockStorage::new();

        let err = storage.read("missing.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }
}
