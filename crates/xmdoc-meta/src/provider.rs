//! Metadata provider capability.
//!
//! [`MetadataProvider`] is the narrow interface the pipeline depends on for
//! loading assembly metadata; [`JsonMetadataProvider`] is the file-backed
//! implementation reading the JSON dump format. Other artifact formats plug
//! in by implementing the trait, not by inheriting a shared base.

use std::fs;
use std::path::{Path, PathBuf};

use crate::metadata::AssemblyMetadata;

/// Error loading assembly metadata. Always fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Artifact file does not exist.
    #[error("Artifact not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Artifact exists but could not be read.
    #[error("Failed to read artifact {}: {source}", .path.display())]
    Io {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Artifact content is not valid metadata.
    #[error("Malformed metadata in {}: {source}", .path.display())]
    Parse {
        /// Artifact path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Capability for loading assembly metadata from a compiled artifact.
pub trait MetadataProvider {
    /// Load the metadata for the artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] if the artifact is missing, unreadable, or
    /// cannot be interpreted as assembly metadata. A load error is fatal for
    /// the whole run; per-type anomalies are handled downstream.
    fn load(&self, path: &Path) -> Result<AssemblyMetadata, MetadataError>;
}

/// File-backed provider for JSON metadata dumps.
#[derive(Debug, Default)]
pub struct JsonMetadataProvider;

impl JsonMetadataProvider {
    /// Create a new provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MetadataProvider for JsonMetadataProvider {
    fn load(&self, path: &Path) -> Result<AssemblyMetadata, MetadataError> {
        if !path.exists() {
            return Err(MetadataError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let metadata: AssemblyMetadata =
            serde_json::from_str(&content).map_err(|source| MetadataError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            assembly = %metadata.assembly.name,
            type_count = metadata.types.len(),
            "Loaded assembly metadata"
        );

        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_load_missing_artifact() {
        let provider = JsonMetadataProvider::new();
        let err = provider.load(Path::new("/nonexistent/assembly.json"));

        assert!(matches!(err, Err(MetadataError::NotFound(_))));
    }

    #[test]
    fn test_load_valid_dump() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "assembly": {{ "name": "Acme", "version": "1.2.3" }},
                "types": [{{ "name": "Acme.Widget", "kind": "class" }}]
            }}"#
        )
        .unwrap();

        let provider = JsonMetadataProvider::new();
        let meta = provider.load(file.path()).unwrap();

        assert_eq!(meta.assembly.name, "Acme");
        assert_eq!(meta.assembly.version.as_deref(), Some("1.2.3"));
        assert_eq!(meta.types.len(), 1);
    }

    #[test]
    fn test_load_malformed_dump() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let provider = JsonMetadataProvider::new();
        let err = provider.load(file.path());

        assert!(matches!(err, Err(MetadataError::Parse { .. })));
    }
}
