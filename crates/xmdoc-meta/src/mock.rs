//! Mock metadata provider for testing.
//!
//! Provides [`MockMetadata`] for unit testing without artifact files.

use std::path::Path;

use crate::metadata::{AssemblyIdentity, AssemblyMetadata, TypeMetadata};
use crate::provider::{MetadataError, MetadataProvider};

/// In-memory metadata provider for tests.
///
/// Use the builder methods to assemble test metadata, then hand the mock to
/// the pipeline as a [`MetadataProvider`]; `load` ignores the artifact path.
///
/// # Example
///
/// ```
/// use xmdoc_meta::{MetadataProvider, MockMetadata, TypeKind, TypeMetadata};
///
/// let provider = MockMetadata::new("Acme")
///     .with_type(TypeMetadata::new("Acme.Widget", TypeKind::Class));
///
/// let meta = provider.load(std::path::Path::new("ignored")).unwrap();
/// assert_eq!(meta.types.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct MockMetadata {
    assembly: AssemblyIdentity,
    types: Vec<TypeMetadata>,
}

impl MockMetadata {
    /// Create an empty mock for an assembly name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            assembly: AssemblyIdentity {
                name: name.into(),
                version: None,
            },
            types: Vec::new(),
        }
    }

    /// Set the assembly version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.assembly.version = Some(version.into());
        self
    }

    /// Add a type entry.
    #[must_use]
    pub fn with_type(mut self, ty: TypeMetadata) -> Self {
        self.types.push(ty);
        self
    }

    /// Build the metadata directly, without going through `load`.
    #[must_use]
    pub fn build(self) -> AssemblyMetadata {
        AssemblyMetadata {
            assembly: self.assembly,
            types: self.types,
        }
    }
}

impl MetadataProvider for MockMetadata {
    fn load(&self, _path: &Path) -> Result<AssemblyMetadata, MetadataError> {
        Ok(self.clone().build())
    }
}
