//! Source symbol maps.
//!
//! An optional JSON map from documentation identifier to the source location
//! where the entity is defined. When supplied, rendered pages carry a
//! "defined in source" link.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::xml::CommentError;

/// Source location of a documented entity.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SourceLocation {
    /// Repository-relative source file path.
    pub file: String,
    /// One-based line number.
    pub line: u32,
}

/// Map from documentation identifier to source location.
///
/// The file format is a flat JSON object:
///
/// ```json
/// { "T:Acme.Widget": { "file": "src/Widget.cs", "line": 12 } }
/// ```
#[derive(Debug, Default)]
pub struct SourceSymbols {
    symbols: HashMap<String, SourceLocation>,
}

impl SourceSymbols {
    /// Read and parse a symbols file.
    ///
    /// # Errors
    ///
    /// Returns [`CommentError`] if the file cannot be read or is not valid
    /// JSON. A symbols file was explicitly supplied, so failure is fatal.
    pub fn from_file(path: &Path) -> Result<Self, CommentError> {
        let content = fs::read_to_string(path).map_err(|source| CommentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let symbols: HashMap<String, SourceLocation> =
            serde_json::from_str(&content).map_err(|source| CommentError::SymbolsParse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            symbol_count = symbols.len(),
            "Loaded source symbols"
        );

        Ok(Self { symbols })
    }

    /// Look up the source location for an identifier.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&SourceLocation> {
        self.symbols.get(id)
    }

    /// Number of mapped identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True when no identifiers are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
