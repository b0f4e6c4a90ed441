//! Comment source capability.

use std::collections::HashMap;

use crate::narrative::NarrativeBundle;

/// Capability for looking up narrative comments by documentation identifier.
///
/// Absence is not an error: a member without a comment is documented with
/// explicitly empty sections.
pub trait CommentSource {
    /// Look up the narrative bundle for an identifier.
    fn lookup(&self, id: &str) -> Option<NarrativeBundle>;
}

/// Comment source with no content. Used when no XML file accompanies the
/// artifact.
#[derive(Debug, Default)]
pub struct NullCommentSource;

impl CommentSource for NullCommentSource {
    fn lookup(&self, _id: &str) -> Option<NarrativeBundle> {
        None
    }
}

/// In-memory comment source, primarily for tests.
#[derive(Debug, Default)]
pub struct MemoryCommentSource {
    bundles: HashMap<String, NarrativeBundle>,
}

impl MemoryCommentSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bundle for an identifier.
    #[must_use]
    pub fn with_bundle(mut self, id: impl Into<String>, bundle: NarrativeBundle) -> Self {
        self.bundles.insert(id.into(), bundle);
        self
    }

    /// Add a bundle containing only a summary of plain text.
    #[must_use]
    pub fn with_summary(self, id: impl Into<String>, summary: impl Into<String>) -> Self {
        self.with_bundle(
            id,
            NarrativeBundle {
                summary: Some(vec![crate::narrative::Inline::Text(summary.into())]),
                ..Default::default()
            },
        )
    }
}

impl CommentSource for MemoryCommentSource {
    fn lookup(&self, id: &str) -> Option<NarrativeBundle> {
        self.bundles.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::narrative::Inline;

    #[test]
    fn test_null_source_always_none() {
        assert_eq!(NullCommentSource.lookup("T:Acme.Widget"), None);
    }

    #[test]
    fn test_memory_source_lookup() {
        let source = MemoryCommentSource::new().with_summary("T:Acme.Widget", "A widget.");

        let bundle = source.lookup("T:Acme.Widget").unwrap();
        assert_eq!(
            bundle.summary,
            Some(vec![Inline::Text("A widget.".to_owned())])
        );
        assert_eq!(source.lookup("T:Acme.Other"), None);
    }
}
