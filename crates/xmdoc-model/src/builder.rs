//! Model builder.
//!
//! Orchestration only: extraction, comment and source-symbol attachment by
//! documentation identifier, namespace grouping, and cross-reference
//! resolution once the whole tree exists. The only fatal condition is a
//! structural invariant violation (duplicate identifiers after
//! normalization); everything else degrades to a recorded message.

use std::collections::HashSet;

use xmdoc_comments::{CommentSource, SourceSymbols};
use xmdoc_meta::AssemblyMetadata;

use crate::doc::{AssemblyDoc, NamespaceDoc};
use crate::extract::{Extracted, extract};
use crate::xref::LinkIndex;

/// Fatal structural error while building the model.
///
/// Indicates a bug or a hostile dump, not ordinary bad input: nothing is
/// written when this occurs.
#[derive(Debug, thiserror::Error)]
pub enum ModelBuildError {
    /// Two entities normalized to the same documentation identifier.
    #[error("Duplicate documentation identifier: {0}")]
    DuplicateId(String),
}

/// The completed, immutable documentation model.
#[derive(Clone, Debug)]
pub struct DocModel {
    /// The documentation tree.
    pub assembly: AssemblyDoc,
    /// Resolved cross-references for every type occurrence in the tree.
    pub links: LinkIndex,
    /// Recoverable-anomaly messages collected during the build.
    pub messages: Vec<String>,
}

/// Builds a [`DocModel`] from raw metadata and a comment source.
pub struct ModelBuilder<'a> {
    comments: &'a dyn CommentSource,
    symbols: Option<&'a SourceSymbols>,
    external_assemblies: Vec<String>,
}

impl<'a> ModelBuilder<'a> {
    /// Create a builder over a comment source.
    #[must_use]
    pub fn new(comments: &'a dyn CommentSource) -> Self {
        Self {
            comments,
            symbols: None,
            external_assemblies: Vec::new(),
        }
    }

    /// Attach a source-symbol map for "defined in source" locations.
    #[must_use]
    pub fn with_symbols(mut self, symbols: &'a SourceSymbols) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Declare assemblies whose documentation already exists in sibling
    /// output, enabling external links.
    #[must_use]
    pub fn with_external_assemblies(mut self, assemblies: Vec<String>) -> Self {
        self.external_assemblies = assemblies;
        self
    }

    /// Build the model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelBuildError`] on a structural invariant violation.
    /// Per-entity anomalies never fail the build; they surface as messages.
    pub fn build(&self, meta: &AssemblyMetadata) -> Result<DocModel, ModelBuildError> {
        let Extracted { mut types, messages } = extract(meta);

        let mut seen = HashSet::new();
        for ty in &types {
            if !seen.insert(ty.id.clone()) {
                return Err(ModelBuildError::DuplicateId(ty.id.clone()));
            }
            for member in &ty.members {
                if !seen.insert(member.id.clone()) {
                    return Err(ModelBuildError::DuplicateId(member.id.clone()));
                }
            }
        }

        for ty in &mut types {
            ty.comment = self.comments.lookup(&ty.id);
            ty.source = self.symbols.and_then(|s| s.lookup(&ty.id)).cloned();
            for member in &mut ty.members {
                member.comment = self.comments.lookup(&member.id);
                member.source = self.symbols.and_then(|s| s.lookup(&member.id)).cloned();
            }
        }

        // Types arrive sorted by namespace, so grouping is a single pass.
        let mut namespaces: Vec<NamespaceDoc> = Vec::new();
        for ty in types {
            let name = ty.namespace().to_owned();
            match namespaces.last_mut() {
                Some(last) if last.name == name => last.types.push(ty),
                _ => namespaces.push(NamespaceDoc {
                    name,
                    types: vec![ty],
                }),
            }
        }

        let assembly = AssemblyDoc {
            name: meta.assembly.name.clone(),
            version: meta.assembly.version.clone(),
            namespaces,
        };
        let links = LinkIndex::build(&assembly, &self.external_assemblies);

        tracing::info!(
            assembly = %assembly.name,
            namespace_count = assembly.namespaces.len(),
            type_count = assembly.types().count(),
            message_count = messages.len(),
            "Built documentation model"
        );

        Ok(DocModel {
            assembly,
            links,
            messages,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use xmdoc_comments::{Inline, MemoryCommentSource, NullCommentSource};
    use xmdoc_meta::{MemberKind, MemberMetadata, MockMetadata, TypeKind, TypeMetadata, TypeSig};

    use super::*;
    use crate::xref::LinkTarget;

    #[test]
    fn test_build_groups_namespaces() {
        let meta = MockMetadata::new("Acme")
            .with_type(TypeMetadata::new("Acme.Widget", TypeKind::Class))
            .with_type(TypeMetadata::new("Acme.Gadget", TypeKind::Class))
            .with_type(TypeMetadata::new("Acme.Util.Sorter", TypeKind::Class))
            .build();

        let model = ModelBuilder::new(&NullCommentSource).build(&meta).unwrap();

        let names: Vec<_> = model
            .assembly
            .namespaces
            .iter()
            .map(|ns| (ns.name.as_str(), ns.types.len()))
            .collect();
        assert_eq!(names, vec![("Acme", 2), ("Acme.Util", 1)]);
    }

    #[test]
    fn test_build_attaches_comments_by_id() {
        let meta = MockMetadata::new("Acme")
            .with_type(
                TypeMetadata::new("Acme.Widget", TypeKind::Class).with_member(
                    MemberMetadata::new("Resize", MemberKind::Method)
                        .with_param("size", TypeSig::new("System.Int32")),
                ),
            )
            .build();
        let comments = MemoryCommentSource::new()
            .with_summary("T:Acme.Widget", "A widget.")
            .with_summary("M:Acme.Widget.Resize(System.Int32)", "Resizes.");

        let model = ModelBuilder::new(&comments).build(&meta).unwrap();
        let widget = &model.assembly.namespaces[0].types[0];

        assert_eq!(
            widget.comment.as_ref().unwrap().summary,
            Some(vec![Inline::Text("A widget.".to_owned())])
        );
        assert_eq!(
            widget.members[0].comment.as_ref().unwrap().summary,
            Some(vec![Inline::Text("Resizes.".to_owned())])
        );
    }

    #[test]
    fn test_build_missing_comment_is_none() {
        let meta = MockMetadata::new("Acme")
            .with_type(TypeMetadata::new("Acme.Widget", TypeKind::Class))
            .build();

        let model = ModelBuilder::new(&NullCommentSource).build(&meta).unwrap();

        assert_eq!(model.assembly.namespaces[0].types[0].comment, None);
    }

    #[test]
    fn test_build_duplicate_id_fails() {
        let meta = MockMetadata::new("Acme")
            .with_type(TypeMetadata::new("Acme.Widget", TypeKind::Class))
            .with_type(TypeMetadata::new("Acme.Widget", TypeKind::Class))
            .build();

        let err = ModelBuilder::new(&NullCommentSource).build(&meta);

        assert!(matches!(err, Err(ModelBuildError::DuplicateId(id)) if id == "T:Acme.Widget"));
    }

    #[test]
    fn test_build_resolves_cross_references() {
        let meta = MockMetadata::new("Acme")
            .with_type(
                TypeMetadata::new("Acme.Widget", TypeKind::Class)
                    .with_base(TypeSig::new("Acme.Gadget")),
            )
            .with_type(TypeMetadata::new("Acme.Gadget", TypeKind::Class))
            .build();

        let model = ModelBuilder::new(&NullCommentSource).build(&meta).unwrap();

        assert_eq!(
            model.links.resolve("Acme.Gadget"),
            &LinkTarget::Internal {
                page: "Acme/Gadget.md".to_owned()
            }
        );
    }

    #[test]
    fn test_build_carries_skip_messages() {
        let meta = MockMetadata::new("Acme")
            .with_type(TypeMetadata::new("", TypeKind::Class))
            .with_type(TypeMetadata::new("Acme.Widget", TypeKind::Class))
            .build();

        let model = ModelBuilder::new(&NullCommentSource).build(&meta).unwrap();

        assert_eq!(model.messages, vec!["Skipped type with empty name"]);
        assert_eq!(model.assembly.types().count(), 1);
    }
}
