//! Cross-reference resolution.
//!
//! Once the whole tree exists, every type reference in the model — base
//! types, interfaces, parameters, return types, generic arguments, inline
//! `see` markers, exception names — is classified exactly once by a
//! three-way lookup:
//!
//! 1. exact match against this run's type set → [`LinkTarget::Internal`]
//! 2. name under a declared external assembly's namespace prefix →
//!    [`LinkTarget::External`], using the same page-path rule the renderer
//!    uses, so the link lands on an externally published page
//! 3. otherwise → [`LinkTarget::Unlinked`] (primitives, generic parameters,
//!    unknown types)
//!
//! Resolution is a pure function of the completed model and the external
//! assembly names: building the index twice yields identical results.

use std::collections::{BTreeSet, HashMap};

use xmdoc_comments::NarrativeBundle;

use crate::doc::{AssemblyDoc, TypeRef, type_page_path};

/// Where a type reference's documentation page lives, if anywhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// Page generated by this run, path relative to the output root.
    Internal {
        /// Output-relative page path.
        page: String,
    },
    /// Page in a separately documented assembly, path relative to the
    /// directory containing all assembly output directories.
    External {
        /// Sibling-relative page path (`Assembly/Namespace/Type.md`).
        page: String,
    },
    /// No page: primitive, generic parameter, or unresolved type.
    Unlinked,
}

/// Immutable map from type link key to resolved [`LinkTarget`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkIndex {
    targets: HashMap<String, LinkTarget>,
}

impl LinkIndex {
    /// Resolve every type reference occurring in `assembly`.
    #[must_use]
    pub fn build(assembly: &AssemblyDoc, external_assemblies: &[String]) -> Self {
        let internal: HashMap<String, String> = assembly
            .types()
            .map(|ty| (ty.link_key(), ty.page_path()))
            .collect();

        let mut targets = HashMap::new();
        for key in collect_keys(assembly) {
            let target = resolve_key(&key, &internal, external_assemblies);
            targets.insert(key, target);
        }
        // Every generated page is linkable even if nothing references it yet.
        for (key, page) in internal {
            targets.entry(key).or_insert(LinkTarget::Internal { page });
        }

        tracing::debug!(entry_count = targets.len(), "Built link index");
        Self { targets }
    }

    /// Look up a link key; unknown keys are unlinked.
    #[must_use]
    pub fn resolve(&self, key: &str) -> &LinkTarget {
        self.targets.get(key).unwrap_or(&LinkTarget::Unlinked)
    }

    /// Resolve a [`TypeRef`] node (outer type only; arguments resolve
    /// independently through their own keys).
    #[must_use]
    pub fn resolve_ref(&self, type_ref: &TypeRef) -> &LinkTarget {
        self.resolve(&type_ref.link_key())
    }
}

fn resolve_key(
    key: &str,
    internal: &HashMap<String, String>,
    external_assemblies: &[String],
) -> LinkTarget {
    if let Some(page) = internal.get(key) {
        return LinkTarget::Internal { page: page.clone() };
    }

    let (name, arity) = split_key(key);
    for assembly in external_assemblies {
        let is_under = name.len() > assembly.len()
            && name.starts_with(assembly.as_str())
            && name.as_bytes()[assembly.len()] == b'.';
        if is_under {
            return LinkTarget::External {
                page: format!("{assembly}/{}", type_page_path(name, arity)),
            };
        }
    }

    LinkTarget::Unlinked
}

/// Split a link key into name and arity (`` Acme.Pair`2 `` → (`Acme.Pair`, 2)).
fn split_key(key: &str) -> (&str, u32) {
    match key.rsplit_once('`') {
        Some((name, arity)) => (name, arity.parse().unwrap_or(0)),
        None => (key, 0),
    }
}

/// Every distinct link key occurring anywhere in the model.
fn collect_keys(assembly: &AssemblyDoc) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    for ty in assembly.types() {
        if let Some(base) = &ty.base {
            add_ref(&mut keys, base);
        }
        for interface in &ty.interfaces {
            add_ref(&mut keys, interface);
        }
        add_comment(&mut keys, ty.comment.as_ref());
        for member in &ty.members {
            for param in &member.params {
                add_ref(&mut keys, &param.ty);
            }
            if let Some(returns) = &member.returns {
                add_ref(&mut keys, returns);
            }
            add_comment(&mut keys, member.comment.as_ref());
        }
    }
    keys
}

fn add_ref(keys: &mut BTreeSet<String>, type_ref: &TypeRef) {
    keys.insert(type_ref.link_key());
    for arg in &type_ref.args {
        add_ref(keys, arg);
    }
}

fn add_comment(keys: &mut BTreeSet<String>, comment: Option<&NarrativeBundle>) {
    let Some(comment) = comment else {
        return;
    };

    let sections = comment
        .summary
        .iter()
        .chain(&comment.remarks)
        .chain(&comment.returns)
        .chain(&comment.example)
        .chain(comment.params.iter().map(|(_, text)| text))
        .chain(comment.exceptions.iter().map(|(_, text)| text));
    for text in sections {
        for inline in text {
            if let Some(name) = inline.see_type_name() {
                keys.insert(name.to_owned());
            }
        }
    }
    for (exception, _) in &comment.exceptions {
        keys.insert(exception.clone());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use xmdoc_comments::Inline;
    use xmdoc_meta::TypeKind;

    use super::*;
    use crate::doc::{MemberDoc, NamespaceDoc, ParamDoc, TypeDoc};
    use crate::MemberKind;

    fn type_doc(full_name: &str, arity: u32) -> TypeDoc {
        TypeDoc {
            id: format!("T:{full_name}"),
            full_name: full_name.to_owned(),
            kind: TypeKind::Class,
            arity,
            type_params: Vec::new(),
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            comment: None,
            source: None,
        }
    }

    fn assembly(types: Vec<TypeDoc>) -> AssemblyDoc {
        AssemblyDoc {
            name: "Acme".to_owned(),
            version: None,
            namespaces: vec![NamespaceDoc {
                name: "Acme".to_owned(),
                types,
            }],
        }
    }

    #[test]
    fn test_internal_resolution() {
        let mut widget = type_doc("Acme.Widget", 0);
        widget.members.push(MemberDoc {
            id: "M:Acme.Widget.Make".to_owned(),
            name: "Make".to_owned(),
            kind: MemberKind::Method,
            is_static: false,
            arity: 0,
            type_params: Vec::new(),
            params: Vec::new(),
            returns: Some(TypeRef::new("Acme.Gadget")),
            comment: None,
            source: None,
        });
        let model = assembly(vec![widget, type_doc("Acme.Gadget", 0)]);

        let index = LinkIndex::build(&model, &[]);

        assert_eq!(
            index.resolve("Acme.Gadget"),
            &LinkTarget::Internal {
                page: "Acme/Gadget.md".to_owned()
            }
        );
        assert_eq!(
            index.resolve("Acme.Widget"),
            &LinkTarget::Internal {
                page: "Acme/Widget.md".to_owned()
            }
        );
    }

    #[test]
    fn test_external_resolution_requires_dot_boundary() {
        let mut widget = type_doc("Acme.Widget", 0);
        widget.base = Some(TypeRef::new("Contoso.Core.Entity"));
        widget.members.push(MemberDoc {
            id: "M:Acme.Widget.Tag".to_owned(),
            name: "Tag".to_owned(),
            kind: MemberKind::Method,
            is_static: false,
            arity: 0,
            type_params: Vec::new(),
            params: vec![ParamDoc {
                name: "other".to_owned(),
                ty: TypeRef::new("Contoso.CoreExtras.Tagger"),
            }],
            returns: None,
            comment: None,
            source: None,
        });
        let model = assembly(vec![widget]);

        let index = LinkIndex::build(&model, &["Contoso.Core".to_owned()]);

        assert_eq!(
            index.resolve("Contoso.Core.Entity"),
            &LinkTarget::External {
                page: "Contoso.Core/Contoso.Core/Entity.md".to_owned()
            }
        );
        // "Contoso.CoreExtras" does not sit under "Contoso.Core".
        assert_eq!(
            index.resolve("Contoso.CoreExtras.Tagger"),
            &LinkTarget::Unlinked
        );
    }

    #[test]
    fn test_unlinked_primitives_and_type_params() {
        let mut widget = type_doc("Acme.Widget", 0);
        widget.members.push(MemberDoc {
            id: "M:Acme.Widget.Resize(System.Int32)".to_owned(),
            name: "Resize".to_owned(),
            kind: MemberKind::Method,
            is_static: false,
            arity: 0,
            type_params: Vec::new(),
            params: vec![ParamDoc {
                name: "size".to_owned(),
                ty: TypeRef::new("System.Int32"),
            }],
            returns: Some(TypeRef::new("T")),
            comment: None,
            source: None,
        });
        let model = assembly(vec![widget]);

        let index = LinkIndex::build(&model, &[]);

        assert_eq!(index.resolve("System.Int32"), &LinkTarget::Unlinked);
        assert_eq!(index.resolve("T"), &LinkTarget::Unlinked);
        assert_eq!(index.resolve("Never.Seen"), &LinkTarget::Unlinked);
    }

    #[test]
    fn test_generic_arguments_resolved_recursively() {
        let mut widget = type_doc("Acme.Widget", 0);
        widget.members.push(MemberDoc {
            id: "M:Acme.Widget.All".to_owned(),
            name: "All".to_owned(),
            kind: MemberKind::Method,
            is_static: false,
            arity: 0,
            type_params: Vec::new(),
            params: Vec::new(),
            returns: Some(TypeRef {
                name: "System.Collections.Generic.List".to_owned(),
                args: vec![TypeRef::new("Acme.Gadget")],
            }),
            comment: None,
            source: None,
        });
        let model = assembly(vec![widget, type_doc("Acme.Gadget", 0)]);

        let index = LinkIndex::build(&model, &[]);

        // Outer constructed generic is unlinked, inner argument links.
        assert_eq!(
            index.resolve("System.Collections.Generic.List`1"),
            &LinkTarget::Unlinked
        );
        assert_eq!(
            index.resolve("Acme.Gadget"),
            &LinkTarget::Internal {
                page: "Acme/Gadget.md".to_owned()
            }
        );
    }

    #[test]
    fn test_inline_see_and_exception_names_collected() {
        let mut widget = type_doc("Acme.Widget", 0);
        widget.comment = Some(NarrativeBundle {
            remarks: Some(vec![Inline::See {
                cref: "T:Acme.Gadget".to_owned(),
            }]),
            exceptions: vec![(
                "Acme.WidgetException".to_owned(),
                vec![Inline::Text("Bad widget.".to_owned())],
            )],
            ..Default::default()
        });
        let model = assembly(vec![
            widget,
            type_doc("Acme.Gadget", 0),
            type_doc("Acme.WidgetException", 0),
        ]);

        let index = LinkIndex::build(&model, &[]);

        assert!(matches!(
            index.resolve("Acme.Gadget"),
            LinkTarget::Internal { .. }
        ));
        assert!(matches!(
            index.resolve("Acme.WidgetException"),
            LinkTarget::Internal { .. }
        ));
    }

    #[test]
    fn test_generic_type_key_includes_arity() {
        let pair = TypeDoc {
            type_params: vec!["TKey".to_owned(), "TValue".to_owned()],
            ..type_doc("Acme.Pair", 2)
        };
        let model = assembly(vec![pair]);

        let index = LinkIndex::build(&model, &[]);

        assert_eq!(
            index.resolve("Acme.Pair`2"),
            &LinkTarget::Internal {
                page: "Acme/Pair-2.md".to_owned()
            }
        );
        assert_eq!(index.resolve("Acme.Pair"), &LinkTarget::Unlinked);
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut widget = type_doc("Acme.Widget", 0);
        widget.base = Some(TypeRef::new("Contoso.Core.Entity"));
        let model = assembly(vec![widget, type_doc("Acme.Gadget", 0)]);
        let externals = vec!["Contoso.Core".to_owned()];

        let first = LinkIndex::build(&model, &externals);
        let second = LinkIndex::build(&model, &externals);

        assert_eq!(first, second);
    }
}
