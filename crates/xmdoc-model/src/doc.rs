//! The documentation tree.
//!
//! Ownership is strictly hierarchical: an assembly owns namespaces, a
//! namespace owns types, a type owns members. Type positions hold
//! [`TypeRef`]s — lightweight identities resolved later by the
//! [`crate::LinkIndex`], never owned `TypeDoc`s, so the model has no
//! forward-reference ordering problem.

use xmdoc_comments::{NarrativeBundle, SourceLocation};
use xmdoc_meta::{MemberKind, TypeKind, TypeSig};

/// Root of the documentation tree for one assembly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssemblyDoc {
    /// Assembly name.
    pub name: String,
    /// Assembly version, if recorded.
    pub version: Option<String>,
    /// Namespaces in name order.
    pub namespaces: Vec<NamespaceDoc>,
}

impl AssemblyDoc {
    /// Iterate over every type in tree order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDoc> {
        self.namespaces.iter().flat_map(|ns| ns.types.iter())
    }
}

/// A namespace grouping, derived by splitting type full names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceDoc {
    /// Dotted namespace name; empty for the global namespace.
    pub name: String,
    /// Types declared directly in this namespace, in name order.
    pub types: Vec<TypeDoc>,
}

/// Documentation entry for one type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDoc {
    /// Documentation identifier (`T:...`).
    pub id: String,
    /// Namespace-qualified type name.
    pub full_name: String,
    /// Type kind.
    pub kind: TypeKind,
    /// Number of generic parameters.
    pub arity: u32,
    /// Generic parameter names.
    pub type_params: Vec<String>,
    /// Base type reference, if any.
    pub base: Option<TypeRef>,
    /// Declared interface references.
    pub interfaces: Vec<TypeRef>,
    /// Members in documentation order.
    pub members: Vec<MemberDoc>,
    /// Resolved narrative comment.
    pub comment: Option<NarrativeBundle>,
    /// Source location, when a symbol map was supplied.
    pub source: Option<SourceLocation>,
}

impl TypeDoc {
    /// Namespace portion of the full name; empty for the global namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.full_name
            .rsplit_once('.')
            .map_or("", |(ns, _)| ns)
    }

    /// Short name without the namespace.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.full_name
            .rsplit_once('.')
            .map_or(self.full_name.as_str(), |(_, short)| short)
    }

    /// Display name with generic parameters (`Pair<TKey, TValue>`).
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.type_params.is_empty() {
            self.short_name().to_owned()
        } else {
            format!("{}<{}>", self.short_name(), self.type_params.join(", "))
        }
    }

    /// Link-index key for this type (`Name` or `` Name`arity ``).
    #[must_use]
    pub fn link_key(&self) -> String {
        if self.arity > 0 {
            format!("{}`{}", self.full_name, self.arity)
        } else {
            self.full_name.clone()
        }
    }

    /// Output-relative page path for this type.
    #[must_use]
    pub fn page_path(&self) -> String {
        type_page_path(&self.full_name, self.arity)
    }
}

/// Documentation entry for one member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberDoc {
    /// Documentation identifier (`M:...`, `P:...`, ...).
    pub id: String,
    /// Display name. Constructors carry the declaring type's short name.
    pub name: String,
    /// Member kind.
    pub kind: MemberKind,
    /// True for static members.
    pub is_static: bool,
    /// Number of generic parameters declared by the member.
    pub arity: u32,
    /// Generic parameter names declared by the member.
    pub type_params: Vec<String>,
    /// Parameters in declaration order.
    pub params: Vec<ParamDoc>,
    /// Return or value type reference.
    pub returns: Option<TypeRef>,
    /// Resolved narrative comment.
    pub comment: Option<NarrativeBundle>,
    /// Source location, when a symbol map was supplied.
    pub source: Option<SourceLocation>,
}

/// One parameter of a member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamDoc {
    /// Parameter name.
    pub name: String,
    /// Parameter type reference.
    pub ty: TypeRef,
}

/// Lightweight reference to a type: a name plus generic arguments.
///
/// Never owns a [`TypeDoc`]. Resolution to a link category happens once,
/// after the whole model is built, via [`crate::LinkIndex`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Namespace-qualified name, or a bare generic-parameter name.
    pub name: String,
    /// Generic arguments.
    pub args: Vec<TypeRef>,
}

impl TypeRef {
    /// Create a non-generic reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Link-index key (`Name` or `` Name`arity `` for constructed generics).
    #[must_use]
    pub fn link_key(&self) -> String {
        if self.args.is_empty() {
            self.name.clone()
        } else {
            format!("{}`{}", self.name, self.args.len())
        }
    }

    /// Short name without the namespace.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(_, short)| short)
    }
}

impl From<&TypeSig> for TypeRef {
    fn from(sig: &TypeSig) -> Self {
        Self {
            name: sig.name.clone(),
            args: sig.args.iter().map(Self::from).collect(),
        }
    }
}

/// Output-relative page path for a type name.
///
/// One file per type under its namespace directory; generic types get an
/// arity suffix so `Widget` and `Widget<T>` never collide:
/// `Acme/Widget.md`, `Acme/Widget-1.md`. This rule is shared by the renderer
/// and the cross-reference resolver so external links can be constructed
/// without reading external content.
#[must_use]
pub fn type_page_path(full_name: &str, arity: u32) -> String {
    let (namespace, short) = full_name
        .rsplit_once('.')
        .map_or(("", full_name), |(ns, short)| (ns, short));
    let file = if arity > 0 {
        format!("{short}-{arity}.md")
    } else {
        format!("{short}.md")
    };
    if namespace.is_empty() {
        file
    } else {
        format!("{namespace}/{file}")
    }
}
