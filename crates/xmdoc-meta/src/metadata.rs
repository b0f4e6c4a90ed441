//! Serde model for assembly metadata dumps.
//!
//! These types mirror the JSON emitted by the companion extraction step: the
//! assembly identity plus a flat list of type entries with their members.
//! Type names are namespace-qualified with dots (nested types included), and
//! generic arity is carried separately from the name.

use serde::Deserialize;

/// Identity of a compiled assembly.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AssemblyIdentity {
    /// Simple assembly name (e.g., `Acme.Widgets`).
    pub name: String,
    /// Assembly version, if recorded in the dump.
    #[serde(default)]
    pub version: Option<String>,
}

/// Complete metadata for one compiled assembly.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AssemblyMetadata {
    /// Assembly identity.
    pub assembly: AssemblyIdentity,
    /// Every type in the assembly, in dump order.
    #[serde(default)]
    pub types: Vec<TypeMetadata>,
}

/// Kind of a declared type.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Reference type.
    Class,
    /// Value type.
    Struct,
    /// Interface.
    Interface,
    /// Enumeration.
    Enum,
    /// Delegate type.
    Delegate,
}

impl TypeKind {
    /// Lowercase display name (`class`, `struct`, ...).
    #[must_use]
    pub fn display(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Delegate => "delegate",
        }
    }
}

/// Kind of a type member.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    /// Instance or static constructor.
    Constructor,
    /// Ordinary method.
    Method,
    /// Property (including indexers).
    Property,
    /// Field or enum member.
    Field,
    /// Event.
    Event,
    /// Operator overload.
    Operator,
}

impl MemberKind {
    /// Stable ordering rank used when sorting members within a type.
    ///
    /// Constructors first, then fields, properties, methods, operators,
    /// events. This is a documentation-page ordering, not a source ordering.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Constructor => 0,
            Self::Field => 1,
            Self::Property => 2,
            Self::Method => 3,
            Self::Operator => 4,
            Self::Event => 5,
        }
    }

    /// Plural section heading used on rendered pages.
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Constructor => "Constructors",
            Self::Field => "Fields",
            Self::Property => "Properties",
            Self::Method => "Methods",
            Self::Operator => "Operators",
            Self::Event => "Events",
        }
    }
}

/// Declared visibility of a type or member.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible everywhere.
    #[default]
    Public,
    /// Visible to derived types (`protected`).
    Family,
    /// Visible within the assembly (`internal`).
    Assembly,
    /// Private.
    Private,
}

impl Visibility {
    /// Whether the entity is visible outside its assembly.
    ///
    /// Only externally visible entities are documented.
    #[must_use]
    pub fn is_externally_visible(self) -> bool {
        matches!(self, Self::Public | Self::Family)
    }
}

/// A type signature: a namespace-qualified name plus generic arguments.
///
/// Generic parameters appear by their declared name (e.g., `T`), without a
/// namespace. Constructed generics carry their arguments recursively:
/// `List<int>` is `{ name: "System.Collections.Generic.List", args: [Int32] }`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Hash)]
pub struct TypeSig {
    /// Namespace-qualified type name, or a bare generic-parameter name.
    pub name: String,
    /// Generic arguments, empty for non-generic signatures.
    #[serde(default)]
    pub args: Vec<TypeSig>,
}

impl TypeSig {
    /// Create a non-generic signature.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Create a constructed generic signature.
    #[must_use]
    pub fn generic(name: impl Into<String>, args: Vec<TypeSig>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Metadata for one declared type.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct TypeMetadata {
    /// Namespace-qualified type name (nested types joined with dots).
    pub name: String,
    /// Type kind.
    pub kind: TypeKind,
    /// Declared visibility.
    #[serde(default)]
    pub visibility: Visibility,
    /// True for compiler-generated types.
    #[serde(default)]
    pub synthetic: bool,
    /// Number of generic parameters.
    #[serde(default)]
    pub arity: u32,
    /// Generic parameter names, in declaration order.
    #[serde(default)]
    pub type_params: Vec<String>,
    /// Base type, if any.
    #[serde(default)]
    pub base: Option<TypeSig>,
    /// Directly declared interfaces.
    #[serde(default)]
    pub interfaces: Vec<TypeSig>,
    /// Declared members, in dump order.
    #[serde(default)]
    pub members: Vec<MemberMetadata>,
}

impl TypeMetadata {
    /// Create a type entry with defaults (public, non-generic, no members).
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: Visibility::Public,
            synthetic: false,
            arity: 0,
            type_params: Vec::new(),
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Add a member.
    #[must_use]
    pub fn with_member(mut self, member: MemberMetadata) -> Self {
        self.members.push(member);
        self
    }

    /// Set the base type.
    #[must_use]
    pub fn with_base(mut self, base: TypeSig) -> Self {
        self.base = Some(base);
        self
    }

    /// Set generic parameters (arity follows the list length).
    #[must_use]
    pub fn with_type_params(mut self, params: Vec<String>) -> Self {
        self.arity = u32::try_from(params.len()).unwrap_or(u32::MAX);
        self.type_params = params;
        self
    }
}

/// Metadata for one member of a type.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct MemberMetadata {
    /// Member name (`.ctor` entries use the declaring type's short name
    /// convention of the dump; xmdoc keys constructors by kind, not name).
    pub name: String,
    /// Member kind.
    pub kind: MemberKind,
    /// Declared visibility.
    #[serde(default)]
    pub visibility: Visibility,
    /// True for compiler-generated members (accessors, closures, ...).
    #[serde(default)]
    pub synthetic: bool,
    /// True for static members.
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Number of generic parameters declared by the member itself.
    #[serde(default)]
    pub arity: u32,
    /// Generic parameter names declared by the member itself.
    #[serde(default)]
    pub type_params: Vec<String>,
    /// Parameters, in declaration order.
    #[serde(default)]
    pub params: Vec<ParamMetadata>,
    /// Return or value type. `None` for constructors and void methods.
    #[serde(default)]
    pub returns: Option<TypeSig>,
}

impl MemberMetadata {
    /// Create a member entry with defaults (public, instance, no params).
    #[must_use]
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: Visibility::Public,
            synthetic: false,
            is_static: false,
            arity: 0,
            type_params: Vec::new(),
            params: Vec::new(),
            returns: None,
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, ty: TypeSig) -> Self {
        self.params.push(ParamMetadata {
            name: name.into(),
            ty,
        });
        self
    }

    /// Set the return type.
    #[must_use]
    pub fn with_returns(mut self, ty: TypeSig) -> Self {
        self.returns = Some(ty);
        self
    }

    /// Mark as static.
    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// One declared parameter.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ParamMetadata {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    #[serde(rename = "type")]
    pub ty: TypeSig,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_visibility_externally_visible() {
        assert!(Visibility::Public.is_externally_visible());
        assert!(Visibility::Family.is_externally_visible());
        assert!(!Visibility::Assembly.is_externally_visible());
        assert!(!Visibility::Private.is_externally_visible());
    }

    #[test]
    fn test_member_kind_rank_order() {
        let mut kinds = vec![
            MemberKind::Event,
            MemberKind::Method,
            MemberKind::Constructor,
            MemberKind::Property,
            MemberKind::Operator,
            MemberKind::Field,
        ];
        kinds.sort_by_key(|k| k.rank());

        assert_eq!(
            kinds,
            vec![
                MemberKind::Constructor,
                MemberKind::Field,
                MemberKind::Property,
                MemberKind::Method,
                MemberKind::Operator,
                MemberKind::Event,
            ]
        );
    }

    #[test]
    fn test_deserialize_minimal_type() {
        let json = r#"{
            "assembly": { "name": "Acme" },
            "types": [
                { "name": "Acme.Widget", "kind": "class" }
            ]
        }"#;
        let meta: AssemblyMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(meta.assembly.name, "Acme");
        assert_eq!(meta.assembly.version, None);
        assert_eq!(meta.types.len(), 1);
        assert_eq!(meta.types[0].kind, TypeKind::Class);
        assert_eq!(meta.types[0].visibility, Visibility::Public);
        assert!(!meta.types[0].synthetic);
        assert!(meta.types[0].members.is_empty());
    }

    #[test]
    fn test_deserialize_member_with_params() {
        let json = r#"{
            "name": "Resize",
            "kind": "method",
            "static": false,
            "params": [
                { "name": "size", "type": { "name": "System.Int32" } }
            ],
            "returns": { "name": "System.Void" }
        }"#;
        let member: MemberMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(member.kind, MemberKind::Method);
        assert_eq!(member.params.len(), 1);
        assert_eq!(member.params[0].name, "size");
        assert_eq!(member.params[0].ty, TypeSig::new("System.Int32"));
    }

    #[test]
    fn test_deserialize_constructed_generic_sig() {
        let json = r#"{
            "name": "System.Collections.Generic.List",
            "args": [{ "name": "System.Int32" }]
        }"#;
        let sig: TypeSig = serde_json::from_str(json).unwrap();

        assert_eq!(
            sig,
            TypeSig::generic(
                "System.Collections.Generic.List",
                vec![TypeSig::new("System.Int32")]
            )
        );
    }

    #[test]
    fn test_type_builder_helpers() {
        let ty = TypeMetadata::new("Acme.Pair", TypeKind::Class)
            .with_type_params(vec!["TKey".to_owned(), "TValue".to_owned()])
            .with_base(TypeSig::new("System.Object"))
            .with_member(MemberMetadata::new("Swap", MemberKind::Method));

        assert_eq!(ty.arity, 2);
        assert_eq!(ty.type_params, vec!["TKey", "TValue"]);
        assert_eq!(ty.base, Some(TypeSig::new("System.Object")));
        assert_eq!(ty.members.len(), 1);
    }
}
