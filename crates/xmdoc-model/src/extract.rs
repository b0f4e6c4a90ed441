//! Metadata extraction.
//!
//! Adapts raw [`AssemblyMetadata`] into bare [`TypeDoc`]s: filters to
//! externally visible, non-synthetic entities, normalizes constructor names,
//! and applies the stable documentation ordering. Comments and links are
//! attached later by the builder.
//!
//! A single malformed type or member never aborts extraction; it is skipped
//! with a recorded message.

use xmdoc_meta::{
    AssemblyMetadata, MemberKind, MemberMetadata, TypeMetadata, Visibility, doc_id,
};

use crate::doc::{MemberDoc, ParamDoc, TypeDoc, TypeRef};

/// Extraction output: bare types plus recoverable-anomaly messages.
pub(crate) struct Extracted {
    pub types: Vec<TypeDoc>,
    pub messages: Vec<String>,
}

/// Extract documentable types from raw metadata, in stable order.
pub(crate) fn extract(meta: &AssemblyMetadata) -> Extracted {
    let mut types = Vec::new();
    let mut messages = Vec::new();

    for ty in &meta.types {
        if !is_documentable(ty.visibility, ty.synthetic, &ty.name) {
            continue;
        }
        if ty.name.is_empty() {
            let message = "Skipped type with empty name".to_owned();
            tracing::warn!("{message}");
            messages.push(message);
            continue;
        }
        types.push(extract_type(ty, &mut messages));
    }

    // Namespace name, then type name. Arity disambiguates same-named types.
    types.sort_by(|a, b| {
        a.namespace()
            .cmp(b.namespace())
            .then_with(|| a.short_name().cmp(b.short_name()))
            .then_with(|| a.arity.cmp(&b.arity))
    });

    Extracted { types, messages }
}

fn extract_type(ty: &TypeMetadata, messages: &mut Vec<String>) -> TypeDoc {
    let mut members = Vec::new();
    for member in &ty.members {
        if !is_documentable(member.visibility, member.synthetic, &member.name) {
            continue;
        }
        if member.name.is_empty() {
            let message = format!("Skipped unnamed member of {}", ty.name);
            tracing::warn!("{message}");
            messages.push(message);
            continue;
        }
        members.push(extract_member(ty, member));
    }

    // Member kind, then name, then parameter count and generic arity.
    members.sort_by(|a, b| {
        a.kind
            .rank()
            .cmp(&b.kind.rank())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.params.len().cmp(&b.params.len()))
            .then_with(|| a.arity.cmp(&b.arity))
    });

    TypeDoc {
        id: doc_id::type_id(ty),
        full_name: ty.name.clone(),
        kind: ty.kind,
        arity: ty.arity,
        type_params: ty.type_params.clone(),
        base: ty.base.as_ref().map(TypeRef::from),
        interfaces: ty.interfaces.iter().map(TypeRef::from).collect(),
        members,
        comment: None,
        source: None,
    }
}

fn extract_member(ty: &TypeMetadata, member: &MemberMetadata) -> MemberDoc {
    // Constructors display under the declaring type's short name.
    let name = if member.kind == MemberKind::Constructor {
        ty.name
            .rsplit_once('.')
            .map_or(ty.name.as_str(), |(_, short)| short)
            .to_owned()
    } else {
        member.name.clone()
    };

    MemberDoc {
        id: doc_id::member_id(ty, member),
        name,
        kind: member.kind,
        is_static: member.is_static,
        arity: member.arity,
        type_params: member.type_params.clone(),
        params: member
            .params
            .iter()
            .map(|p| ParamDoc {
                name: p.name.clone(),
                ty: TypeRef::from(&p.ty),
            })
            .collect(),
        returns: member.returns.as_ref().map(TypeRef::from),
        comment: None,
        source: None,
    }
}

/// Externally visible, not compiler-generated.
///
/// Compiler-generated entities are flagged in the dump; names containing `<`
/// (closures, state machines, backing fields) are excluded as a backstop.
fn is_documentable(visibility: Visibility, synthetic: bool, name: &str) -> bool {
    visibility.is_externally_visible() && !synthetic && !name.contains('<')
}
