//! Documentation identifier generation.
//!
//! Builds the canonical identifier strings XML documentation files use to key
//! narrative comments: `T:Ns.Type` for types, `M:Ns.Type.Method(System.Int32)`
//! for methods, `P:`/`F:`/`E:` for properties, fields, and events.
//! Constructors use `#ctor` (`#cctor` for static constructors). Generic arity
//! is encoded with backticks on the declaring name, and generic parameters in
//! parameter positions are encoded positionally: `` `0 `` for the declaring
//! type's parameters, ```` ``0 ```` for the member's own.

use crate::metadata::{MemberKind, MemberMetadata, TypeMetadata, TypeSig};

/// Documentation identifier for a type.
#[must_use]
pub fn type_id(ty: &TypeMetadata) -> String {
    format!("T:{}", name_with_arity(&ty.name, ty.arity))
}

/// Documentation identifier for a member of `ty`.
#[must_use]
pub fn member_id(ty: &TypeMetadata, member: &MemberMetadata) -> String {
    let prefix = match member.kind {
        MemberKind::Constructor | MemberKind::Method | MemberKind::Operator => 'M',
        MemberKind::Property => 'P',
        MemberKind::Field => 'F',
        MemberKind::Event => 'E',
    };

    let member_name = match member.kind {
        MemberKind::Constructor if member.is_static => "#cctor",
        MemberKind::Constructor => "#ctor",
        _ => member.name.as_str(),
    };

    let mut id = format!(
        "{prefix}:{}.{member_name}",
        name_with_arity(&ty.name, ty.arity)
    );
    if member.arity > 0 {
        id.push_str(&format!("``{}", member.arity));
    }
    if !member.params.is_empty() {
        let params = member
            .params
            .iter()
            .map(|p| encode_sig(&p.ty, &ty.type_params, &member.type_params))
            .collect::<Vec<_>>()
            .join(",");
        id.push('(');
        id.push_str(&params);
        id.push(')');
    }
    id
}

/// Append the backtick arity marker to a declaring name.
fn name_with_arity(name: &str, arity: u32) -> String {
    if arity > 0 {
        format!("{name}`{arity}")
    } else {
        name.to_owned()
    }
}

/// Encode a parameter type signature.
///
/// Generic parameters resolve to positional placeholders; constructed
/// generics use `{...}` around their encoded arguments.
fn encode_sig(sig: &TypeSig, type_params: &[String], method_params: &[String]) -> String {
    if let Some(index) = method_params.iter().position(|p| *p == sig.name) {
        return format!("``{index}");
    }
    if let Some(index) = type_params.iter().position(|p| *p == sig.name) {
        return format!("`{index}");
    }

    if sig.args.is_empty() {
        sig.name.clone()
    } else {
        let args = sig
            .args
            .iter()
            .map(|a| encode_sig(a, type_params, method_params))
            .collect::<Vec<_>>()
            .join(",");
        format!("{}{{{args}}}", sig.name)
    }
}
