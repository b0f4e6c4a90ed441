//! Display formatting: type names, declarations, and narrative text.
//!
//! Declarations render in C# surface syntax inside fenced code blocks, so
//! well-known framework types display as their language keywords (`int`, not
//! `System.Int32`). Narrative text renders as Markdown with cross-reference
//! markers turned into relative links where the link index resolves them.

use xmdoc_comments::{Inline, Text};
use xmdoc_model::{LinkIndex, MemberDoc, MemberKind, TypeDoc, TypeRef};

use crate::links::relative_link;

/// C# keyword for a well-known framework type name.
pub(crate) fn keyword(name: &str) -> Option<&'static str> {
    Some(match name {
        "System.Void" => "void",
        "System.Boolean" => "bool",
        "System.Byte" => "byte",
        "System.SByte" => "sbyte",
        "System.Char" => "char",
        "System.Int16" => "short",
        "System.UInt16" => "ushort",
        "System.Int32" => "int",
        "System.UInt32" => "uint",
        "System.Int64" => "long",
        "System.UInt64" => "ulong",
        "System.Single" => "float",
        "System.Double" => "double",
        "System.Decimal" => "decimal",
        "System.String" => "string",
        "System.Object" => "object",
        _ => return None,
    })
}

/// Plain display form of a type reference (`List<int>`), for code blocks.
pub(crate) fn type_display(r: &TypeRef) -> String {
    let name = keyword(&r.name).unwrap_or_else(|| r.short_name());
    if r.args.is_empty() {
        name.to_owned()
    } else {
        let args: Vec<String> = r.args.iter().map(type_display).collect();
        format!("{name}<{}>", args.join(", "))
    }
}

/// Markdown form of a type reference, linking every resolvable name.
///
/// The outer name links when it resolves; generic arguments resolve
/// independently, so `List<Gadget>` can carry a link on `Gadget` alone.
pub(crate) fn type_markdown(r: &TypeRef, links: &LinkIndex, from_page: &str) -> String {
    let name = escape(keyword(&r.name).unwrap_or_else(|| r.short_name()));
    let linked = match relative_link(from_page, links.resolve_ref(r)) {
        Some(url) => format!("[{name}]({url})"),
        None => name,
    };
    if r.args.is_empty() {
        linked
    } else {
        let args: Vec<String> = r
            .args
            .iter()
            .map(|a| type_markdown(a, links, from_page))
            .collect();
        format!("{linked}\\<{}\\>", args.join(", "))
    }
}

/// Escape Markdown-significant characters in display text.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '<' | '>' | '*' | '_' | '`' | '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Heading text for a member: `Resize(int)` for parameterized members,
/// the bare name otherwise. Overloads stay distinguishable and anchorable.
pub(crate) fn member_heading(member: &MemberDoc) -> String {
    match member.kind {
        MemberKind::Constructor | MemberKind::Method | MemberKind::Operator => {
            let mut name = member.name.clone();
            if !member.type_params.is_empty() {
                name = format!("{name}<{}>", member.type_params.join(", "));
            }
            let params: Vec<String> = member.params.iter().map(|p| type_display(&p.ty)).collect();
            format!("{name}({})", params.join(", "))
        }
        MemberKind::Property | MemberKind::Field | MemberKind::Event => member.name.clone(),
    }
}

/// C# declaration line for a type, for the fenced code block.
pub(crate) fn type_declaration(ty: &TypeDoc) -> String {
    let mut decl = format!("public {} {}", ty.kind.display(), ty.display_name());
    let mut bases: Vec<String> = Vec::new();
    if let Some(base) = &ty.base {
        if base.name != "System.Object" {
            bases.push(type_display(base));
        }
    }
    bases.extend(ty.interfaces.iter().map(type_display));
    if !bases.is_empty() {
        decl.push_str(" : ");
        decl.push_str(&bases.join(", "));
    }
    decl
}

/// C# declaration line for a member, for the fenced code block.
pub(crate) fn member_declaration(member: &MemberDoc) -> String {
    let mut decl = String::from("public ");
    if member.is_static {
        decl.push_str("static ");
    }

    let returns = member
        .returns
        .as_ref()
        .map_or_else(|| "void".to_owned(), type_display);
    let params: Vec<String> = member
        .params
        .iter()
        .map(|p| format!("{} {}", type_display(&p.ty), p.name))
        .collect();
    let generics = if member.type_params.is_empty() {
        String::new()
    } else {
        format!("<{}>", member.type_params.join(", "))
    };

    match member.kind {
        MemberKind::Constructor => {
            decl.push_str(&format!("{}({})", member.name, params.join(", ")));
        }
        MemberKind::Method | MemberKind::Operator => {
            decl.push_str(&format!(
                "{returns} {}{generics}({})",
                member.name,
                params.join(", ")
            ));
        }
        MemberKind::Property | MemberKind::Field => {
            decl.push_str(&format!("{returns} {}", member.name));
        }
        MemberKind::Event => {
            decl.push_str(&format!("event {returns} {}", member.name));
        }
    }
    decl
}

/// Render narrative text as a Markdown fragment.
pub(crate) fn text_markdown(text: &Text, links: &LinkIndex, from_page: &str) -> String {
    let mut out = String::new();
    for node in text {
        match node {
            Inline::Text(t) => out.push_str(t),
            Inline::Code(code) => {
                out.push('`');
                out.push_str(code);
                out.push('`');
            }
            Inline::See { cref } => out.push_str(&see_markdown(node, cref, links, from_page)),
            Inline::ParamRef(name) => {
                out.push('`');
                out.push_str(name);
                out.push('`');
            }
        }
    }
    out
}

/// A `<see>` marker: a relative link when the index resolves the type, the
/// short name otherwise. Member references render as inline code.
fn see_markdown(node: &Inline, cref: &str, links: &LinkIndex, from_page: &str) -> String {
    let Some(type_name) = node.see_type_name() else {
        let id = cref.split_once(':').map_or(cref, |(_, rest)| rest);
        return format!("`{id}`");
    };
    let short = escape(short_of(type_name));
    match relative_link(from_page, links.resolve(type_name)) {
        Some(url) => format!("[{short}]({url})"),
        None => short,
    }
}

/// Short display name of a possibly arity-suffixed full name.
pub(crate) fn short_of(name: &str) -> &str {
    let short = name.rsplit_once('.').map_or(name, |(_, short)| short);
    short.split_once('`').map_or(short, |(base, _)| base)
}
