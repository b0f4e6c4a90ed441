//! Page assembly.
//!
//! Rendering is a pure function from a built model to an ordered list of
//! [`RenderedDocument`]s; it never touches storage. The same model and
//! options always produce byte-identical output: iteration follows the
//! model's stable ordering and nothing here consults clocks, locales, or
//! randomness.
//!
//! Output layout:
//! - `index.md` — assembly root: every namespace with its types
//! - `{Namespace}/index.md` — per-namespace index, only for namespaces above
//!   the type-count threshold
//! - `{Namespace}/{Type}.md` (`{Type}-{arity}.md` for generics) — one page
//!   per type

use std::collections::HashSet;

use xmdoc_model::{AssemblyDoc, LinkIndex, MemberDoc, MemberKind, NamespaceDoc, TypeDoc};

use crate::display::{
    escape, member_declaration, member_heading, text_markdown, type_declaration, type_markdown,
};
use crate::document::{Newline, RenderedDocument};
use crate::links::{relative_link, relative_to};

/// Section order on a type page.
const MEMBER_SECTIONS: [MemberKind; 6] = [
    MemberKind::Constructor,
    MemberKind::Field,
    MemberKind::Property,
    MemberKind::Method,
    MemberKind::Operator,
    MemberKind::Event,
];

/// Rendering options.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Newline convention for rendered content.
    pub newline: Newline,
    /// Emit the assembly root `index.md`.
    pub emit_root_index: bool,
    /// Emit a per-namespace index when a namespace holds more types than
    /// this.
    pub namespace_index_threshold: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            newline: Newline::Lf,
            emit_root_index: true,
            namespace_index_threshold: 8,
        }
    }
}

/// Rendering failure.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Two pages computed the same output path.
    #[error("two pages rendered to the same path: {0}")]
    DuplicatePath(String),
}

/// Render the complete page set for an assembly.
///
/// Pages come out in a stable order: the root index, then each namespace's
/// index (when thresholded) followed by its type pages.
///
/// # Errors
///
/// Returns [`RenderError::DuplicatePath`] when two pages collide on the same
/// output path, which indicates duplicate type identities in the model.
pub fn render(
    assembly: &AssemblyDoc,
    links: &LinkIndex,
    options: &RenderOptions,
) -> Result<Vec<RenderedDocument>, RenderError> {
    let mut pages: Vec<(String, String)> = Vec::new();

    if options.emit_root_index {
        pages.push(("index.md".to_owned(), root_index(assembly, options)));
    }

    for ns in &assembly.namespaces {
        if has_namespace_index(ns, options) {
            let path = format!("{}/index.md", ns.name);
            pages.push((path.clone(), namespace_index(ns, &path)));
        }
        for ty in &ns.types {
            let path = ty.page_path();
            let content = type_page(assembly, ty, links, options, &path);
            pages.push((path, content));
        }
    }

    let mut seen = HashSet::new();
    for (path, _) in &pages {
        if !seen.insert(path.clone()) {
            return Err(RenderError::DuplicatePath(path.clone()));
        }
    }

    tracing::info!(
        assembly = %assembly.name,
        page_count = pages.len(),
        "Rendered documentation pages"
    );

    Ok(pages
        .into_iter()
        .map(|(path, content)| RenderedDocument::new(path, &content, options.newline))
        .collect())
}

/// The global namespace shares the root index; it never gets its own.
fn has_namespace_index(ns: &NamespaceDoc, options: &RenderOptions) -> bool {
    !ns.name.is_empty() && ns.types.len() > options.namespace_index_threshold
}

fn namespace_heading(ns: &NamespaceDoc) -> &str {
    if ns.name.is_empty() { "Global" } else { &ns.name }
}

fn root_index(assembly: &AssemblyDoc, options: &RenderOptions) -> String {
    let mut out = format!("# {} assembly\n", escape(&assembly.name));
    if let Some(version) = &assembly.version {
        out.push_str(&format!("\nVersion: {version}\n"));
    }

    for ns in &assembly.namespaces {
        let heading = if has_namespace_index(ns, options) {
            format!("[{}]({}/index.md)", escape(namespace_heading(ns)), ns.name)
        } else {
            escape(namespace_heading(ns))
        };
        out.push_str(&format!("\n## {heading} namespace\n\n"));
        for ty in &ns.types {
            out.push_str(&format!(
                "- {} [{}]({})\n",
                ty.kind.display(),
                escape(&ty.display_name()),
                ty.page_path()
            ));
        }
    }
    out
}

fn namespace_index(ns: &NamespaceDoc, from_page: &str) -> String {
    let mut out = format!("# {} namespace\n\n", escape(&ns.name));
    for ty in &ns.types {
        out.push_str(&format!(
            "- {} [{}]({})\n",
            ty.kind.display(),
            escape(&ty.display_name()),
            relative_to(from_page, &ty.page_path())
        ));
    }
    out
}

fn type_page(
    assembly: &AssemblyDoc,
    ty: &TypeDoc,
    links: &LinkIndex,
    options: &RenderOptions,
    from_page: &str,
) -> String {
    let mut out = format!("# {} {}\n", escape(&ty.display_name()), ty.kind.display());

    if let Some(summary) = ty.comment.as_ref().and_then(|c| c.summary.as_ref()) {
        out.push_str(&format!("\n{}\n", text_markdown(summary, links, from_page)));
    }

    out.push_str(&format!("\n```csharp\n{}\n```\n", type_declaration(ty)));

    out.push_str(&format!("\n**Namespace:** {}\n", namespace_line(assembly, ty, options)));
    out.push_str(&format!("\n**Assembly:** {}\n", escape(&assembly.name)));
    if let Some(source) = &ty.source {
        out.push_str(&format!(
            "\n**Source:** [{}:{}]({}#L{})\n",
            escape(&source.file),
            source.line,
            source.file,
            source.line
        ));
    }

    if let Some(remarks) = ty.comment.as_ref().and_then(|c| c.remarks.as_ref()) {
        out.push_str("\n## Remarks\n\n");
        out.push_str(&text_markdown(remarks, links, from_page));
        out.push('\n');
    }
    if let Some(example) = ty.comment.as_ref().and_then(|c| c.example.as_ref()) {
        out.push_str("\n## Examples\n\n");
        out.push_str(&text_markdown(example, links, from_page));
        out.push('\n');
    }

    for kind in MEMBER_SECTIONS {
        let members: Vec<&MemberDoc> = ty.members.iter().filter(|m| m.kind == kind).collect();
        if members.is_empty() {
            continue;
        }
        out.push_str(&format!("\n## {}\n", kind.heading()));
        for member in members {
            out.push_str(&member_section(member, links, from_page));
        }
    }

    out.push_str(&see_also(ty, links, options, from_page));
    out
}

/// The namespace line links to the namespace index when one is rendered.
fn namespace_line(assembly: &AssemblyDoc, ty: &TypeDoc, options: &RenderOptions) -> String {
    let ns_name = ty.namespace();
    let has_index = assembly
        .namespaces
        .iter()
        .find(|ns| ns.name == ns_name)
        .is_some_and(|ns| has_namespace_index(ns, options));
    if has_index {
        format!("[{}](index.md)", escape(ns_name))
    } else if ns_name.is_empty() {
        "Global".to_owned()
    } else {
        escape(ns_name)
    }
}

fn member_section(member: &MemberDoc, links: &LinkIndex, from_page: &str) -> String {
    let mut out = format!("\n### {}\n", escape(&member_heading(member)));

    if let Some(summary) = member.comment.as_ref().and_then(|c| c.summary.as_ref()) {
        out.push_str(&format!("\n{}\n", text_markdown(summary, links, from_page)));
    }

    out.push_str(&format!("\n```csharp\n{}\n```\n", member_declaration(member)));

    if let Some(source) = &member.source {
        out.push_str(&format!(
            "\n**Source:** [{}:{}]({}#L{})\n",
            escape(&source.file),
            source.line,
            source.file,
            source.line
        ));
    }

    if !member.params.is_empty() {
        out.push_str("\n#### Parameters\n\n");
        out.push_str("| Name | Type | Description |\n| --- | --- | --- |\n");
        for param in &member.params {
            let description = member
                .comment
                .as_ref()
                .and_then(|c| c.param(&param.name))
                .map(|text| text_markdown(text, links, from_page))
                .unwrap_or_default();
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                escape(&param.name),
                type_markdown(&param.ty, links, from_page),
                description
            ));
        }
    }

    let returns_text = member.comment.as_ref().and_then(|c| c.returns.as_ref());
    let returns_type = member
        .returns
        .as_ref()
        .filter(|r| r.name != "System.Void" && member.kind != MemberKind::Constructor);
    if returns_type.is_some() || returns_text.is_some() {
        out.push_str("\n#### Returns\n");
        if let Some(r) = returns_type {
            out.push_str(&format!("\n{}\n", type_markdown(r, links, from_page)));
        }
        if let Some(text) = returns_text {
            out.push_str(&format!("\n{}\n", text_markdown(text, links, from_page)));
        }
    }

    let exceptions = member
        .comment
        .as_ref()
        .map(|c| c.exceptions.as_slice())
        .unwrap_or_default();
    if !exceptions.is_empty() {
        out.push_str("\n#### Exceptions\n\n");
        out.push_str("| Exception | Condition |\n| --- | --- |\n");
        for (name, text) in exceptions {
            let display = escape(crate::display::short_of(name));
            let link = relative_link(from_page, links.resolve(name));
            let exception = match link {
                Some(url) => format!("[{display}]({url})"),
                None => display,
            };
            out.push_str(&format!(
                "| {exception} | {} |\n",
                text_markdown(text, links, from_page)
            ));
        }
    }

    if let Some(example) = member.comment.as_ref().and_then(|c| c.example.as_ref()) {
        out.push_str("\n#### Example\n\n");
        out.push_str(&text_markdown(example, links, from_page));
        out.push('\n');
    }

    out
}

/// Base type and interfaces that resolve to pages, as a trailing section.
fn see_also(
    ty: &TypeDoc,
    links: &LinkIndex,
    options: &RenderOptions,
    from_page: &str,
) -> String {
    let mut entries = Vec::new();
    for r in ty.base.iter().chain(ty.interfaces.iter()) {
        if let Some(url) = relative_link(from_page, links.resolve_ref(r)) {
            entries.push(format!("- [{}]({url})\n", escape(r.short_name())));
        }
    }
    if options.emit_root_index {
        entries.push(format!(
            "- [Assembly index]({})\n",
            relative_to(from_page, "index.md")
        ));
    }
    if entries.is_empty() {
        return String::new();
    }
    format!("\n## See also\n\n{}", entries.concat())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use xmdoc_comments::{Inline, NarrativeBundle};
    use xmdoc_model::{ParamDoc, TypeKind, TypeRef};

    use super::*;

    fn text(s: &str) -> Vec<Inline> {
        vec![Inline::Text(s.to_owned())]
    }

    fn type_doc(full_name: &str) -> TypeDoc {
        TypeDoc {
            id: format!("T:{full_name}"),
            full_name: full_name.to_owned(),
            kind: TypeKind::Class,
            arity: 0,
            type_params: Vec::new(),
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            comment: None,
            source: None,
        }
    }

    fn resize_method() -> MemberDoc {
        MemberDoc {
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
            returns: Some(TypeRef::new("System.Void")),
            comment: Some(NarrativeBundle {
                summary: Some(text("Resizes the widget.")),
                params: vec![("size".to_owned(), text("The new size."))],
                exceptions: vec![(
                    "Acme.WidgetException".to_owned(),
                    text("Thrown when size is negative."),
                )],
                ..Default::default()
            }),
            source: None,
        }
    }

    fn widget_assembly() -> AssemblyDoc {
        let mut widget = type_doc("Acme.Widget");
        widget.comment = Some(NarrativeBundle {
            summary: Some(text("A resizable widget.")),
            ..Default::default()
        });
        widget.members.push(resize_method());
        AssemblyDoc {
            name: "Acme".to_owned(),
            version: Some("1.2.3".to_owned()),
            namespaces: vec![NamespaceDoc {
                name: "Acme".to_owned(),
                types: vec![widget, type_doc("Acme.WidgetException")],
            }],
        }
    }

    #[test]
    fn test_render_page_set_and_order() {
        let assembly = widget_assembly();
        let links = LinkIndex::build(&assembly, &[]);

        let docs = render(&assembly, &links, &RenderOptions::default()).unwrap();
        let paths: Vec<&str> = docs.iter().map(|d| d.path.as_str()).collect();

        assert_eq!(
            paths,
            vec!["index.md", "Acme/Widget.md", "Acme/WidgetException.md"]
        );
    }

    #[test]
    fn test_root_index_lists_types() {
        let assembly = widget_assembly();
        let links = LinkIndex::build(&assembly, &[]);

        let docs = render(&assembly, &links, &RenderOptions::default()).unwrap();
        let index = &docs[0].content;

        assert!(index.starts_with("# Acme assembly\n"));
        assert!(index.contains("Version: 1.2.3"));
        assert!(index.contains("## Acme namespace"));
        assert!(index.contains("- class [Widget](Acme/Widget.md)"));
    }

    #[test]
    fn test_type_page_member_rendering() {
        let assembly = widget_assembly();
        let links = LinkIndex::build(&assembly, &[]);

        let docs = render(&assembly, &links, &RenderOptions::default()).unwrap();
        let widget = &docs[1].content;

        assert!(widget.starts_with("# Widget class\n"));
        assert!(widget.contains("A resizable widget."));
        assert!(widget.contains("### Resize(int)"));
        assert!(widget.contains("public void Resize(int size)"));
        assert!(widget.contains("| size | int | The new size. |"));
        // Exception type links relative to the page's own directory.
        assert!(
            widget.contains("| [WidgetException](WidgetException.md) | Thrown when size is negative. |")
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let assembly = widget_assembly();
        let links = LinkIndex::build(&assembly, &[]);
        let options = RenderOptions::default();

        let first = render(&assembly, &links, &options).unwrap();
        let second = render(&assembly, &links, &options).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_namespace_index_above_threshold() {
        let types: Vec<TypeDoc> = (0..3)
            .map(|i| type_doc(&format!("Acme.Type{i}")))
            .collect();
        let assembly = AssemblyDoc {
            name: "Acme".to_owned(),
            version: None,
            namespaces: vec![NamespaceDoc {
                name: "Acme".to_owned(),
                types,
            }],
        };
        let links = LinkIndex::build(&assembly, &[]);
        let options = RenderOptions {
            namespace_index_threshold: 2,
            ..RenderOptions::default()
        };

        let docs = render(&assembly, &links, &options).unwrap();
        let paths: Vec<&str> = docs.iter().map(|d| d.path.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                "index.md",
                "Acme/index.md",
                "Acme/Type0.md",
                "Acme/Type1.md",
                "Acme/Type2.md"
            ]
        );
        // Namespace index links are directory-relative.
        assert!(docs[1].content.contains("- class [Type0](Type0.md)"));
        // Root index heading links to the namespace index.
        assert!(docs[0].content.contains("## [Acme](Acme/index.md) namespace"));
        // Type pages link the namespace line to the index.
        assert!(docs[2].content.contains("**Namespace:** [Acme](index.md)"));
    }

    #[test]
    fn test_no_root_index_when_disabled() {
        let assembly = widget_assembly();
        let links = LinkIndex::build(&assembly, &[]);
        let options = RenderOptions {
            emit_root_index: false,
            ..RenderOptions::default()
        };

        let docs = render(&assembly, &links, &options).unwrap();

        assert!(docs.iter().all(|d| d.path != "index.md"));
        assert!(!docs[0].content.contains("## See also"));
    }

    #[test]
    fn test_duplicate_path_is_an_error() {
        let assembly = AssemblyDoc {
            name: "Acme".to_owned(),
            version: None,
            namespaces: vec![NamespaceDoc {
                name: "Acme".to_owned(),
                types: vec![type_doc("Acme.Widget"), type_doc("Acme.Widget")],
            }],
        };
        let links = LinkIndex::build(&assembly, &[]);

        let err = render(&assembly, &links, &RenderOptions::default()).unwrap_err();

        assert!(matches!(err, RenderError::DuplicatePath(path) if path == "Acme/Widget.md"));
    }

    #[test]
    fn test_generic_type_page_path_and_heading() {
        let mut pair = type_doc("Acme.Pair");
        pair.arity = 2;
        pair.type_params = vec!["TKey".to_owned(), "TValue".to_owned()];
        let assembly = AssemblyDoc {
            name: "Acme".to_owned(),
            version: None,
            namespaces: vec![NamespaceDoc {
                name: "Acme".to_owned(),
                types: vec![pair],
            }],
        };
        let links = LinkIndex::build(&assembly, &[]);

        let docs = render(&assembly, &links, &RenderOptions::default()).unwrap();

        assert_eq!(docs[1].path, "Acme/Pair-2.md");
        assert!(docs[1].content.starts_with("# Pair\\<TKey, TValue\\> class\n"));
    }

    #[test]
    fn test_see_also_links_base_type() {
        let mut widget = type_doc("Acme.Widget");
        widget.base = Some(TypeRef::new("Acme.Entity"));
        let assembly = AssemblyDoc {
            name: "Acme".to_owned(),
            version: None,
            namespaces: vec![NamespaceDoc {
                name: "Acme".to_owned(),
                types: vec![widget, type_doc("Acme.Entity")],
            }],
        };
        let links = LinkIndex::build(&assembly, &[]);

        let docs = render(&assembly, &links, &RenderOptions::default()).unwrap();
        let page = &docs[1].content;

        assert!(page.contains("## See also"));
        assert!(page.contains("- [Entity](Entity.md)"));
        assert!(page.contains("- [Assembly index](../index.md)"));
    }
}
