//! Relative link computation.
//!
//! Every link in a rendered page is relative to the page's own directory, so
//! the output tree can be hosted under any prefix. External assembly pages
//! are addressed as siblings of the output root: from `Acme/Widget.md`, a
//! type in the `Contoso.Core` assembly links to
//! `../../Contoso.Core/Contoso.Core/Entity.md`.

use xmdoc_model::LinkTarget;

/// Relative URL from `from_page` to `target`, or `None` for unlinked targets.
pub(crate) fn relative_link(from_page: &str, target: &LinkTarget) -> Option<String> {
    match target {
        LinkTarget::Internal { page } => Some(relative_to(from_page, page)),
        LinkTarget::External { page } => {
            // Up and out of the output root, then into the sibling directory.
            let ups = from_page.matches('/').count() + 1;
            Some(format!("{}{page}", "../".repeat(ups)))
        }
        LinkTarget::Unlinked => None,
    }
}

/// Relative URL between two output-relative page paths.
pub(crate) fn relative_to(from_page: &str, to_page: &str) -> String {
    let mut from_dirs: Vec<&str> = from_page.split('/').collect();
    from_dirs.pop();
    let to_parts: Vec<&str> = to_page.split('/').collect();

    let common = from_dirs
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();
    let ups = from_dirs.len() - common;
    format!("{}{}", "../".repeat(ups), to_parts[common..].join("/"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_relative_to_same_directory() {
        assert_eq!(relative_to("Acme/Widget.md", "Acme/Gadget.md"), "Gadget.md");
    }

    #[test]
    fn test_relative_to_other_namespace() {
        assert_eq!(
            relative_to("Acme/Widget.md", "Acme.Util/Sorter.md"),
            "../Acme.Util/Sorter.md"
        );
    }

    #[test]
    fn test_relative_to_from_root_index() {
        assert_eq!(relative_to("index.md", "Acme/Widget.md"), "Acme/Widget.md");
    }

    #[test]
    fn test_relative_to_root_index_from_type_page() {
        assert_eq!(relative_to("Acme/Widget.md", "index.md"), "../index.md");
    }

    #[test]
    fn test_external_link_escapes_output_root() {
        let target = LinkTarget::External {
            page: "Contoso.Core/Contoso.Core/Entity.md".to_owned(),
        };

        assert_eq!(
            relative_link("Acme/Widget.md", &target).as_deref(),
            Some("../../Contoso.Core/Contoso.Core/Entity.md")
        );
        assert_eq!(
            relative_link("index.md", &target).as_deref(),
            Some("../Contoso.Core/Contoso.Core/Entity.md")
        );
    }

    #[test]
    fn test_unlinked_has_no_url() {
        assert_eq!(relative_link("index.md", &LinkTarget::Unlinked), None);
    }
}
