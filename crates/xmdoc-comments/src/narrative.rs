//! Narrative text model.
//!
//! Narrative sections are sequences of [`Inline`] nodes rather than flat
//! strings, so that `<see cref>` markers keep their identity until link
//! resolution. An absent bundle means "no comment found"; an empty section
//! inside a bundle means the comment exists but says nothing there.

/// A run of narrative text: plain text interleaved with inline markers.
pub type Text = Vec<Inline>;

/// One inline node of narrative text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    /// Plain text with whitespace already collapsed.
    Text(String),
    /// Inline code (`<c>` or `<code>`).
    Code(String),
    /// Cross-reference marker (`<see cref="..."/>`), raw identifier kept.
    See {
        /// Raw documentation identifier from the `cref` attribute.
        cref: String,
    },
    /// Parameter reference (`<paramref name="..."/>`).
    ParamRef(String),
}

impl Inline {
    /// The type name a `See` marker points at, when it points at a type.
    ///
    /// Strips the `T:` identifier prefix; a bare name without any prefix is
    /// treated as a type name too. Member identifiers (`M:`, `P:`, `F:`,
    /// `E:`) return `None` and render as plain code.
    #[must_use]
    pub fn see_type_name(&self) -> Option<&str> {
        let Self::See { cref } = self else {
            return None;
        };
        match cref.split_once(':') {
            Some(("T", rest)) => Some(rest),
            Some(_) => None,
            None => Some(cref),
        }
    }
}

/// Narrative comment bundle for one type or member.
///
/// Every section is optional; a missing section is rendered as explicitly
/// empty, never silently skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NarrativeBundle {
    /// `<summary>` text.
    pub summary: Option<Text>,
    /// `<remarks>` text.
    pub remarks: Option<Text>,
    /// `<returns>` (or `<value>`) text.
    pub returns: Option<Text>,
    /// `<example>` text.
    pub example: Option<Text>,
    /// `<param name="...">` texts, in document order.
    pub params: Vec<(String, Text)>,
    /// `<exception cref="...">` texts, in document order. The first element
    /// is the exception type name with the identifier prefix stripped.
    pub exceptions: Vec<(String, Text)>,
}

impl NarrativeBundle {
    /// True when no section carries any content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.remarks.is_none()
            && self.returns.is_none()
            && self.example.is_none()
            && self.params.is_empty()
            && self.exceptions.is_empty()
    }

    /// The narrative for a named parameter, if documented.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Text> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, text)| text)
    }
}

/// Collapse whitespace runs in raw XML text to single spaces.
///
/// XML documentation files indent narrative text to match the source code;
/// the indentation is not content.
#[must_use]
pub(crate) fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
