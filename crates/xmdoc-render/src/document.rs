//! Rendered document values.
//!
//! A [`RenderedDocument`] is the unit of reconciliation: an output-relative
//! path, final content, and a content hash computed over the exact bytes that
//! would be written.

use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Newline convention for rendered output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Newline {
    /// `\n` everywhere. The default: output is byte-identical across hosts.
    #[default]
    Lf,
    /// The host platform's convention (`\r\n` on Windows, `\n` elsewhere).
    Platform,
}

impl Newline {
    /// Apply this convention to content rendered with `\n` line endings.
    #[must_use]
    pub fn apply(self, content: &str) -> String {
        match self {
            Self::Lf => content.to_owned(),
            Self::Platform => {
                if cfg!(windows) {
                    content.replace('\n', "\r\n")
                } else {
                    content.to_owned()
                }
            }
        }
    }
}

/// One rendered page, ready for reconciliation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Output-relative, `/`-separated path (`"Acme/Widget.md"`).
    pub path: String,
    /// Final content, newline convention already applied.
    pub content: String,
    /// Lowercase hex SHA-256 of the final content bytes.
    pub hash: String,
}

impl RenderedDocument {
    /// Finalize a page: apply the newline convention and hash the result.
    #[must_use]
    pub fn new(path: String, content: &str, newline: Newline) -> Self {
        let content = newline.apply(content);
        let hash = hex::encode(Sha256::digest(content.as_bytes()));
        Self {
            path,
            content,
            hash,
        }
    }
}
