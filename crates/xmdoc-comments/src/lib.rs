//! Narrative documentation comments for xmdoc.
//!
//! This crate provides:
//! - The [`CommentSource`] capability trait: look up a [`NarrativeBundle`]
//!   by documentation identifier, `None` when absent
//! - [`XmlCommentSource`]: quick-xml based reader for compiler-emitted
//!   XML documentation files
//! - [`SourceSymbols`]: optional map from documentation identifier to the
//!   original source location, for "defined in source" links
//!
//! Inline cross-reference markers (`<see cref="..."/>`) are preserved as
//! structured [`Inline::See`] nodes so the renderer can resolve them through
//! the same link index used for signature types.

mod narrative;
mod source;
mod symbols;
mod xml;

pub use narrative::{Inline, NarrativeBundle, Text};
pub use source::{CommentSource, MemoryCommentSource, NullCommentSource};
pub use symbols::{SourceLocation, SourceSymbols};
pub use xml::{CommentError, XmlCommentSource};
