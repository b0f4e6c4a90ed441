//! Deterministic Markdown renderer for xmdoc.
//!
//! Consumes a built documentation model and produces the complete page set
//! as in-memory [`RenderedDocument`]s. Rendering is pure: equal models and
//! options yield byte-identical output, which is what makes dry-run, verify,
//! and hash-based change detection trustworthy downstream.

mod display;
mod document;
mod links;
mod renderer;

pub use document::{Newline, RenderedDocument};
pub use renderer::{RenderError, RenderOptions, render};
