//! End-to-end documentation generation for xmdoc.
//!
//! Composes the pipeline crates into a single entry point: load the assembly
//! metadata artifact, resolve XML documentation comments, build the model,
//! render Markdown pages deterministically, and reconcile them with the
//! output directory. [`generate`] uses the filesystem; [`generate_with`]
//! accepts injected capabilities for testing and embedding.

mod pipeline;
mod result;

pub use pipeline::{GenerateError, generate, generate_with};
pub use result::GenerationResult;

// Settings are defined alongside configuration loading; re-exported here so
// embedders need only this crate.
pub use xmdoc_config::GenerateSettings;
