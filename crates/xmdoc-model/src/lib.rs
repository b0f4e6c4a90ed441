//! Documentation model for xmdoc.
//!
//! This crate turns raw assembly metadata into the in-memory documentation
//! tree the renderer consumes:
//! - [`AssemblyDoc`] → [`NamespaceDoc`] → [`TypeDoc`] → [`MemberDoc`], with
//!   lightweight [`TypeRef`]s at every type position
//! - [`ModelBuilder`]: extraction (visibility filtering, stable ordering),
//!   comment and source-symbol attachment, duplicate-identifier detection
//! - [`LinkIndex`]: three-way cross-reference resolution (internal page,
//!   external assembly page, or unlinked), computed once over the complete
//!   tree
//!
//! The model is built fresh per invocation and immutable afterwards; nothing
//! downstream mutates it.

mod builder;
mod doc;
mod extract;
mod xref;

pub use builder::{DocModel, ModelBuildError, ModelBuilder};
pub use doc::{AssemblyDoc, MemberDoc, NamespaceDoc, ParamDoc, TypeDoc, TypeRef, type_page_path};
pub use xref::{LinkIndex, LinkTarget};

// Re-export the closed kind sets; the model shares them with the raw metadata.
pub use xmdoc_meta::{MemberKind, TypeKind};
