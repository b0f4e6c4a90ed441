//! Raw assembly metadata for xmdoc.
//!
//! This crate provides:
//! - The serde model for assembly metadata dumps ([`AssemblyMetadata`] and friends)
//! - The [`MetadataProvider`] capability trait and the file-backed
//!   [`JsonMetadataProvider`]
//! - Documentation-identifier generation ([`doc_id`]) matching the identifier
//!   scheme used by XML documentation files
//!
//! The types here are deliberately "raw": they mirror what the extraction step
//! dumped, before any visibility filtering or ordering. `xmdoc-model` turns
//! them into the documentation tree.

pub mod doc_id;
mod metadata;
#[cfg(feature = "mock")]
mod mock;
mod provider;

pub use metadata::{
    AssemblyIdentity, AssemblyMetadata, MemberKind, MemberMetadata, ParamMetadata, TypeKind,
    TypeMetadata, TypeSig, Visibility,
};
#[cfg(feature = "mock")]
pub use mock::MockMetadata;
pub use provider::{JsonMetadataProvider, MetadataError, MetadataProvider};
