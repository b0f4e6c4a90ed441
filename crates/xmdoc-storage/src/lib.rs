//! Output directory storage for xmdoc.
//!
//! The reconciler is the only component that touches persistent storage, and
//! it does so exclusively through the narrow [`DocStorage`] capability
//! defined here. [`FsStorage`] is the filesystem implementation;
//! [`MockStorage`] (behind the `mock` feature) backs unit tests.
//!
//! All path parameters are output-relative, `/`-separated strings.

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{DocStorage, StorageError, StorageErrorKind};
