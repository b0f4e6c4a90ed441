//! Classification and application of rendered output.
//!
//! Reconciliation is two strictly separated phases: `classify` reads the
//! output directory and computes the added/changed/removed sets without
//! mutating anything; `apply` performs exactly the writes and deletes the
//! report names. Dry-run and verify modes run classification only, so they
//! are incapable of mutation by construction.
//!
//! Only managed files (`*.md` under the output root) participate. Anything
//! else in the directory is invisible to the reconciler and never touched.

use std::collections::{BTreeSet, HashMap};

use xmdoc_render::RenderedDocument;
use xmdoc_storage::{DocStorage, StorageError};

use crate::report::ReconcileReport;

/// Glob for files the reconciler owns inside the output directory.
const MANAGED_PATTERN: &str = "*.md";

/// How reconciliation treats the output directory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReconcileMode {
    /// Classify, then write and delete to make the directory match.
    #[default]
    Normal,
    /// Classify only; report what a normal run would do.
    DryRun,
    /// Classify only; the caller treats a non-empty report as a failure.
    Verify,
}

/// Reconciliation failure.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// The output storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Reconcile rendered pages against the output directory.
///
/// # Errors
///
/// Returns [`ReconcileError`] when listing, reading, writing, or deleting
/// managed files fails.
pub fn reconcile(
    rendered: &[RenderedDocument],
    storage: &dyn DocStorage,
    mode: ReconcileMode,
    clean: bool,
) -> Result<ReconcileReport, ReconcileError> {
    let report = classify(rendered, storage, clean)?;

    if mode == ReconcileMode::Normal {
        apply(rendered, storage, &report)?;
    }

    tracing::info!(
        ?mode,
        added = report.added.len(),
        changed = report.changed.len(),
        removed = report.removed.len(),
        "Reconciled output directory"
    );
    Ok(report)
}

/// Compare rendered pages with existing managed files. Read-only.
///
/// # Errors
///
/// Returns [`ReconcileError`] when the managed file listing or a content
/// read fails.
pub fn classify(
    rendered: &[RenderedDocument],
    storage: &dyn DocStorage,
    clean: bool,
) -> Result<ReconcileReport, ReconcileError> {
    let existing: BTreeSet<String> = storage.list(MANAGED_PATTERN)?.into_iter().collect();
    let by_path: HashMap<&str, &RenderedDocument> =
        rendered.iter().map(|d| (d.path.as_str(), d)).collect();

    let mut report = ReconcileReport::default();

    for doc in rendered {
        if !existing.contains(&doc.path) {
            report.added.insert(doc.path.clone());
        } else if storage.read(&doc.path)? != doc.content.as_bytes() {
            report.changed.insert(doc.path.clone());
        }
    }

    for path in &existing {
        if by_path.contains_key(path.as_str()) {
            continue;
        }
        if clean {
            report.removed.insert(path.clone());
        } else {
            let message = format!("Stale managed file left in place: {path}");
            tracing::warn!("{message}");
            report.messages.push(message);
        }
    }

    Ok(report)
}

/// Perform the writes and deletes a classification calls for.
fn apply(
    rendered: &[RenderedDocument],
    storage: &dyn DocStorage,
    report: &ReconcileReport,
) -> Result<(), ReconcileError> {
    for doc in rendered {
        if report.added.contains(&doc.path) || report.changed.contains(&doc.path) {
            storage.write(&doc.path, doc.content.as_bytes())?;
            tracing::debug!(path = %doc.path, hash = %doc.hash, "Wrote page");
        }
    }
    for path in &report.removed {
        storage.delete(path)?;
        tracing::debug!(path = %path, "Removed stale page");
    }
    Ok(())
}
