//! Reconciliation report.

use std::collections::BTreeSet;

/// Outcome of comparing rendered pages against the output directory.
///
/// Path sets are ordered, so reports print and compare deterministically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Pages that do not exist in the output directory yet.
    pub added: BTreeSet<String>,
    /// Pages whose existing content differs from the rendered content.
    pub changed: BTreeSet<String>,
    /// Managed files present in the output directory but no longer rendered.
    /// Only populated when clean mode is on; otherwise strays surface as
    /// messages.
    pub removed: BTreeSet<String>,
    /// Informational messages (stale files, skipped entities).
    pub messages: Vec<String>,
}

impl ReconcileReport {
    /// True when the output directory already matches the rendered set.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.added.is_empty() && self.changed.is_empty() && self.removed.is_empty()
    }

    /// Total number of paths that differ.
    #[must_use]
    pub fn difference_count(&self) -> usize {
        self.added.len() + self.changed.len() + self.removed.len()
    }
}
