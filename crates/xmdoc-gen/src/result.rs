//! Generation outcome.

use std::collections::BTreeSet;

use xmdoc_reconcile::ReconcileReport;

/// Summary of one generation run.
///
/// Path sets mirror the reconciliation report; messages collect every
/// recoverable anomaly from the whole pipeline (skipped entities, missing
/// comment files, stale output), in pipeline order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationResult {
    /// Pages written that did not exist before (or would be, in dry-run).
    pub added: BTreeSet<String>,
    /// Pages rewritten because their content changed.
    pub changed: BTreeSet<String>,
    /// Stale managed files deleted by clean mode.
    pub removed: BTreeSet<String>,
    /// Recoverable-anomaly messages.
    pub messages: Vec<String>,
}

impl GenerationResult {
    /// Combine pipeline messages with a reconciliation report.
    #[must_use]
    pub(crate) fn from_report(report: ReconcileReport, mut messages: Vec<String>) -> Self {
        messages.extend(report.messages);
        Self {
            added: report.added,
            changed: report.changed,
            removed: report.removed,
            messages,
        }
    }

    /// True when the output directory already matched the rendered set.
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

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_from_report_appends_report_messages() {
        let mut report = ReconcileReport::default();
        report.added.insert("index.md".to_owned());
        report.messages.push("stale: old.md".to_owned());

        let result =
            GenerationResult::from_report(report, vec!["Skipped type with empty name".to_owned()]);

        assert_eq!(
            result.messages,
            vec!["Skipped type with empty name", "stale: old.md"]
        );
        assert_eq!(result.difference_count(), 1);
        assert!(!result.is_clean());
    }
}
