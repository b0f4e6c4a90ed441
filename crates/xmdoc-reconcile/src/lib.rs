//! Output reconciliation for xmdoc.
//!
//! Brings the output directory in line with the rendered page set. The
//! comparison phase is read-only and produces a [`ReconcileReport`]; the
//! application phase performs exactly the writes and deletes the report
//! names. Unchanged files are never rewritten, which keeps timestamps and
//! incremental site builds intact.

mod reconcile;
mod report;

pub use reconcile::{ReconcileError, ReconcileMode, classify, reconcile};
pub use report::ReconcileReport;
