//! Import summary and reporting
//!
//! This module defines the structure for tracking and reporting the result
//! of one document dispatch.

use crate::domain::errors::FailureReason;
use crate::domain::outcome::ImportOutcome;
use crate::domain::record::RecordKind;
use std::time::Duration;

/// Summary of one document import
#[derive(Debug, Clone)]
pub struct ImportSummary {
    /// Total number of records produced
    pub total_records: usize,

    /// Number of header records
    pub header_records: usize,

    /// Number of section records
    pub section_records: usize,

    /// Number of entry records
    pub entry_records: usize,

    /// Number of recorded failures
    pub failure_count: usize,

    /// Number of nodes skipped because no processor claimed them
    ///
    /// A subset of `failure_count`; the remainder are processor and
    /// resolution failures.
    pub skipped_nodes: usize,

    /// Whether a fatal failure aborted the document
    pub fatal: bool,

    /// Duration of the dispatch
    pub duration: Duration,
}

impl ImportSummary {
    /// Builds a summary from a dispatch outcome
    pub fn from_outcome(outcome: &ImportOutcome, duration: Duration) -> Self {
        let records = outcome.records();
        let count_kind = |kind: RecordKind| records.iter().filter(|r| r.kind == kind).count();

        Self {
            total_records: records.len(),
            header_records: count_kind(RecordKind::Header),
            section_records: count_kind(RecordKind::Section),
            entry_records: count_kind(RecordKind::Entry),
            failure_count: outcome.failures().len(),
            skipped_nodes: outcome
                .failures()
                .iter()
                .filter(|f| f.reason == FailureReason::MissingProcessor)
                .count(),
            fatal: outcome.is_failure(),
            duration,
        }
    }

    /// Check if the import was fully successful (no failures)
    pub fn is_successful(&self) -> bool {
        !self.fatal && self.failure_count == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_records = self.total_records,
            header_records = self.header_records,
            section_records = self.section_records,
            entry_records = self.entry_records,
            failures = self.failure_count,
            skipped_nodes = self.skipped_nodes,
            fatal = self.fatal,
            duration_ms = self.duration.as_millis(),
            "Import completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{FailureReason, ImportFailure};
    use crate::domain::node::NodeKind;
    use crate::domain::path::NodePath;
    use crate::domain::record::DomainRecord;
    use crate::domain::TemplateId;

    fn record(kind: RecordKind) -> DomainRecord {
        DomainRecord::new(
            kind,
            TemplateId::new("1.2.3").unwrap(),
            serde_json::Value::Null,
        )
    }

    fn failure() -> ImportFailure {
        ImportFailure::new(
            NodeKind::Entry,
            NodePath::root().child(0),
            vec![],
            FailureReason::MissingProcessor,
        )
    }

    #[test]
    fn test_summary_from_success() {
        let outcome = ImportOutcome::Success(vec![
            record(RecordKind::Header),
            record(RecordKind::Entry),
            record(RecordKind::Entry),
            record(RecordKind::Section),
        ]);
        let summary = ImportSummary::from_outcome(&outcome, Duration::from_millis(5));

        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.header_records, 1);
        assert_eq!(summary.section_records, 1);
        assert_eq!(summary.entry_records, 2);
        assert!(summary.is_successful());
    }

    #[test]
    fn test_summary_from_partial_success() {
        let outcome = ImportOutcome::PartialSuccess {
            records: vec![record(RecordKind::Entry)],
            failures: vec![failure()],
        };
        let summary = ImportSummary::from_outcome(&outcome, Duration::from_millis(5));

        assert_eq!(summary.total_records, 1);
        assert_eq!(summary.failure_count, 1);
        assert_eq!(summary.skipped_nodes, 1);
        assert!(!summary.fatal);
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_summary_separates_skips_from_processor_failures() {
        let import_failure = ImportFailure::new(
            NodeKind::Entry,
            NodePath::root().child(1),
            vec![TemplateId::new("1.2.3").unwrap()],
            FailureReason::Import {
                message: "value out of range".to_string(),
            },
        );
        let outcome = ImportOutcome::PartialSuccess {
            records: vec![],
            failures: vec![failure(), import_failure],
        };
        let summary = ImportSummary::from_outcome(&outcome, Duration::from_millis(5));

        assert_eq!(summary.failure_count, 2);
        assert_eq!(summary.skipped_nodes, 1);
    }

    #[test]
    fn test_summary_from_failure() {
        let outcome = ImportOutcome::Failure(failure());
        let summary = ImportSummary::from_outcome(&outcome, Duration::from_millis(5));

        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.failure_count, 1);
        assert!(summary.fatal);
        assert!(!summary.is_successful());
    }
}
