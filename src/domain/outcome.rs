//! Terminal states of a document dispatch
//!
//! The dispatcher reports its result as an explicit [`ImportOutcome`] rather
//! than relying on unwinding control flow, so strict and lenient policies are
//! the same algorithm with one branching decision.

use super::errors::ImportFailure;
use super::record::DomainRecord;

/// Terminal state of dispatching one document tree
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// Every node produced a record
    Success(Vec<DomainRecord>),

    /// Some nodes produced records, some were recorded as failures
    /// (lenient policy only)
    PartialSuccess {
        /// Records produced, in document order
        records: Vec<DomainRecord>,
        /// Failures recorded, in document order
        failures: Vec<ImportFailure>,
    },

    /// A fatal failure aborted the document; no records are returned
    Failure(ImportFailure),
}

impl ImportOutcome {
    /// Returns the produced records, if any
    pub fn records(&self) -> &[DomainRecord] {
        match self {
            ImportOutcome::Success(records) => records,
            ImportOutcome::PartialSuccess { records, .. } => records,
            ImportOutcome::Failure(_) => &[],
        }
    }

    /// Returns the recorded failures
    pub fn failures(&self) -> &[ImportFailure] {
        match self {
            ImportOutcome::Success(_) => &[],
            ImportOutcome::PartialSuccess { failures, .. } => failures,
            ImportOutcome::Failure(failure) => std::slice::from_ref(failure),
        }
    }

    /// Returns true if every node produced a record
    pub fn is_success(&self) -> bool {
        matches!(self, ImportOutcome::Success(_))
    }

    /// Returns true if a fatal failure aborted the document
    pub fn is_failure(&self) -> bool {
        matches!(self, ImportOutcome::Failure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::FailureReason;
    use crate::domain::ids::TemplateId;
    use crate::domain::node::NodeKind;
    use crate::domain::path::NodePath;
    use crate::domain::record::RecordKind;

    fn record() -> DomainRecord {
        DomainRecord::new(
            RecordKind::Entry,
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
    fn test_success_accessors() {
        let outcome = ImportOutcome::Success(vec![record(), record()]);
        assert!(outcome.is_success());
        assert_eq!(outcome.records().len(), 2);
        assert!(outcome.failures().is_empty());
    }

    #[test]
    fn test_partial_success_accessors() {
        let outcome = ImportOutcome::PartialSuccess {
            records: vec![record()],
            failures: vec![failure()],
        };
        assert!(!outcome.is_success());
        assert!(!outcome.is_failure());
        assert_eq!(outcome.records().len(), 1);
        assert_eq!(outcome.failures().len(), 1);
    }

    #[test]
    fn test_failure_returns_no_records() {
        let outcome = ImportOutcome::Failure(failure());
        assert!(outcome.is_failure());
        assert!(outcome.records().is_empty());
        assert_eq!(outcome.failures().len(), 1);
    }
}
