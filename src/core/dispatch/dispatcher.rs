//! Recursive document dispatcher
//!
//! Walks a document tree top-down, resolves and invokes a processor at each
//! level, recurses into children in document order, and assembles a composite
//! [`ImportOutcome`]. The dispatcher is the sole point where the
//! strict/lenient policy decides whether a failure aborts the whole document
//! or is recorded while traversal continues.

use super::factory::ProcessorFactory;
use crate::core::registry::ProcessorDescriptor;
use crate::domain::errors::{FailureReason, ImportFailure, MeridianError};
use crate::domain::node::{DocumentNode, NodeKind};
use crate::domain::outcome::ImportOutcome;
use crate::domain::path::NodePath;
use crate::domain::record::DomainRecord;
use crate::domain::result::Result;
use crate::processors::ProcessorHandle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Failure policy for unresolvable or failing nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportPolicy {
    /// Any failing node aborts the whole document; no partial records
    Strict,
    /// Failing nodes are recorded as skipped and traversal continues
    Lenient,
}

impl fmt::Display for ImportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportPolicy::Strict => write!(f, "strict"),
            ImportPolicy::Lenient => write!(f, "lenient"),
        }
    }
}

impl FromStr for ImportPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "strict" => Ok(ImportPolicy::Strict),
            "lenient" => Ok(ImportPolicy::Lenient),
            other => Err(format!(
                "Invalid import policy '{other}'. Must be one of: strict, lenient"
            )),
        }
    }
}

/// Per-dispatch traversal state
#[derive(Debug, Default)]
struct Walk {
    records: Vec<DomainRecord>,
    failures: Vec<ImportFailure>,
}

/// Walks one document tree and assembles the composite result
///
/// A dispatcher holds only the shared registry (through its factory) and the
/// configured policy; each [`dispatch`](Self::dispatch) call owns its
/// traversal state, so independent documents may be dispatched from separate
/// threads concurrently.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    factory: ProcessorFactory,
    policy: ImportPolicy,
    /// Lenient-mode failure cap; 0 means unlimited
    failure_limit: usize,
}

impl Dispatcher {
    /// Creates a dispatcher with the given resolution factory and policy
    pub fn new(factory: ProcessorFactory, policy: ImportPolicy) -> Self {
        Self {
            factory,
            policy,
            failure_limit: 0,
        }
    }

    /// Caps the number of failures tolerated under lenient policy
    ///
    /// Once the cap is reached the next failure aborts the document as if
    /// the policy were strict. A limit of 0 means unlimited.
    pub fn with_failure_limit(mut self, limit: usize) -> Self {
        self.failure_limit = limit;
        self
    }

    /// Returns the configured policy
    pub fn policy(&self) -> ImportPolicy {
        self.policy
    }

    /// Dispatches one document tree
    ///
    /// Children are processed sequentially in document order and never
    /// reordered; downstream record ordering is observable and must be
    /// stable. Under strict policy the first fatal failure aborts the
    /// remaining siblings and the whole document yields no records.
    pub fn dispatch(&self, root: &DocumentNode) -> ImportOutcome {
        tracing::debug!(
            kind = %root.kind(),
            policy = %self.policy,
            "Dispatching document tree"
        );

        let mut walk = Walk::default();
        match self.walk_node(root, NodePath::root(), &mut walk) {
            Ok(()) => {
                if walk.failures.is_empty() {
                    ImportOutcome::Success(walk.records)
                } else {
                    ImportOutcome::PartialSuccess {
                        records: walk.records,
                        failures: walk.failures,
                    }
                }
            }
            Err(failure) => {
                tracing::warn!(
                    path = %failure.path,
                    reason = %failure.describe(),
                    "Dispatch aborted by fatal failure"
                );
                ImportOutcome::Failure(failure)
            }
        }
    }

    /// Walks one node; `Err` carries a fatal failure that aborts the document
    fn walk_node(
        &self,
        node: &DocumentNode,
        path: NodePath,
        walk: &mut Walk,
    ) -> std::result::Result<(), ImportFailure> {
        let descriptor = match self.resolve_node(node, &path, walk)? {
            Some(descriptor) => descriptor,
            // Unresolvable node skipped under lenient policy; the skip
            // covers the node's whole subtree.
            None => return Ok(()),
        };

        match node.kind() {
            NodeKind::Document => {
                let result = invoke_header(descriptor, node);
                self.absorb(result, node, &path, walk)?;
                self.walk_children(node, &path, walk)
            }
            NodeKind::Section => {
                // Entries are dispatched before the section processor runs so
                // it can consult the child records; sibling order is
                // preserved and the section record lands after its entries.
                let first_child_record = walk.records.len();
                self.walk_children(node, &path, walk)?;
                let result = invoke_section(descriptor, node, &walk.records[first_child_record..]);
                self.absorb(result, node, &path, walk)
            }
            NodeKind::Entry => {
                let result = invoke_entry(descriptor, node);
                self.absorb(result, node, &path, walk)
            }
        }
    }

    /// Recurses into children sequentially in document order
    fn walk_children(
        &self,
        node: &DocumentNode,
        path: &NodePath,
        walk: &mut Walk,
    ) -> std::result::Result<(), ImportFailure> {
        for (index, child) in node.children().iter().enumerate() {
            self.walk_node(child, path.child(index), walk)?;
        }
        Ok(())
    }

    /// Resolves a processor for the node, applying the missing-processor
    /// policy
    ///
    /// Returns `Ok(None)` when the node is skipped under lenient policy.
    fn resolve_node<'a>(
        &'a self,
        node: &DocumentNode,
        path: &NodePath,
        walk: &mut Walk,
    ) -> std::result::Result<Option<&'a ProcessorDescriptor>, ImportFailure> {
        match self.factory.resolve(node) {
            Ok(descriptor) => Ok(Some(descriptor)),
            Err(error) => {
                let failure = failure_for(node, path, &error);
                self.record_failure(failure, walk)?;
                Ok(None)
            }
        }
    }

    /// Absorbs a processor invocation result into the traversal state
    fn absorb(
        &self,
        result: Result<DomainRecord>,
        node: &DocumentNode,
        path: &NodePath,
        walk: &mut Walk,
    ) -> std::result::Result<(), ImportFailure> {
        match result {
            Ok(record) => {
                walk.records.push(record.at(path.clone()));
                Ok(())
            }
            Err(error) => {
                let failure = failure_for(node, path, &error);
                self.record_failure(failure, walk)
            }
        }
    }

    /// Applies the configured policy to one failure
    ///
    /// Ambiguous resolution is fatal under both policies. Lenient policy
    /// records the failure and continues, unless the failure cap has been
    /// reached.
    fn record_failure(
        &self,
        failure: ImportFailure,
        walk: &mut Walk,
    ) -> std::result::Result<(), ImportFailure> {
        if failure.is_always_fatal() || self.policy == ImportPolicy::Strict {
            return Err(failure);
        }

        if self.failure_limit > 0 && walk.failures.len() >= self.failure_limit {
            tracing::warn!(
                limit = self.failure_limit,
                "Lenient failure limit reached, aborting document"
            );
            return Err(failure);
        }

        crate::log_node_skipped!(failure.path, failure.describe());
        walk.failures.push(failure);
        Ok(())
    }
}

/// Builds the failure record for a node from a resolution or processor error
fn failure_for(node: &DocumentNode, path: &NodePath, error: &MeridianError) -> ImportFailure {
    let reason = match error {
        MeridianError::NoProcessorFound { .. } => FailureReason::MissingProcessor,
        MeridianError::AmbiguousProcessor { candidates, .. } => FailureReason::AmbiguousProcessor {
            candidates: candidates.clone(),
        },
        other => FailureReason::Import {
            message: other.to_string(),
        },
    };
    ImportFailure::new(
        node.kind(),
        path.clone(),
        node.template_ids().to_vec(),
        reason,
    )
}

/// Invokes a document-level processor, guarding against a kind mismatch
///
/// The registry is kind-homogeneous, so a mismatch here indicates registry
/// corruption and is reported as an import error rather than a panic.
fn invoke_header(descriptor: &ProcessorDescriptor, node: &DocumentNode) -> Result<DomainRecord> {
    match descriptor.handle() {
        ProcessorHandle::Header(processor) => processor.process(node),
        other => Err(kind_mismatch(descriptor, node, other)),
    }
}

fn invoke_section(
    descriptor: &ProcessorDescriptor,
    node: &DocumentNode,
    child_records: &[DomainRecord],
) -> Result<DomainRecord> {
    match descriptor.handle() {
        ProcessorHandle::Section(processor) => processor.process(node, child_records),
        other => Err(kind_mismatch(descriptor, node, other)),
    }
}

fn invoke_entry(descriptor: &ProcessorDescriptor, node: &DocumentNode) -> Result<DomainRecord> {
    match descriptor.handle() {
        ProcessorHandle::Entry(processor) => processor.process(node),
        other => Err(kind_mismatch(descriptor, node, other)),
    }
}

fn kind_mismatch(
    descriptor: &ProcessorDescriptor,
    node: &DocumentNode,
    handle: &ProcessorHandle,
) -> MeridianError {
    MeridianError::DocumentImport(format!(
        "processor '{}' handles {} nodes but was resolved for a {} node",
        descriptor.name(),
        handle.kind(),
        node.kind()
    ))
}
