//! Processor resolution
//!
//! The factory turns one document node into exactly one processor, or fails.
//! Resolution policy:
//!
//! 1. Zero candidates: `NoProcessorFound`, carrying the node's identifiers.
//!    The dispatcher decides whether that is fatal or skippable.
//! 2. Exactly one candidate: return it.
//! 3. Multiple candidates: prefer the one whose declared identifier set is
//!    smallest (most specific). A remaining tie is `AmbiguousProcessor`,
//!    always fatal; silently picking one of several equally-plausible
//!    processors risks misclassifying clinical data.

use crate::core::registry::{ProcessorDescriptor, TemplateRegistry};
use crate::domain::errors::MeridianError;
use crate::domain::ids::join_ids;
use crate::domain::node::DocumentNode;
use crate::domain::result::Result;
use std::sync::Arc;

/// Resolves document nodes to processor descriptors
///
/// Stateless apart from the shared registry snapshot; it never caches by
/// node identity, and may be cloned freely across dispatchers.
#[derive(Debug, Clone)]
pub struct ProcessorFactory {
    registry: Arc<TemplateRegistry>,
}

impl ProcessorFactory {
    /// Creates a factory over a built registry
    pub fn new(registry: Arc<TemplateRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the shared registry snapshot
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Resolves exactly one processor for the given node
    ///
    /// Queries the registry with the node's template identifiers in
    /// declaration order, keyed by the node's kind.
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::NoProcessorFound` when no registered
    /// processor claims any of the node's identifiers, or
    /// `MeridianError::AmbiguousProcessor` when two or more equally-specific
    /// processors remain after the specificity tie-break.
    pub fn resolve(&self, node: &DocumentNode) -> Result<&ProcessorDescriptor> {
        let candidates = self.registry.lookup(node.kind(), node.template_ids());

        match candidates.len() {
            0 => Err(MeridianError::NoProcessorFound {
                kind: node.kind(),
                template_ids: join_ids(node.template_ids()),
            }),
            1 => Ok(candidates[0]),
            _ => self.break_tie(node, candidates),
        }
    }

    /// Applies the specificity tie-break among multiple candidates
    ///
    /// The candidate with the smallest declared identifier set wins; if two
    /// or more candidates share that minimum, resolution fails rather than
    /// picking one arbitrarily. Deterministic for any registration order.
    fn break_tie<'a>(
        &self,
        node: &DocumentNode,
        candidates: Vec<&'a ProcessorDescriptor>,
    ) -> Result<&'a ProcessorDescriptor> {
        let minimum = candidates
            .iter()
            .map(|descriptor| descriptor.specificity())
            .min()
            .unwrap_or(0);

        let most_specific: Vec<&ProcessorDescriptor> = candidates
            .into_iter()
            .filter(|descriptor| descriptor.specificity() == minimum)
            .collect();

        if most_specific.len() == 1 {
            tracing::debug!(
                processor = most_specific[0].name(),
                kind = %node.kind(),
                "Resolved multi-candidate match by specificity"
            );
            return Ok(most_specific[0]);
        }

        Err(MeridianError::AmbiguousProcessor {
            kind: node.kind(),
            candidates: most_specific
                .iter()
                .map(|descriptor| descriptor.name())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}
