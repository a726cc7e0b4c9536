//! Processor descriptors
//!
//! A descriptor is the static registration metadata for one processor
//! implementation: the node kind it handles, the template identifiers it
//! declares support for (OR semantics: matching any one is sufficient), and
//! a shared handle to the processor instance itself.

use crate::domain::ids::TemplateId;
use crate::domain::node::NodeKind;
use crate::processors::ProcessorHandle;

/// Static metadata bound to one processor implementation
///
/// Created once at registry-build time and immutable thereafter; owned
/// exclusively by the [`TemplateRegistry`](super::TemplateRegistry).
#[derive(Debug)]
pub struct ProcessorDescriptor {
    /// Unique processor name, used in diagnostics and configuration
    name: String,

    /// Declared template identifiers, in declaration order
    template_ids: Vec<TemplateId>,

    /// Shared handle to the processor instance
    handle: ProcessorHandle,
}

impl ProcessorDescriptor {
    /// Creates a new descriptor
    ///
    /// Validation (non-empty identifier set, unique name) happens at
    /// registration time, so an invalid descriptor cannot enter a registry.
    pub fn new(
        name: impl Into<String>,
        template_ids: Vec<TemplateId>,
        handle: ProcessorHandle,
    ) -> Self {
        Self {
            name: name.into(),
            template_ids,
            handle,
        }
    }

    /// Returns the processor name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the node kind this processor handles
    pub fn kind(&self) -> NodeKind {
        self.handle.kind()
    }

    /// Returns the declared template identifiers in declaration order
    pub fn template_ids(&self) -> &[TemplateId] {
        &self.template_ids
    }

    /// Returns the size of the declared identifier set
    ///
    /// A smaller declared set is treated as more specific when several
    /// processors claim the same identifier.
    pub fn specificity(&self) -> usize {
        self.template_ids.len()
    }

    /// Returns true if this descriptor declares support for `id`
    pub fn claims(&self, id: &TemplateId) -> bool {
        self.template_ids.contains(id)
    }

    /// Returns the shared processor handle
    pub fn handle(&self) -> &ProcessorHandle {
        &self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::DocumentNode;
    use crate::domain::record::{DomainRecord, RecordKind};
    use crate::domain::result::Result;
    use crate::processors::EntryProcessor;
    use std::sync::Arc;

    struct NullEntryProcessor;

    impl EntryProcessor for NullEntryProcessor {
        fn process(&self, _node: &DocumentNode) -> Result<DomainRecord> {
            Ok(DomainRecord::new(
                RecordKind::Entry,
                TemplateId::new("1.2.3").unwrap(),
                serde_json::Value::Null,
            ))
        }
    }

    fn descriptor(ids: &[&str]) -> ProcessorDescriptor {
        ProcessorDescriptor::new(
            "null-entry",
            ids.iter().map(|id| TemplateId::new(*id).unwrap()).collect(),
            ProcessorHandle::Entry(Arc::new(NullEntryProcessor)),
        )
    }

    #[test]
    fn test_descriptor_accessors() {
        let desc = descriptor(&["1.2.3", "4.5.6"]);
        assert_eq!(desc.name(), "null-entry");
        assert_eq!(desc.kind(), NodeKind::Entry);
        assert_eq!(desc.specificity(), 2);
    }

    #[test]
    fn test_descriptor_claims() {
        let desc = descriptor(&["1.2.3", "4.5.6"]);
        assert!(desc.claims(&TemplateId::new("4.5.6").unwrap()));
        assert!(!desc.claims(&TemplateId::new("7.8.9").unwrap()));
    }
}
