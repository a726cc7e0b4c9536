//! Template registry: template identifier to processor mapping
//!
//! The registry is built once at startup from declared processor metadata and
//! never consults runtime document content. After [`TemplateRegistryBuilder::build`]
//! it is an immutable snapshot: concurrent reads need no locking, and the
//! whole registry is shared across dispatches behind a plain `Arc`.

use super::descriptor::ProcessorDescriptor;
use crate::domain::errors::MeridianError;
use crate::domain::ids::{join_ids, TemplateId};
use crate::domain::node::NodeKind;
use crate::domain::result::Result;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Mutable registration phase of the template registry
///
/// Descriptors are added during startup; [`build`](Self::build) seals the
/// registry. Registration is atomic: a rejected descriptor leaves the builder
/// unchanged.
#[derive(Debug, Default)]
pub struct TemplateRegistryBuilder {
    descriptors: Vec<ProcessorDescriptor>,
}

impl TemplateRegistryBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a processor descriptor under every template identifier it
    /// declares
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::Registration` if the descriptor declares an
    /// empty identifier set, repeats an identifier within its declared set,
    /// or reuses the name of an already-registered processor. The builder is
    /// unchanged on error.
    pub fn register(&mut self, descriptor: ProcessorDescriptor) -> Result<()> {
        if descriptor.template_ids().is_empty() {
            return Err(MeridianError::Registration(format!(
                "Processor '{}' declares an empty template identifier set",
                descriptor.name()
            )));
        }

        let mut seen = HashSet::new();
        for id in descriptor.template_ids() {
            if !seen.insert(id) {
                return Err(MeridianError::Registration(format!(
                    "Processor '{}' declares template identifier '{}' more than once",
                    descriptor.name(),
                    id
                )));
            }
        }

        if self
            .descriptors
            .iter()
            .any(|d| d.name() == descriptor.name())
        {
            return Err(MeridianError::Registration(format!(
                "Processor name '{}' is already registered",
                descriptor.name()
            )));
        }

        tracing::debug!(
            processor = descriptor.name(),
            kind = %descriptor.kind(),
            template_ids = %join_ids(descriptor.template_ids()),
            "Registered processor"
        );

        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Returns the number of registered descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if no descriptor has been registered
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Seals the registry into an immutable snapshot
    pub fn build(self) -> TemplateRegistry {
        let mut index: HashMap<NodeKind, HashMap<TemplateId, Vec<usize>>> = HashMap::new();
        for (position, descriptor) in self.descriptors.iter().enumerate() {
            let by_id = index.entry(descriptor.kind()).or_default();
            for id in descriptor.template_ids() {
                by_id.entry(id.clone()).or_default().push(position);
            }
        }

        tracing::info!(
            processors = self.descriptors.len(),
            claimed_identifiers = index.values().map(HashMap::len).sum::<usize>(),
            "Template registry built"
        );

        TemplateRegistry {
            descriptors: self.descriptors,
            index,
        }
    }
}

/// Immutable mapping from template identifier to claiming processors
///
/// Lookups are keyed by node kind first and identifier second, keeping the
/// mapping type-homogeneous per kind: the same identifier may be claimed by a
/// section processor and an entry processor without ambiguity between them.
#[derive(Debug)]
pub struct TemplateRegistry {
    descriptors: Vec<ProcessorDescriptor>,
    /// Per-kind identifier index; keyed by kind first so lookups borrow the
    /// queried identifiers instead of cloning them
    index: HashMap<NodeKind, HashMap<TemplateId, Vec<usize>>>,
}

impl TemplateRegistry {
    /// Looks up the descriptors claiming any of the given identifiers
    ///
    /// Returns the union of all descriptors registered under any identifier
    /// in the input sequence, deduplicated, in registration order. An empty
    /// result is a valid outcome (no match), not an error.
    pub fn lookup(&self, kind: NodeKind, ids: &[TemplateId]) -> Vec<&ProcessorDescriptor> {
        let Some(by_id) = self.index.get(&kind) else {
            return Vec::new();
        };

        let mut positions = BTreeSet::new();
        for id in ids {
            if let Some(claimants) = by_id.get(id) {
                positions.extend(claimants.iter().copied());
            }
        }
        positions
            .into_iter()
            .map(|position| &self.descriptors[position])
            .collect()
    }

    /// Returns all registered descriptors in registration order
    pub fn descriptors(&self) -> &[ProcessorDescriptor] {
        &self.descriptors
    }

    /// Returns the number of registered descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::DocumentNode;
    use crate::domain::record::{DomainRecord, RecordKind};
    use crate::processors::{EntryProcessor, ProcessorHandle, SectionProcessor};
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

    struct NullSectionProcessor;

    impl SectionProcessor for NullSectionProcessor {
        fn process(
            &self,
            _node: &DocumentNode,
            _child_records: &[DomainRecord],
        ) -> Result<DomainRecord> {
            Ok(DomainRecord::new(
                RecordKind::Section,
                TemplateId::new("1.2.3").unwrap(),
                serde_json::Value::Null,
            ))
        }
    }

    fn entry_descriptor(name: &str, ids: &[&str]) -> ProcessorDescriptor {
        ProcessorDescriptor::new(
            name,
            ids.iter().map(|id| TemplateId::new(*id).unwrap()).collect(),
            ProcessorHandle::Entry(Arc::new(NullEntryProcessor)),
        )
    }

    fn section_descriptor(name: &str, ids: &[&str]) -> ProcessorDescriptor {
        ProcessorDescriptor::new(
            name,
            ids.iter().map(|id| TemplateId::new(*id).unwrap()).collect(),
            ProcessorHandle::Section(Arc::new(NullSectionProcessor)),
        )
    }

    fn ids(raw: &[&str]) -> Vec<TemplateId> {
        raw.iter().map(|id| TemplateId::new(*id).unwrap()).collect()
    }

    #[test]
    fn test_register_and_lookup() {
        let mut builder = TemplateRegistryBuilder::new();
        builder
            .register(entry_descriptor("a", &["1.2.3", "4.5.6"]))
            .unwrap();
        let registry = builder.build();

        let found = registry.lookup(NodeKind::Entry, &ids(&["4.5.6"]));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "a");
    }

    #[test]
    fn test_empty_identifier_set_rejected_atomically() {
        let mut builder = TemplateRegistryBuilder::new();
        builder.register(entry_descriptor("a", &["1.2.3"])).unwrap();

        let err = builder.register(entry_descriptor("b", &[])).unwrap_err();
        assert!(matches!(err, MeridianError::Registration(_)));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_duplicate_identifier_in_set_rejected() {
        let mut builder = TemplateRegistryBuilder::new();
        let err = builder
            .register(entry_descriptor("a", &["1.2.3", "1.2.3"]))
            .unwrap_err();
        assert!(matches!(err, MeridianError::Registration(_)));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut builder = TemplateRegistryBuilder::new();
        builder.register(entry_descriptor("a", &["1.2.3"])).unwrap();
        let err = builder.register(entry_descriptor("a", &["4.5.6"])).unwrap_err();
        assert!(matches!(err, MeridianError::Registration(_)));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_lookup_union_across_identifiers() {
        let mut builder = TemplateRegistryBuilder::new();
        builder.register(entry_descriptor("a", &["1.1.1"])).unwrap();
        builder.register(entry_descriptor("b", &["2.2.2"])).unwrap();
        builder.register(entry_descriptor("c", &["3.3.3"])).unwrap();
        let registry = builder.build();

        let found = registry.lookup(NodeKind::Entry, &ids(&["1.1.1", "3.3.3"]));
        let names: Vec<&str> = found.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_lookup_deduplicates_multi_claim() {
        // One processor matched through two of its declared identifiers
        // appears once in the result.
        let mut builder = TemplateRegistryBuilder::new();
        builder
            .register(entry_descriptor("a", &["1.1.1", "2.2.2"]))
            .unwrap();
        let registry = builder.build();

        let found = registry.lookup(NodeKind::Entry, &ids(&["1.1.1", "2.2.2"]));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_lookup_no_match_is_empty() {
        let mut builder = TemplateRegistryBuilder::new();
        builder.register(entry_descriptor("a", &["1.2.3"])).unwrap();
        let registry = builder.build();

        assert!(registry.lookup(NodeKind::Entry, &ids(&["9.9.9"])).is_empty());
        assert!(registry.lookup(NodeKind::Entry, &[]).is_empty());
    }

    #[test]
    fn test_lookup_unindexed_kind_is_empty() {
        let mut builder = TemplateRegistryBuilder::new();
        builder.register(entry_descriptor("a", &["1.2.3"])).unwrap();
        let registry = builder.build();

        assert!(registry
            .lookup(NodeKind::Document, &ids(&["1.2.3"]))
            .is_empty());
    }

    #[test]
    fn test_lookup_is_kind_homogeneous() {
        // The same identifier claimed at different levels never collides.
        let mut builder = TemplateRegistryBuilder::new();
        builder.register(entry_descriptor("e", &["1.2.3"])).unwrap();
        builder.register(section_descriptor("s", &["1.2.3"])).unwrap();
        let registry = builder.build();

        let entries = registry.lookup(NodeKind::Entry, &ids(&["1.2.3"]));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "e");

        let sections = registry.lookup(NodeKind::Section, &ids(&["1.2.3"]));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name(), "s");
    }

    #[test]
    fn test_disjoint_claims_resolve_uniquely() {
        // With disjoint identifier claims every lookup returns exactly one
        // descriptor per claimed identifier.
        let mut builder = TemplateRegistryBuilder::new();
        builder
            .register(entry_descriptor("a", &["1.1.1", "1.1.2"]))
            .unwrap();
        builder.register(entry_descriptor("b", &["2.2.2"])).unwrap();
        let registry = builder.build();

        for id in ["1.1.1", "1.1.2", "2.2.2"] {
            let found = registry.lookup(NodeKind::Entry, &ids(&[id]));
            assert_eq!(found.len(), 1, "identifier {id} should resolve uniquely");
        }
    }
}
