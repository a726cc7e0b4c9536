//! Processor capability contracts and the built-in processor set.
//!
//! A processor is a unit of interpretation: one document node in, one
//! normalized [`DomainRecord`] out. Three flavors exist, differing only in the
//! structural level consumed:
//!
//! - [`HeaderProcessor`] - whole-document header content, independent of
//!   children
//! - [`SectionProcessor`] - section content; may consult already-dispatched
//!   entry records, but never recurses itself (recursion belongs to the
//!   dispatcher)
//! - [`EntryProcessor`] - leaf transformation; fails only on content-level
//!   errors
//!
//! Processors are stateless and pure with respect to external state: no
//! network or persistence calls from inside a processor. Instances are shared
//! behind `Arc` and may serve any number of concurrent dispatches.

pub mod builtin;
pub mod entries;
pub mod header;
pub mod sections;

use crate::domain::errors::MeridianError;
use crate::domain::node::{DocumentNode, NodeKind};
use crate::domain::record::DomainRecord;
use crate::domain::result::Result;
use crate::domain::TemplateId;
use std::fmt;
use std::sync::Arc;

pub use builtin::register_builtin_processors;

/// Interprets a whole-document node into a header record
///
/// Operates on the document's header content (patient/encounter context)
/// only; section children are the dispatcher's responsibility.
pub trait HeaderProcessor: Send + Sync {
    /// Transforms the document node into a header record
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::DocumentImport` when the header content
    /// violates the constraints of the declared template.
    fn process(&self, node: &DocumentNode) -> Result<DomainRecord>;
}

/// Interprets a section node into a clinical record
pub trait SectionProcessor: Send + Sync {
    /// Transforms the section node into a record
    ///
    /// `child_records` holds the records already dispatched for this
    /// section's entries, in document order. The processor may consult them
    /// (e.g., an entries-required template demands at least one) but must not
    /// recurse into the tree itself.
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::DocumentImport` when the section content
    /// violates structural or semantic constraints of the declared template.
    fn process(&self, node: &DocumentNode, child_records: &[DomainRecord]) -> Result<DomainRecord>;
}

/// Interprets a leaf entry node into an atomic clinical fact
pub trait EntryProcessor: Send + Sync {
    /// Transforms the entry node into a record
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::DocumentImport` on content-level errors only
    /// (e.g., an unparsable coded value or a value outside the expected
    /// range); never on structural or recursion errors.
    fn process(&self, node: &DocumentNode) -> Result<DomainRecord>;
}

/// Kind-tagged shared handle to a processor instance
///
/// Keeps the registry type-homogeneous per node kind: a handle's kind is
/// fixed by its variant, so a section node can never resolve to an entry
/// processor.
#[derive(Clone)]
pub enum ProcessorHandle {
    /// Document-level processor
    Header(Arc<dyn HeaderProcessor>),
    /// Section-level processor
    Section(Arc<dyn SectionProcessor>),
    /// Entry-level processor
    Entry(Arc<dyn EntryProcessor>),
}

impl ProcessorHandle {
    /// Returns the node kind this processor consumes
    pub fn kind(&self) -> NodeKind {
        match self {
            ProcessorHandle::Header(_) => NodeKind::Document,
            ProcessorHandle::Section(_) => NodeKind::Section,
            ProcessorHandle::Entry(_) => NodeKind::Entry,
        }
    }
}

impl fmt::Debug for ProcessorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcessorHandle({})", self.kind())
    }
}

/// Returns the node's primary template identifier for tagging records
///
/// A node only reaches a processor after identifier-based resolution, so a
/// missing identifier here indicates a caller bug and is reported as an
/// import error rather than a panic.
pub(crate) fn primary_id(node: &DocumentNode) -> Result<TemplateId> {
    node.primary_template_id().cloned().ok_or_else(|| {
        MeridianError::DocumentImport(format!(
            "{} node reached a processor without template identifiers",
            node.kind()
        ))
    })
}
