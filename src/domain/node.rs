//! Parsed document tree nodes
//!
//! The upstream parser produces a tree of [`DocumentNode`]s; this crate treats
//! that tree as read-only input and routes each node to a processor based on
//! its declared template identifiers.

use super::ids::TemplateId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural level of a document node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Whole-document node carrying header content; children are sections
    Document,
    /// Section node; children are entries
    Section,
    /// Leaf entry node; may carry further opaque sub-structure, none of which
    /// participates in routing
    Entry,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Document => write!(f, "document"),
            NodeKind::Section => write!(f, "section"),
            NodeKind::Entry => write!(f, "entry"),
        }
    }
}

/// One node of a parsed clinical document tree
///
/// Carries an ordered sequence of zero or more template identifiers (the
/// node's declared template identity), an opaque content payload consulted
/// only by processors, and zero or more child nodes in document order.
///
/// Constructed by the upstream parser (or deserialized from its JSON output);
/// read-only to the dispatch core.
///
/// # Examples
///
/// ```
/// use meridian::domain::node::{DocumentNode, NodeKind};
///
/// let entry = DocumentNode::builder(NodeKind::Entry)
///     .template_id("2.16.840.1.113883.10.20.22.4.27")
///     .unwrap()
///     .content(serde_json::json!({"code": "8480-6", "value": "120"}))
///     .build();
///
/// assert_eq!(entry.kind(), NodeKind::Entry);
/// assert_eq!(entry.template_ids().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Structural level of this node
    kind: NodeKind,

    /// Declared template identities, in declaration order
    #[serde(default)]
    template_ids: Vec<TemplateId>,

    /// Human-readable label (e.g., a section title), if the parser provided one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,

    /// Opaque node content; interpreted only by the resolved processor
    #[serde(default)]
    content: serde_json::Value,

    /// Child nodes in document order
    #[serde(default)]
    children: Vec<DocumentNode>,
}

impl DocumentNode {
    /// Returns a builder for constructing a node of the given kind
    pub fn builder(kind: NodeKind) -> DocumentNodeBuilder {
        DocumentNodeBuilder::new(kind)
    }

    /// Returns the structural level of this node
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the declared template identifiers in declaration order
    pub fn template_ids(&self) -> &[TemplateId] {
        &self.template_ids
    }

    /// Returns the first declared template identifier, if any
    ///
    /// Used as the identity recorded on produced records and failures.
    pub fn primary_template_id(&self) -> Option<&TemplateId> {
        self.template_ids.first()
    }

    /// Returns the node label, if present
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the opaque content payload
    pub fn content(&self) -> &serde_json::Value {
        &self.content
    }

    /// Returns the child nodes in document order
    pub fn children(&self) -> &[DocumentNode] {
        &self.children
    }

    /// Looks up a string field in the content payload
    pub fn content_str(&self, field: &str) -> Option<&str> {
        self.content.get(field).and_then(|v| v.as_str())
    }
}

/// Builder for constructing DocumentNode instances
///
/// Primarily used by tests and by adapters that bridge an upstream parser
/// which does not emit the serialized form directly.
#[derive(Debug)]
pub struct DocumentNodeBuilder {
    kind: NodeKind,
    template_ids: Vec<TemplateId>,
    label: Option<String>,
    content: serde_json::Value,
    children: Vec<DocumentNode>,
}

impl DocumentNodeBuilder {
    /// Creates a new builder for a node of the given kind
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            template_ids: Vec::new(),
            label: None,
            content: serde_json::Value::Null,
            children: Vec::new(),
        }
    }

    /// Appends a declared template identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier string is empty
    pub fn template_id(mut self, id: impl Into<String>) -> Result<Self, String> {
        self.template_ids.push(TemplateId::new(id)?);
        Ok(self)
    }

    /// Sets the node label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the opaque content payload
    pub fn content(mut self, content: serde_json::Value) -> Self {
        self.content = content;
        self
    }

    /// Appends a child node
    pub fn child(mut self, child: DocumentNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builds the DocumentNode
    pub fn build(self) -> DocumentNode {
        DocumentNode {
            kind: self.kind,
            template_ids: self.template_ids,
            label: self.label,
            content: self.content,
            children: self.children,
        }
    }
}
