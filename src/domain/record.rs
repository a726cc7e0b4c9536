//! Normalized domain records produced by processors
//!
//! A [`DomainRecord`] is the output unit of one processor invocation: one
//! document node in, one normalized clinical record out. The body is an
//! opaque payload owned by the caller once returned; the dispatch core keeps
//! no references to it.

use super::ids::TemplateId;
use super::path::NodePath;
use serde::Serialize;
use std::fmt;

/// Kind of record produced from a document node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Header record carrying patient/encounter context
    Header,
    /// Clinical record produced from a section
    Section,
    /// Atomic clinical fact produced from an entry
    Entry,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Header => write!(f, "header"),
            RecordKind::Section => write!(f, "section"),
            RecordKind::Entry => write!(f, "entry"),
        }
    }
}

/// One normalized clinical record produced from one document node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainRecord {
    /// Kind of record
    pub kind: RecordKind,

    /// Template identity of the source node (its primary declared identifier)
    pub template_id: TemplateId,

    /// Tree path of the source node, attached by the dispatcher
    pub path: NodePath,

    /// Normalized record body
    pub body: serde_json::Value,
}

impl DomainRecord {
    /// Creates a new record
    ///
    /// The path defaults to the document root; the dispatcher attaches the
    /// actual source path with [`DomainRecord::at`] after invocation.
    pub fn new(kind: RecordKind, template_id: TemplateId, body: serde_json::Value) -> Self {
        Self {
            kind,
            template_id,
            path: NodePath::root(),
            body,
        }
    }

    /// Tags the record with the tree path of its source node
    pub fn at(mut self, path: NodePath) -> Self {
        self.path = path;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = DomainRecord::new(
            RecordKind::Entry,
            TemplateId::new("2.16.840.1.113883.10.20.22.4.27").unwrap(),
            serde_json::json!({"code": "8480-6", "value": 120.0}),
        );

        assert_eq!(record.kind, RecordKind::Entry);
        assert!(record.path.is_root());
    }

    #[test]
    fn test_record_at_path() {
        let record = DomainRecord::new(
            RecordKind::Section,
            TemplateId::new("1.2.3").unwrap(),
            serde_json::Value::Null,
        )
        .at(NodePath::root().child(2));

        assert_eq!(record.path.to_string(), "/2");
    }

    #[test]
    fn test_record_serialization() {
        let record = DomainRecord::new(
            RecordKind::Header,
            TemplateId::new("2.16.840.1.113883.10.20.22.1.1").unwrap(),
            serde_json::json!({"patient_id": "p-1"}),
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "header");
        assert_eq!(json["body"]["patient_id"], "p-1");
    }

    #[test]
    fn test_record_kind_display() {
        assert_eq!(RecordKind::Header.to_string(), "header");
        assert_eq!(RecordKind::Section.to_string(), "section");
        assert_eq!(RecordKind::Entry.to_string(), "entry");
    }
}
