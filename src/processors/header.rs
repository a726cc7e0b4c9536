//! Built-in document header processor

use super::{primary_id, HeaderProcessor};
use crate::domain::errors::MeridianError;
use crate::domain::node::DocumentNode;
use crate::domain::record::{DomainRecord, RecordKind};
use crate::domain::result::Result;
use chrono::{DateTime, FixedOffset};

/// Processor for general clinical document headers
///
/// Normalizes the whole-document header content (patient and encounter
/// context) into a header record. Registered for both the US Realm general
/// header template and the CCD document template, since the header shape is
/// shared.
///
/// Expected content shape:
///
/// ```json
/// {
///     "patient": {"id": "p-1", "name": "Ada Lovelace"},
///     "encounter": {"id": "e-9"},
///     "effective_time": "2024-03-01T10:00:00+00:00"
/// }
/// ```
///
/// A patient identifier is mandatory; `effective_time`, when present, must be
/// an RFC 3339 timestamp.
pub struct ClinicalHeaderProcessor;

impl HeaderProcessor for ClinicalHeaderProcessor {
    fn process(&self, node: &DocumentNode) -> Result<DomainRecord> {
        let template_id = primary_id(node)?;

        let patient = node.content().get("patient").ok_or_else(|| {
            MeridianError::DocumentImport("document header is missing patient context".to_string())
        })?;

        let patient_id = patient.get("id").and_then(|v| v.as_str()).ok_or_else(|| {
            MeridianError::DocumentImport(
                "document header patient context has no identifier".to_string(),
            )
        })?;

        let effective_time = match node.content_str("effective_time") {
            Some(raw) => Some(parse_effective_time(raw)?),
            None => None,
        };

        let mut body = serde_json::json!({
            "patient_id": patient_id,
        });
        if let Some(name) = patient.get("name").and_then(|v| v.as_str()) {
            body["patient_name"] = serde_json::Value::String(name.to_string());
        }
        if let Some(encounter_id) = node
            .content()
            .get("encounter")
            .and_then(|e| e.get("id"))
            .and_then(|v| v.as_str())
        {
            body["encounter_id"] = serde_json::Value::String(encounter_id.to_string());
        }
        if let Some(time) = effective_time {
            body["effective_time"] = serde_json::Value::String(time.to_rfc3339());
        }
        if let Some(label) = node.label() {
            body["title"] = serde_json::Value::String(label.to_string());
        }

        Ok(DomainRecord::new(RecordKind::Header, template_id, body))
    }
}

fn parse_effective_time(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).map_err(|e| {
        MeridianError::DocumentImport(format!(
            "document header effective_time '{raw}' is not a valid RFC 3339 timestamp: {e}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::NodeKind;

    fn header_node(content: serde_json::Value) -> DocumentNode {
        DocumentNode::builder(NodeKind::Document)
            .template_id("2.16.840.1.113883.10.20.22.1.1")
            .unwrap()
            .label("Continuity of Care Document")
            .content(content)
            .build()
    }

    #[test]
    fn test_header_processing() {
        let node = header_node(serde_json::json!({
            "patient": {"id": "p-1", "name": "Ada Lovelace"},
            "encounter": {"id": "e-9"},
            "effective_time": "2024-03-01T10:00:00+00:00"
        }));

        let record = ClinicalHeaderProcessor.process(&node).unwrap();
        assert_eq!(record.kind, RecordKind::Header);
        assert_eq!(record.body["patient_id"], "p-1");
        assert_eq!(record.body["patient_name"], "Ada Lovelace");
        assert_eq!(record.body["encounter_id"], "e-9");
        assert_eq!(record.body["title"], "Continuity of Care Document");
    }

    #[test]
    fn test_header_missing_patient_fails() {
        let node = header_node(serde_json::json!({"effective_time": "2024-03-01T10:00:00Z"}));
        let err = ClinicalHeaderProcessor.process(&node).unwrap_err();
        assert!(matches!(err, MeridianError::DocumentImport(_)));
        assert!(err.to_string().contains("patient"));
    }

    #[test]
    fn test_header_missing_patient_id_fails() {
        let node = header_node(serde_json::json!({"patient": {"name": "Ada Lovelace"}}));
        assert!(ClinicalHeaderProcessor.process(&node).is_err());
    }

    #[test]
    fn test_header_invalid_effective_time_fails() {
        let node = header_node(serde_json::json!({
            "patient": {"id": "p-1"},
            "effective_time": "20240301"
        }));
        let err = ClinicalHeaderProcessor.process(&node).unwrap_err();
        assert!(err.to_string().contains("RFC 3339"));
    }

    #[test]
    fn test_header_without_optional_fields() {
        let node = header_node(serde_json::json!({"patient": {"id": "p-1"}}));
        let record = ClinicalHeaderProcessor.process(&node).unwrap();
        assert_eq!(record.body["patient_id"], "p-1");
        assert!(record.body.get("effective_time").is_none());
        assert!(record.body.get("encounter_id").is_none());
    }
}
