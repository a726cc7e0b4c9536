//! Built-in section processors

use super::builtin::{RESULTS_ENTRIES_REQUIRED_OID, VITAL_SIGNS_ENTRIES_REQUIRED_OID};
use super::{primary_id, SectionProcessor};
use crate::domain::errors::MeridianError;
use crate::domain::node::DocumentNode;
use crate::domain::record::{DomainRecord, RecordKind};
use crate::domain::result::Result;

/// Processor for vital signs sections
///
/// Registered for both the plain vital signs section template and its
/// entries-required variant. The entries-required variant demands at least
/// one dispatched entry record; a bare narrative section satisfies only the
/// plain template.
pub struct VitalSignsSectionProcessor;

impl SectionProcessor for VitalSignsSectionProcessor {
    fn process(&self, node: &DocumentNode, child_records: &[DomainRecord]) -> Result<DomainRecord> {
        section_record(node, child_records, "vital-signs", VITAL_SIGNS_ENTRIES_REQUIRED_OID)
    }
}

/// Processor for laboratory results sections
pub struct ResultsSectionProcessor;

impl SectionProcessor for ResultsSectionProcessor {
    fn process(&self, node: &DocumentNode, child_records: &[DomainRecord]) -> Result<DomainRecord> {
        section_record(node, child_records, "results", RESULTS_ENTRIES_REQUIRED_OID)
    }
}

/// Shared section normalization
///
/// A section must carry a title (node label or a `title` content field).
/// When the node declares the entries-required template variant, at least one
/// entry record must have been dispatched for it.
fn section_record(
    node: &DocumentNode,
    child_records: &[DomainRecord],
    domain: &str,
    entries_required_oid: &str,
) -> Result<DomainRecord> {
    let template_id = primary_id(node)?;

    let title = node
        .label()
        .or_else(|| node.content_str("title"))
        .ok_or_else(|| {
            MeridianError::DocumentImport(format!("{domain} section is missing a title"))
        })?;

    let entries_required = node
        .template_ids()
        .iter()
        .any(|id| id.as_str() == entries_required_oid);
    if entries_required && child_records.is_empty() {
        return Err(MeridianError::DocumentImport(format!(
            "{domain} section declares the entries-required template but produced no entry records"
        )));
    }

    let entries: Vec<serde_json::Value> = child_records
        .iter()
        .map(|record| {
            serde_json::json!({
                "template_id": record.template_id.as_str(),
                "path": record.path,
            })
        })
        .collect();

    Ok(DomainRecord::new(
        RecordKind::Section,
        template_id,
        serde_json::json!({
            "domain": domain,
            "title": title,
            "entry_count": child_records.len(),
            "entries": entries,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::NodeKind;
    use crate::domain::path::NodePath;
    use crate::domain::TemplateId;

    fn section_node(oid: &str, label: Option<&str>) -> DocumentNode {
        let mut builder = DocumentNode::builder(NodeKind::Section)
            .template_id(oid)
            .unwrap();
        if let Some(label) = label {
            builder = builder.label(label);
        }
        builder.build()
    }

    fn entry_record() -> DomainRecord {
        DomainRecord::new(
            RecordKind::Entry,
            TemplateId::new("2.16.840.1.113883.10.20.22.4.27").unwrap(),
            serde_json::json!({"code": "8480-6", "value": 120.0}),
        )
        .at(NodePath::root().child(1).child(0))
    }

    #[test]
    fn test_vital_signs_section() {
        let node = section_node("2.16.840.1.113883.10.20.22.2.4", Some("Vital Signs"));
        let record = VitalSignsSectionProcessor
            .process(&node, &[entry_record()])
            .unwrap();

        assert_eq!(record.kind, RecordKind::Section);
        assert_eq!(record.body["domain"], "vital-signs");
        assert_eq!(record.body["title"], "Vital Signs");
        assert_eq!(record.body["entry_count"], 1);
    }

    #[test]
    fn test_section_title_from_content() {
        let node = DocumentNode::builder(NodeKind::Section)
            .template_id("2.16.840.1.113883.10.20.22.2.3")
            .unwrap()
            .content(serde_json::json!({"title": "Results"}))
            .build();

        let record = ResultsSectionProcessor.process(&node, &[]).unwrap();
        assert_eq!(record.body["title"], "Results");
    }

    #[test]
    fn test_section_missing_title_fails() {
        let node = section_node("2.16.840.1.113883.10.20.22.2.4", None);
        let err = VitalSignsSectionProcessor.process(&node, &[]).unwrap_err();
        assert!(err.to_string().contains("missing a title"));
    }

    #[test]
    fn test_entries_required_without_entries_fails() {
        let node = section_node(VITAL_SIGNS_ENTRIES_REQUIRED_OID, Some("Vital Signs"));
        let err = VitalSignsSectionProcessor.process(&node, &[]).unwrap_err();
        assert!(matches!(err, MeridianError::DocumentImport(_)));
        assert!(err.to_string().contains("entries-required"));
    }

    #[test]
    fn test_entries_required_with_entries_succeeds() {
        let node = section_node(RESULTS_ENTRIES_REQUIRED_OID, Some("Results"));
        let record = ResultsSectionProcessor
            .process(&node, &[entry_record()])
            .unwrap();
        assert_eq!(record.body["entry_count"], 1);
    }

    #[test]
    fn test_plain_section_allows_empty_entries() {
        let node = section_node("2.16.840.1.113883.10.20.22.2.4", Some("Vital Signs"));
        let record = VitalSignsSectionProcessor.process(&node, &[]).unwrap();
        assert_eq!(record.body["entry_count"], 0);
    }
}
