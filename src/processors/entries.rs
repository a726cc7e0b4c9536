//! Built-in entry processors
//!
//! Entry processors perform the leaf transformation and fail only on
//! content-level errors: an unparsable coded or numeric value, or a value
//! outside the physiological range for its code.

use super::{primary_id, EntryProcessor};
use crate::domain::errors::MeridianError;
use crate::domain::node::DocumentNode;
use crate::domain::record::{DomainRecord, RecordKind};
use crate::domain::result::Result;
use regex::Regex;
use std::sync::OnceLock;

/// Physiological plausibility ranges for common vital sign LOINC codes
///
/// Values outside these bounds indicate a transcription or unit error in the
/// source document, not a clinical extreme.
const VITAL_SIGN_RANGES: &[(&str, f64, f64)] = &[
    ("8480-6", 0.0, 400.0),  // systolic blood pressure, mm[Hg]
    ("8462-4", 0.0, 300.0),  // diastolic blood pressure, mm[Hg]
    ("8867-4", 0.0, 300.0),  // heart rate, /min
    ("9279-1", 0.0, 100.0),  // respiratory rate, /min
    ("8310-5", 25.0, 45.0),  // body temperature, Cel
    ("59408-5", 0.0, 100.0), // oxygen saturation, %
];

/// Processor for vital sign observation entries
///
/// Expected content shape:
///
/// ```json
/// {"code": "8480-6", "value": "120", "unit": "mm[Hg]"}
/// ```
///
/// The value must parse as a number (JSON number or numeric string) and,
/// for known vital sign codes, fall within the plausible physiological range.
pub struct VitalSignObservationProcessor;

impl EntryProcessor for VitalSignObservationProcessor {
    fn process(&self, node: &DocumentNode) -> Result<DomainRecord> {
        let template_id = primary_id(node)?;

        let code = node.content_str("code").ok_or_else(|| {
            MeridianError::DocumentImport("vital sign observation has no code".to_string())
        })?;

        let value = numeric_value(node, code)?;

        if let Some((_, min, max)) = VITAL_SIGN_RANGES.iter().find(|(c, _, _)| *c == code) {
            if value < *min || value > *max {
                return Err(MeridianError::DocumentImport(format!(
                    "vital sign {code} value {value} is outside the plausible range {min}..={max}"
                )));
            }
        }

        let mut body = serde_json::json!({
            "code": code,
            "value": value,
        });
        if let Some(unit) = node.content_str("unit") {
            body["unit"] = serde_json::Value::String(unit.to_string());
        }

        Ok(DomainRecord::new(RecordKind::Entry, template_id, body))
    }
}

/// Processor for laboratory result observation entries
///
/// Expected content shape:
///
/// ```json
/// {"code": "2345-7", "system": "loinc", "value": 5.4, "unit": "mmol/L"}
/// ```
///
/// The code must be shaped like a LOINC code (`NNNNN-N`); the value is
/// carried through opaquely but must be present.
pub struct ResultObservationProcessor;

impl EntryProcessor for ResultObservationProcessor {
    fn process(&self, node: &DocumentNode) -> Result<DomainRecord> {
        let template_id = primary_id(node)?;

        let code = node.content_str("code").ok_or_else(|| {
            MeridianError::DocumentImport("result observation has no code".to_string())
        })?;

        if !loinc_shape().is_match(code) {
            return Err(MeridianError::DocumentImport(format!(
                "result observation code '{code}' is not a valid LOINC code"
            )));
        }

        let value = node.content().get("value").cloned().ok_or_else(|| {
            MeridianError::DocumentImport(format!("result observation {code} has no value"))
        })?;

        let mut body = serde_json::json!({
            "code": code,
            "value": value,
        });
        if let Some(unit) = node.content_str("unit") {
            body["unit"] = serde_json::Value::String(unit.to_string());
        }

        Ok(DomainRecord::new(RecordKind::Entry, template_id, body))
    }
}

/// Extracts the observation value as a number
///
/// Accepts a JSON number or a numeric string, since upstream parsers differ
/// on how they carry measured values.
fn numeric_value(node: &DocumentNode, code: &str) -> Result<f64> {
    let raw = node.content().get("value").ok_or_else(|| {
        MeridianError::DocumentImport(format!("vital sign {code} has no value"))
    })?;

    match raw {
        serde_json::Value::Number(n) => n.as_f64().ok_or_else(|| {
            MeridianError::DocumentImport(format!("vital sign {code} value {n} is not finite"))
        }),
        serde_json::Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            MeridianError::DocumentImport(format!(
                "vital sign {code} value '{s}' is not a number"
            ))
        }),
        other => Err(MeridianError::DocumentImport(format!(
            "vital sign {code} value {other} is not numeric"
        ))),
    }
}

fn loinc_shape() -> &'static Regex {
    static LOINC: OnceLock<Regex> = OnceLock::new();
    LOINC.get_or_init(|| Regex::new(r"^\d{1,5}-\d$").unwrap())
}
