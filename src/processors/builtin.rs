//! Built-in processor set and startup registration
//!
//! The standard processors cover the common C-CDA templates and are
//! registered under their published template OIDs. The set a deployment
//! enables is a configuration input; registration happens once at startup,
//! before any dispatch call.

use super::entries::{ResultObservationProcessor, VitalSignObservationProcessor};
use super::header::ClinicalHeaderProcessor;
use super::sections::{ResultsSectionProcessor, VitalSignsSectionProcessor};
use super::ProcessorHandle;
use crate::config::RegistryConfig;
use crate::core::registry::{ProcessorDescriptor, TemplateRegistryBuilder};
use crate::domain::errors::MeridianError;
use crate::domain::result::Result;
use crate::domain::TemplateId;
use std::sync::Arc;

/// US Realm general header template
pub const US_REALM_HEADER_OID: &str = "2.16.840.1.113883.10.20.22.1.1";
/// Continuity of Care Document template
pub const CCD_DOCUMENT_OID: &str = "2.16.840.1.113883.10.20.22.1.2";
/// Vital signs section template
pub const VITAL_SIGNS_SECTION_OID: &str = "2.16.840.1.113883.10.20.22.2.4";
/// Vital signs section template, entries required
pub const VITAL_SIGNS_ENTRIES_REQUIRED_OID: &str = "2.16.840.1.113883.10.20.22.2.4.1";
/// Results section template
pub const RESULTS_SECTION_OID: &str = "2.16.840.1.113883.10.20.22.2.3";
/// Results section template, entries required
pub const RESULTS_ENTRIES_REQUIRED_OID: &str = "2.16.840.1.113883.10.20.22.2.3.1";
/// Vital sign observation entry template
pub const VITAL_SIGN_OBSERVATION_OID: &str = "2.16.840.1.113883.10.20.22.4.27";
/// Result observation entry template
pub const RESULT_OBSERVATION_OID: &str = "2.16.840.1.113883.10.20.22.4.2";

/// Registers the built-in processors with a registry builder
///
/// Each built-in declares the template identifiers it supports; matching any
/// one of them is sufficient at resolution time. The configured
/// `enabled_processors` list narrows the set (an empty list enables all).
///
/// # Errors
///
/// Returns `MeridianError::Configuration` when `enabled_processors` names an
/// unknown processor and `allow_unlisted` is false, or
/// `MeridianError::Registration` if a descriptor is rejected.
pub fn register_builtin_processors(
    builder: &mut TemplateRegistryBuilder,
    config: &RegistryConfig,
) -> Result<()> {
    let catalog: Vec<(&str, &[&str], ProcessorHandle)> = vec![
        (
            "clinical-header",
            &[US_REALM_HEADER_OID, CCD_DOCUMENT_OID],
            ProcessorHandle::Header(Arc::new(ClinicalHeaderProcessor)),
        ),
        (
            "vital-signs-section",
            &[VITAL_SIGNS_SECTION_OID, VITAL_SIGNS_ENTRIES_REQUIRED_OID],
            ProcessorHandle::Section(Arc::new(VitalSignsSectionProcessor)),
        ),
        (
            "results-section",
            &[RESULTS_SECTION_OID, RESULTS_ENTRIES_REQUIRED_OID],
            ProcessorHandle::Section(Arc::new(ResultsSectionProcessor)),
        ),
        (
            "vital-sign-observation",
            &[VITAL_SIGN_OBSERVATION_OID],
            ProcessorHandle::Entry(Arc::new(VitalSignObservationProcessor)),
        ),
        (
            "result-observation",
            &[RESULT_OBSERVATION_OID],
            ProcessorHandle::Entry(Arc::new(ResultObservationProcessor)),
        ),
    ];

    let known: Vec<&str> = catalog.iter().map(|(name, _, _)| *name).collect();
    for requested in &config.enabled_processors {
        if !known.contains(&requested.as_str()) {
            if config.allow_unlisted {
                tracing::warn!(
                    processor = %requested,
                    "Ignoring unknown processor name in enabled_processors"
                );
            } else {
                return Err(MeridianError::Configuration(format!(
                    "Unknown processor '{}' in enabled_processors. Known processors: {}",
                    requested,
                    known.join(", ")
                )));
            }
        }
    }

    for (name, oids, handle) in catalog {
        if !config.is_enabled(name) {
            tracing::debug!(processor = name, "Processor disabled by configuration");
            continue;
        }

        let template_ids = oids
            .iter()
            .map(|oid| TemplateId::new(*oid).map_err(MeridianError::Registration))
            .collect::<Result<Vec<_>>>()?;

        builder.register(ProcessorDescriptor::new(name, template_ids, handle))?;
    }

    Ok(())
}
