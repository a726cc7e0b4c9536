//! Domain error types
//!
//! This module defines the error hierarchy for Meridian. All errors are
//! domain-specific and don't expose third-party types. Processor and
//! resolution errors are never swallowed; the dispatcher is the sole point
//! where policy decides whether an error aborts the document or is recorded
//! as an [`ImportFailure`].

use super::ids::TemplateId;
use super::node::NodeKind;
use super::path::NodePath;
use serde::Serialize;
use thiserror::Error;

/// Main Meridian error type
///
/// This is the primary error type used throughout the crate. It wraps
/// specific error kinds and provides context for error handling.
#[derive(Debug, Error)]
pub enum MeridianError {
    /// Invalid processor descriptor at startup; aborts the registry build
    #[error("Registration error: {0}")]
    Registration(String),

    /// No registered processor claims any of a node's template identifiers
    #[error("No {kind} processor found for template ids [{template_ids}]")]
    NoProcessorFound {
        /// Structural level of the unresolvable node
        kind: NodeKind,
        /// Declared identifiers of the unresolvable node, comma-joined
        template_ids: String,
    },

    /// Two or more equally-specific processors claim a node's identifiers
    #[error("Ambiguous {kind} processor resolution: candidates [{candidates}]")]
    AmbiguousProcessor {
        /// Structural level of the contested node
        kind: NodeKind,
        /// Names of the tied candidate processors, comma-joined
        candidates: String,
    },

    /// Content or structural violation raised by a processor itself
    #[error("Document import error: {0}")]
    DocumentImport(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for MeridianError {
    fn from(err: std::io::Error) -> Self {
        MeridianError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MeridianError {
    fn from(err: serde_json::Error) -> Self {
        MeridianError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MeridianError {
    fn from(err: toml::de::Error) -> Self {
        MeridianError::Configuration(format!("TOML parse error: {err}"))
    }
}

/// Why a node could not be imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FailureReason {
    /// No registered processor claimed any of the node's identifiers
    MissingProcessor,

    /// Resolution found two or more equally-specific candidates
    AmbiguousProcessor {
        /// Names of the tied candidates
        candidates: String,
    },

    /// The resolved processor rejected the node's content or structure
    Import {
        /// Processor-supplied description of the violation
        message: String,
    },
}

/// A structured record of one node that could not be imported
///
/// Carries the offending node's identity context (declared template
/// identifiers and tree path) plus the failure reason, so a consumer can
/// diagnose the failure without the source tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportFailure {
    /// Structural level of the offending node
    pub kind: NodeKind,

    /// Tree path of the offending node
    pub path: NodePath,

    /// Declared template identifiers of the offending node
    pub template_ids: Vec<TemplateId>,

    /// Why the node could not be imported
    pub reason: FailureReason,
}

impl ImportFailure {
    /// Creates a new import failure for the node at `path`
    pub fn new(
        kind: NodeKind,
        path: NodePath,
        template_ids: Vec<TemplateId>,
        reason: FailureReason,
    ) -> Self {
        Self {
            kind,
            path,
            template_ids,
            reason,
        }
    }

    /// Returns true if this failure must abort the document under any policy
    ///
    /// Ambiguous resolution is always fatal: silently picking one of several
    /// equally-plausible processors risks misclassifying clinical data.
    pub fn is_always_fatal(&self) -> bool {
        matches!(self.reason, FailureReason::AmbiguousProcessor { .. })
    }

    /// Renders a one-line description for logs and CLI output
    pub fn describe(&self) -> String {
        let reason = match &self.reason {
            FailureReason::MissingProcessor => "no processor registered".to_string(),
            FailureReason::AmbiguousProcessor { candidates } => {
                format!("ambiguous resolution between [{candidates}]")
            }
            FailureReason::Import { message } => message.clone(),
        };
        format!("{} at {}: {}", self.kind, self.path, reason)
    }
}
