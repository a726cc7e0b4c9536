//! Domain identifier types with validation
//!
//! This module provides the newtype wrapper for clinical template identifiers.
//! The type ensures type safety and validates format on construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Template identifier newtype wrapper
///
/// Represents a globally-unique key asserting that a document node conforms
/// to a specific clinical document template. Typically an OID
/// (e.g., `2.16.840.1.113883.10.20.22.2.4.1`), but any non-empty string is
/// accepted since identifier schemes vary by document standard.
///
/// Equality is exact-string; there is no hierarchy or wildcard matching.
///
/// # Examples
///
/// ```
/// use meridian::domain::ids::TemplateId;
/// use std::str::FromStr;
///
/// let id = TemplateId::from_str("2.16.840.1.113883.10.20.22.2.4.1").unwrap();
/// assert_eq!(id.as_str(), "2.16.840.1.113883.10.20.22.2.4.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct TemplateId(String);

impl TemplateId {
    /// Creates a new TemplateId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The template identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(TemplateId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Template identifier cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the template identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TemplateId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TemplateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Deserialization goes through the same validation as new(), so an
// identifier from a JSON document tree cannot bypass the non-empty check.
impl TryFrom<String> for TemplateId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Joins a sequence of template identifiers for display in log and error
/// messages
pub fn join_ids(ids: &[TemplateId]) -> String {
    ids.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
