//! Domain models and types for Meridian.
//!
//! This module contains the core domain models and business rules shared by
//! the registry, factory, and dispatcher.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`TemplateId`])
//! - **Parsed tree input** ([`DocumentNode`], [`NodeKind`], [`NodePath`])
//! - **Normalized output** ([`DomainRecord`], [`RecordKind`], [`ImportOutcome`])
//! - **Error types** ([`MeridianError`], [`ImportFailure`], [`FailureReason`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Meridian uses the newtype pattern for identifiers so that raw strings
//! cannot be confused with validated template identities:
//!
//! ```rust
//! use meridian::domain::TemplateId;
//!
//! # fn example() -> std::result::Result<(), String> {
//! let id = TemplateId::new("2.16.840.1.113883.10.20.22.1.1")?;
//! assert_eq!(id.as_str(), "2.16.840.1.113883.10.20.22.1.1");
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod node;
pub mod outcome;
pub mod path;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{FailureReason, ImportFailure, MeridianError};
pub use ids::TemplateId;
pub use node::{DocumentNode, DocumentNodeBuilder, NodeKind};
pub use outcome::ImportOutcome;
pub use path::NodePath;
pub use record::{DomainRecord, RecordKind};
pub use result::Result;
