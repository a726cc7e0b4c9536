// Meridian - Clinical Document Import Engine
// Copyright (c) 2025 Meridian Contributors
// Licensed under the MIT License

//! # Meridian - Clinical Document Import Engine
//!
//! Meridian is a template-driven import engine built in Rust that routes parsed
//! clinical document trees to domain processors and flattens them into
//! normalized records for downstream storage.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Registering** processors against the template identifiers they claim
//! - **Resolving** one processor per node from its declared template identity
//! - **Dispatching** document trees depth-first under a strict or lenient policy
//! - **Reporting** produced records and per-node failures per import
//!
//! ## Architecture
//!
//! Meridian follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (registry, factory, dispatch)
//! - [`processors`] - Processor contracts and built-in implementations
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use meridian::config::RegistryConfig;
//! use meridian::core::dispatch::{Dispatcher, ImportPolicy, ProcessorFactory};
//! use meridian::core::registry::TemplateRegistryBuilder;
//! use meridian::domain::{DocumentNode, NodeKind};
//! use meridian::processors::register_builtin_processors;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Register the built-in processor set
//! let mut builder = TemplateRegistryBuilder::new();
//! register_builtin_processors(&mut builder, &RegistryConfig::default())?;
//! let registry = Arc::new(builder.build());
//!
//! // Dispatch a parsed document tree
//! let dispatcher = Dispatcher::new(ProcessorFactory::new(registry), ImportPolicy::Lenient);
//! let root = DocumentNode::builder(NodeKind::Document)
//!     .template_id("2.16.840.1.113883.10.20.22.1.1")?
//!     .content(serde_json::json!({"patient": {"id": "p-1"}}))
//!     .build();
//!
//! let outcome = dispatcher.dispatch(&root);
//! println!("Produced {} records", outcome.records().len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Resolution
//!
//! A node may declare several template identifiers; a processor may claim
//! several. Resolution takes the union of processors claiming any declared
//! identifier at the node's structural level. A single candidate wins
//! outright; among several, the processor claiming the fewest identifiers is
//! preferred as the most specific, and a tie is an unrecoverable ambiguity.
//!
//! ## Error Handling
//!
//! Meridian uses the [`domain::MeridianError`] type for all errors:
//!
//! ```rust,no_run
//! use meridian::domain::MeridianError;
//!
//! fn example() -> Result<(), MeridianError> {
//!     let config = meridian::config::load_config("meridian.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Meridian uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting import");
//! warn!(path = "/0/2", "No processor found, node skipped");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod processors;
