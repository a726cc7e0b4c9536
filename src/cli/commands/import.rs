//! Import command implementation
//!
//! This module implements the `import` command for dispatching a parsed
//! clinical document tree through the registered processors.

use crate::cli::commands::load_or_default;
use crate::core::dispatch::{Dispatcher, ImportPolicy, ImportSummary, ProcessorFactory};
use crate::core::registry::TemplateRegistryBuilder;
use crate::domain::{DocumentNode, ImportOutcome, NodeKind};
use crate::processors::register_builtin_processors;
use clap::Args;
use std::fs;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to the parsed document tree (JSON)
    pub input: String,

    /// Override the configured policy (strict or lenient)
    #[arg(long)]
    pub policy: Option<String>,

    /// Write produced records to this file as JSON (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Dry run mode - dispatch but do not write record output
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportArgs {
    /// Execute the import command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Starting import command");

        let config = load_or_default(config_path)?;

        // Resolve the policy, with CLI override taking precedence
        let policy = match &self.policy {
            Some(raw) => match ImportPolicy::from_str(raw) {
                Ok(p) => {
                    tracing::info!(policy = %p, "Overriding import policy from CLI");
                    p
                }
                Err(e) => {
                    tracing::error!(error = %e, "Invalid policy argument");
                    eprintln!("{e}");
                    return Ok(2); // Configuration error exit code
                }
            },
            None => match config.import.policy() {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    return Ok(2);
                }
            },
        };

        let dry_run = self.dry_run || config.application.dry_run;
        if dry_run {
            tracing::info!("Dry run mode enabled, records will not be written");
            println!("🔍 DRY RUN MODE - Records will not be written");
            println!();
        }

        // Load the document tree
        let contents = match fs::read_to_string(&self.input) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, input = %self.input, "Failed to read input file");
                eprintln!("Failed to read input file {}: {e}", self.input);
                return Ok(4); // Input error exit code
            }
        };

        let root: DocumentNode = match serde_json::from_str(&contents) {
            Ok(node) => node,
            Err(e) => {
                tracing::error!(error = %e, "Failed to parse document tree");
                eprintln!("Failed to parse document tree: {e}");
                return Ok(4);
            }
        };

        if root.kind() != NodeKind::Document {
            eprintln!("Input root must be a document node, got '{}'", root.kind());
            return Ok(4);
        }

        // Build the registry from configuration
        let mut builder = TemplateRegistryBuilder::new();
        if let Err(e) = register_builtin_processors(&mut builder, &config.registry) {
            tracing::error!(error = %e, "Failed to register processors");
            eprintln!("Failed to register processors: {e}");
            return Ok(2);
        }

        let registry = Arc::new(builder.build());
        tracing::info!(processors = registry.len(), policy = %policy, "Registry built");

        let factory = ProcessorFactory::new(registry);
        let dispatcher = Dispatcher::new(factory, policy)
            .with_failure_limit(config.import.fail_fast_limit);

        println!("🚀 Starting import...");
        println!();

        crate::log_import_start!(root.kind(), policy);
        let started = Instant::now();
        let outcome = dispatcher.dispatch(&root);
        let summary = ImportSummary::from_outcome(&outcome, started.elapsed());
        summary.log_summary();

        // Display summary
        println!("📊 Import Summary:");
        println!("  Total Records: {}", summary.total_records);
        println!("  Header Records: {}", summary.header_records);
        println!("  Section Records: {}", summary.section_records);
        println!("  Entry Records: {}", summary.entry_records);
        println!("  Failures: {}", summary.failure_count);
        println!("  Skipped Nodes: {}", summary.skipped_nodes);
        println!("  Duration: {:.3}s", summary.duration.as_secs_f64());
        println!();

        if !outcome.failures().is_empty() {
            println!("⚠️  Failures encountered:");
            for failure in outcome.failures() {
                println!("  - {}", failure.describe());
            }
            println!();
        }

        // Write records unless dry-run
        if !dry_run && !outcome.records().is_empty() {
            let serialized = serde_json::to_string_pretty(outcome.records())?;
            match &self.output {
                Some(path) => {
                    fs::write(path, &serialized)?;
                    println!("✅ {} records written to {}", outcome.records().len(), path);
                }
                None => println!("{serialized}"),
            }
        }

        let exit_code = match &outcome {
            ImportOutcome::Success(_) => {
                println!("✅ Import completed successfully!");
                0
            }
            ImportOutcome::PartialSuccess { .. } => {
                println!("⚠️  Import completed with failures");
                2
            }
            ImportOutcome::Failure(_) => {
                println!("❌ Import failed");
                4
            }
        };

        Ok(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_args_defaults() {
        let args = ImportArgs {
            input: "doc.json".to_string(),
            policy: None,
            output: None,
            dry_run: false,
        };

        assert_eq!(args.input, "doc.json");
        assert!(args.policy.is_none());
        assert!(args.output.is_none());
        assert!(!args.dry_run);
    }

    #[test]
    fn test_import_missing_input_file() {
        let args = ImportArgs {
            input: "does-not-exist.json".to_string(),
            policy: None,
            output: None,
            dry_run: true,
        };

        let code = args.execute("does-not-exist.toml").unwrap();
        assert_eq!(code, 4);
    }

    #[test]
    fn test_import_invalid_policy_argument() {
        let args = ImportArgs {
            input: "doc.json".to_string(),
            policy: Some("permissive".to_string()),
            output: None,
            dry_run: true,
        };

        let code = args.execute("does-not-exist.toml").unwrap();
        assert_eq!(code, 2);
    }
}
