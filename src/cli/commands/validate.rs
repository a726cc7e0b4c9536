//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Meridian configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates internally, so a successful load is a valid config
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Application: {}", config.application.name);
        println!("  Version: {}", config.application.version);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Import Policy: {}", config.import.on_missing_processor);
        println!("  Fail Fast Limit: {}", config.import.fail_fast_limit);
        println!(
            "  Enabled Processors: {}",
            if config.registry.enabled_processors.is_empty() {
                "All".to_string()
            } else {
                format!("{:?}", config.registry.enabled_processors)
            }
        );
        println!("  File Logging: {}", config.logging.local_enabled);
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_missing_file() {
        let args = ValidateArgs {};
        let code = args.execute("does-not-exist.toml").unwrap();
        assert_eq!(code, 2);
    }

    #[test]
    fn test_validate_valid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[import]\non_missing_processor = \"lenient\"\n")
            .unwrap();
        temp_file.flush().unwrap();

        let args = ValidateArgs {};
        let code = args
            .execute(temp_file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_validate_invalid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[import]\non_missing_processor = \"permissive\"\n")
            .unwrap();
        temp_file.flush().unwrap();

        let args = ValidateArgs {};
        let code = args
            .execute(temp_file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(code, 2);
    }
}
