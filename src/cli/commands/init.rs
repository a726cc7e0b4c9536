//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "meridian.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Meridian configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: meridian validate-config");
                println!("  3. Run an import: meridian import document.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate starter configuration
    fn generate_config() -> String {
        r#"# Meridian Configuration File
# Template-driven import engine for nested clinical documents

[application]
name = "meridian"
log_level = "info"
dry_run = false

[import]
# Behavior when no processor claims a node's template identifiers
# - strict: any unresolved node aborts the whole document
# - lenient: unresolved nodes are skipped and reported
on_missing_processor = "strict"

# Lenient-mode failure cap before the document is aborted (0 = unlimited)
fail_fast_limit = 0

[registry]
# Names of built-in processors to register (empty = all)
enabled_processors = []

# Ignore unknown names in enabled_processors instead of failing startup
allow_unlisted = false

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "meridian.toml".to_string(),
            force: false,
        };

        assert_eq!(args.output, "meridian.toml");
        assert!(!args.force);
    }

    #[test]
    fn test_generate_config() {
        let config = InitArgs::generate_config();
        assert!(config.contains("[application]"));
        assert!(config.contains("[import]"));
        assert!(config.contains("[registry]"));
        assert!(config.contains("on_missing_processor"));
    }

    #[test]
    fn test_generated_config_parses() {
        let config: crate::config::MeridianConfig =
            toml::from_str(&InitArgs::generate_config()).unwrap();
        assert!(config.validate().is_ok());
    }
}
