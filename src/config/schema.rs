//! Configuration schema types
//!
//! This module defines the configuration structure mapped from the TOML file.

use crate::core::dispatch::ImportPolicy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main Meridian configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MeridianConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Import policy settings
    #[serde(default)]
    pub import: ImportConfig,

    /// Processor registry settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MeridianConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.import.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_version")]
    pub version: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (dispatch but don't write record output)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_version(),
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Import policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Behavior when no processor claims a node's template identifiers
    /// ("strict" or "lenient")
    #[serde(default = "default_on_missing_processor")]
    pub on_missing_processor: String,

    /// Lenient-mode failure cap before the document is aborted (0 = unlimited)
    #[serde(default)]
    pub fail_fast_limit: usize,
}

impl ImportConfig {
    fn validate(&self) -> Result<(), String> {
        ImportPolicy::from_str(&self.on_missing_processor).map(|_| ())
    }

    /// Returns the configured policy as a typed value
    ///
    /// # Errors
    ///
    /// Returns an error if `on_missing_processor` is not a known policy
    pub fn policy(&self) -> Result<ImportPolicy, String> {
        ImportPolicy::from_str(&self.on_missing_processor)
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            on_missing_processor: default_on_missing_processor(),
            fail_fast_limit: 0,
        }
    }
}

/// Processor registry configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegistryConfig {
    /// Names of built-in processors to register (empty = all)
    #[serde(default)]
    pub enabled_processors: Vec<String>,

    /// Whether unknown names in `enabled_processors` are ignored with a
    /// warning instead of failing startup
    #[serde(default)]
    pub allow_unlisted: bool,
}

impl RegistryConfig {
    /// Returns true if the named processor should be registered
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled_processors.is_empty()
            || self.enabled_processors.iter().any(|n| n == name)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log file rotation ("daily" or "hourly")
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("local_path is required when local_enabled = true".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

fn default_app_name() -> String {
    "meridian".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_on_missing_processor() -> String {
    "strict".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}
