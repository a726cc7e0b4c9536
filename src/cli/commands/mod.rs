//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod import;
pub mod init;
pub mod registry;
pub mod validate;

use crate::config::{load_config, MeridianConfig};

/// Loads configuration for a command, falling back to defaults when the
/// file is absent.
pub(crate) fn load_or_default(config_path: &str) -> anyhow::Result<MeridianConfig> {
    if std::path::Path::new(config_path).exists() {
        Ok(load_config(config_path)?)
    } else {
        tracing::warn!(
            config_path = %config_path,
            "Configuration file not found, using defaults"
        );
        Ok(MeridianConfig::default())
    }
}
