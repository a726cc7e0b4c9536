//! Configuration management for Meridian.
//!
//! TOML-based configuration loading, parsing, and validation with support
//! for environment variable substitution (`${VAR_NAME}`) and `MERIDIAN_*`
//! environment overrides.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! name = "meridian"
//! log_level = "info"
//!
//! [import]
//! on_missing_processor = "lenient"
//! fail_fast_limit = 25
//!
//! [registry]
//! enabled_processors = ["clinical-header", "vital-signs-section"]
//!
//! [logging]
//! local_enabled = true
//! local_path = "logs"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ImportConfig, LoggingConfig, MeridianConfig, RegistryConfig,
};
