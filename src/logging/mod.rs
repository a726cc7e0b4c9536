//! Logging and observability
//!
//! Structured logging with configurable log levels, console output, and
//! optional local file logging with rotation.
//!
//! # Example
//!
//! ```no_run
//! use meridian::logging::init_logging;
//! use meridian::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a document import
#[macro_export]
macro_rules! log_import_start {
    ($kind:expr, $policy:expr) => {
        tracing::info!(
            kind = %$kind,
            policy = %$policy,
            "Starting document import"
        );
    };
}

/// Log a node skipped under lenient policy
#[macro_export]
macro_rules! log_node_skipped {
    ($path:expr, $reason:expr) => {
        tracing::warn!(
            path = %$path,
            reason = %$reason,
            "Node skipped"
        );
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_compile() {
        // These tests just verify that the macros compile correctly
        // Actual logging output is not tested in unit tests
    }
}
