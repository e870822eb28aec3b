//! Configuration system for Cellrank.
//!
//! Configuration is layered: built-in defaults, then the first configuration
//! file found, then `CELLRANK_`-prefixed environment variables. Nested keys
//! are separated by `__` in variable names, for example
//! `CELLRANK_DISAMBIGUATION__RANKER__DAMPING=0.9`.

mod builder;
mod loader;
mod models;
#[cfg(test)]
mod tests;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;
pub use validation::validate_config;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "cellrank.toml",
    "cellrank.yaml",
    "cellrank.yml",
    "cellrank.json",
    ".cellrank/config.toml",
    ".cellrank/config.yaml",
    ".cellrank/config.yml",
    ".cellrank/config.json",
];

/// Environment variable prefix for Cellrank configuration
pub const ENV_PREFIX: &str = "CELLRANK_";

/// Separator for nested keys in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
