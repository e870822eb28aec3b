//! Configuration builder.

use super::{Result, models::*, validation};
use crate::disambiguation::{DisambiguationConfig, GraphScope};
use std::path::Path;

/// Builder for creating CellRankConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: CellRankConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: CellRankConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: CellRankConfig) -> Self {
        Self { config }
    }

    /// Set the surface-form index file.
    pub fn with_surface_forms<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.data.surface_forms = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the embedding model file.
    pub fn with_embeddings<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.data.embeddings = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replace the engine settings wholesale.
    pub fn with_disambiguation(mut self, disambiguation: DisambiguationConfig) -> Self {
        self.config.disambiguation = disambiguation;
        self
    }

    /// Set the graph scope.
    pub fn with_scope(mut self, scope: GraphScope) -> Self {
        self.config.disambiguation.graph.scope = scope;
        self
    }

    /// Drop digits from cell text before lookup.
    pub fn with_strip_digits(mut self, strip: bool) -> Self {
        self.config.disambiguation.text.strip_digits = strip;
        self
    }

    /// Set the PageRank damping factor.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.config.disambiguation.ranker.damping = damping;
        self
    }

    /// Set the PageRank tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.disambiguation.ranker.tolerance = tolerance;
        self
    }

    /// Set the PageRank iteration bound.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.disambiguation.ranker.max_iterations = max_iterations;
        self
    }

    /// Treat the first CSV record as a header.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.config.table.has_header = has_header;
        self
    }

    /// Set the CSV delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.config.table.delimiter = delimiter;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Create a configuration for development.
    ///
    /// Debug-level pretty logging, otherwise defaults.
    pub fn development() -> Self {
        Self::new()
            .with_log_level(LogLevel::Debug)
            .with_log_format(LogFormat::Pretty)
    }

    /// Create a configuration for testing.
    ///
    /// Warnings only, compact output, and a tight iteration bound so that
    /// slow convergence shows up in tests.
    pub fn testing() -> Self {
        Self::new()
            .with_log_level(LogLevel::Warn)
            .with_log_format(LogFormat::Compact)
            .with_max_iterations(50)
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<CellRankConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
