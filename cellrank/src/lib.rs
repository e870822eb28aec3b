//! # Cellrank
//!
//! Entity disambiguation for tabular data. Cell text is normalized into
//! mentions, each mention is resolved to a set of candidate knowledge-base
//! identifiers through a surface-form index, and the candidates of all
//! mentions are joined into a weighted multipartite graph whose edges carry
//! embedding similarities. PageRank over that graph picks one entity per
//! mention.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use cellrank::prelude::*;
//!
//! let mut index = SurfaceForms::new();
//! index.insert("earth", "Q2");
//! index.insert("king", "Q12097");
//! index.insert("king", "Q19643");
//!
//! let mut model = KeyedVectors::new(2);
//! model.insert("Q2", vec![1.0, 0.0]).unwrap();
//! model.insert("Q12097", vec![0.9, 0.1]).unwrap();
//! model.insert("Q19643", vec![0.0, 1.0]).unwrap();
//!
//! let disambiguator = Disambiguator::new(
//!     Arc::new(index),
//!     Arc::new(model),
//!     DisambiguationConfig::default(),
//! )?;
//!
//! let table = Table::from_rows(vec![vec!["Earth".to_string(), "King".to_string()]]);
//! let report = disambiguator.disambiguate_table(&table);
//! assert_eq!(report.results[0].selected.as_deref(), Some("Q2"));
//! # Ok::<(), cellrank::CellRankError>(())
//! ```
//!
//! ## Architecture
//!
//! - **text**: normalization of raw cells into mentions
//! - **table**: CSV table source
//! - **knowledge**: embedding model and surface-form index collaborators
//! - **disambiguation**: resolver, graph builder, ranker, selector and pipeline
//! - **config** / **logging**: layered configuration and tracing setup

pub mod config;
pub mod disambiguation;
pub mod knowledge;
pub mod logging;
pub mod table;
pub mod text;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{CellRankConfig, ConfigBuilder, ConfigLoader, LogFormat, LogLevel};

    pub use crate::disambiguation::{
        CandidateResolver, DisambiguationConfig, DisambiguationGraph, DisambiguationReport,
        DisambiguationResult, DisambiguationSummary, Disambiguator, GraphBuilder, GraphScope,
        RankScores, Ranker, RankerConfig, Resolution, ResolutionOutcome, ResolverConfig, select,
    };

    pub use crate::knowledge::{
        CandidateIds, EmbeddingModel, KeyedVectors, ModelMetadata, SurfaceFormIndex,
        SurfaceForms,
    };

    pub use crate::table::Table;
    pub use crate::text::{CellPosition, Mention, Normalizer};

    pub use crate::{CellRankError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Cellrank operations.
///
/// Only infrastructure failures end up here. A mention that matches nothing
/// is an outcome recorded in the report, never an error.
#[derive(Debug, thiserror::Error)]
pub enum CellRankError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// The embedding model could not be loaded
    #[error("Embedding model error: {0}")]
    Model(String),

    /// The surface-form index could not be loaded
    #[error("Surface-form index error: {0}")]
    Index(String),

    /// The input table could not be read
    #[error("Table error: {0}")]
    Table(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for CellRankError {
    fn from(err: crate::config::ConfigError) -> Self {
        CellRankError::Configuration(err.to_string())
    }
}

impl From<crate::knowledge::KnowledgeError> for CellRankError {
    fn from(err: crate::knowledge::KnowledgeError) -> Self {
        use crate::knowledge::KnowledgeError;

        match err {
            KnowledgeError::ModelLoading(_) => CellRankError::Model(err.to_string()),
            KnowledgeError::IndexLoading(_) => CellRankError::Index(err.to_string()),
            KnowledgeError::IO(e) => CellRankError::Io(e),
            KnowledgeError::InvalidVector(_) => CellRankError::Model(err.to_string()),
        }
    }
}

/// Result type for Cellrank operations
pub type Result<T> = std::result::Result<T, CellRankError>;
