//! Error types for loading knowledge-base collaborators

use std::fmt;
use thiserror::Error;

/// Error type for embedding model and surface-form index operations
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// Error while loading an embedding model
    #[error("Failed to load embedding model: {0}")]
    ModelLoading(String),

    /// Error while loading a surface-form index
    #[error("Failed to load surface-form index: {0}")]
    IndexLoading(String),

    /// A vector was rejected (wrong dimension, non-finite values)
    #[error("Invalid vector: {0}")]
    InvalidVector(String),

    /// IO error while reading a model or index file
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

impl KnowledgeError {
    /// Create a new model loading error
    pub fn model_loading(msg: impl fmt::Display) -> Self {
        Self::ModelLoading(msg.to_string())
    }

    /// Create a new index loading error
    pub fn index_loading(msg: impl fmt::Display) -> Self {
        Self::IndexLoading(msg.to_string())
    }

    /// Create a new invalid vector error
    pub fn invalid_vector(msg: impl fmt::Display) -> Self {
        Self::InvalidVector(msg.to_string())
    }
}

/// Result type for knowledge-base operations
pub type Result<T> = std::result::Result<T, KnowledgeError>;
