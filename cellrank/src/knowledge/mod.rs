//! Knowledge-base collaborators consumed by the disambiguation engine.
//!
//! The engine only needs two narrow capabilities: a similarity function over
//! entity identifiers and a surface-form lookup. Both are traits so callers can
//! plug in their own model or index; [`KeyedVectors`] and [`SurfaceForms`] are
//! the in-memory implementations loaded from files.

pub mod embeddings;
pub mod error;
pub mod surface_forms;

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::path::Path;

pub use embeddings::{KeyedVectors, ModelMetadata, cosine_similarity};
pub use error::{KnowledgeError, Result};
pub use surface_forms::SurfaceForms;

/// Candidate entity identifiers for one mention.
///
/// Ordered so that iteration, node insertion and tie-breaking are stable.
pub type CandidateIds = BTreeSet<String>;

/// Similarity source over entity identifiers.
#[cfg_attr(test, mockall::automock)]
pub trait EmbeddingModel: Send + Sync + Debug {
    /// Whether the model holds a vector for `id`.
    fn has_embedding(&self, id: &str) -> bool;

    /// Similarity of two entities in the model's native range.
    ///
    /// Returns `None` when either identifier has no embedding.
    fn similarity(&self, a: &str, b: &str) -> Option<f32>;
}

/// Lookup from normalized surface text to candidate entity identifiers.
pub trait SurfaceFormIndex: Send + Sync + Debug {
    /// Candidates registered under `text`, or `None` if the text is unknown.
    fn lookup(&self, text: &str) -> Option<&CandidateIds>;

    /// Number of surface forms in the index.
    fn len(&self) -> usize;

    /// Whether the index has no surface forms.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load an embedding model from a word2vec text file.
pub fn load_embeddings(path: impl AsRef<Path>) -> Result<KeyedVectors> {
    KeyedVectors::load(path)
}

/// Load a surface-form index from a JSON or TSV file.
pub fn load_surface_forms(path: impl AsRef<Path>) -> Result<SurfaceForms> {
    SurfaceForms::load(path)
}
