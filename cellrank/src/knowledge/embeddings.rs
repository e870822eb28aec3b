//! Keyed entity vectors loaded from word2vec text files.
//!
//! The file format is the plain-text word2vec layout: an optional header line
//! `<count> <dimensions>` followed by one `<entity_id> <f32>...` line per
//! entity. Any malformed line fails the whole load so a partially read model
//! is never used.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use super::EmbeddingModel;
use super::error::{KnowledgeError, Result};

/// Metadata describing a loaded model
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelMetadata {
    /// File the model was loaded from, if any
    pub filename: Option<String>,
    /// Vector dimensions
    pub dimensions: usize,
    /// Number of entities with a vector
    pub vocabulary_size: usize,
}

/// In-memory entity vectors with cosine similarity.
#[derive(Debug, Clone)]
pub struct KeyedVectors {
    vectors: HashMap<String, Vec<f32>>,
    dimensions: usize,
    filename: Option<String>,
}

impl KeyedVectors {
    /// Create an empty model holding vectors of `dimensions` components.
    pub fn new(dimensions: usize) -> Self {
        Self {
            vectors: HashMap::new(),
            dimensions,
            filename: None,
        }
    }

    /// Load a model from a word2vec text file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            KnowledgeError::model_loading(format!("{}: {}", path.display(), e))
        })?;

        let mut model = Self::from_reader(file)?;
        model.filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string());

        tracing::info!(
            path = %path.display(),
            dimensions = model.dimensions,
            vocabulary = model.vectors.len(),
            "Loaded embedding model"
        );

        Ok(model)
    }

    /// Parse a model from any reader in word2vec text format.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = BufReader::new(reader);
        let mut dimensions: Option<usize> = None;
        let mut declared_count: Option<usize> = None;
        let mut vectors = HashMap::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                KnowledgeError::model_loading(format!("line {}: {}", line_no + 1, e))
            })?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let Some(key) = fields.next() else {
                continue;
            };
            let values: Vec<&str> = fields.collect();

            if line_no == 0
                && values.len() == 1
                && let (Ok(count), Ok(dims)) = (key.parse::<usize>(), values[0].parse::<usize>())
            {
                declared_count = Some(count);
                dimensions = Some(dims);
                continue;
            }

            let vector = values
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| {
                    KnowledgeError::model_loading(format!("line {}: {}", line_no + 1, e))
                })?;

            let expected = *dimensions.get_or_insert(vector.len());
            if vector.len() != expected || expected == 0 {
                return Err(KnowledgeError::model_loading(format!(
                    "line {}: expected {} components for '{}', got {}",
                    line_no + 1,
                    expected,
                    key,
                    vector.len()
                )));
            }
            if vector.iter().any(|v| !v.is_finite()) {
                return Err(KnowledgeError::model_loading(format!(
                    "line {}: non-finite component in vector for '{}'",
                    line_no + 1,
                    key
                )));
            }

            vectors.insert(key.to_string(), vector);
        }

        if let Some(count) = declared_count
            && count != vectors.len()
        {
            return Err(KnowledgeError::model_loading(format!(
                "header declares {} vectors but {} were read",
                count,
                vectors.len()
            )));
        }

        Ok(Self {
            vectors,
            dimensions: dimensions.unwrap_or(0),
            filename: None,
        })
    }

    /// Add or replace the vector for `id`.
    pub fn insert(&mut self, id: impl Into<String>, vector: Vec<f32>) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(KnowledgeError::invalid_vector(format!(
                "expected {} components, got {}",
                self.dimensions,
                vector.len()
            )));
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(KnowledgeError::invalid_vector("non-finite component"));
        }
        self.vectors.insert(id.into(), vector);
        Ok(())
    }

    /// Vector stored for `id`
    pub fn vector(&self, id: &str) -> Option<&[f32]> {
        self.vectors.get(id).map(Vec::as_slice)
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Metadata describing this model
    pub fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            filename: self.filename.clone(),
            dimensions: self.dimensions,
            vocabulary_size: self.vectors.len(),
        }
    }
}

impl EmbeddingModel for KeyedVectors {
    fn has_embedding(&self, id: &str) -> bool {
        self.vectors.contains_key(id)
    }

    fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        let a = self.vectors.get(a)?;
        let b = self.vectors.get(b)?;
        Some(cosine_similarity(a, b))
    }
}

/// Cosine similarity of two vectors, 0.0 when either has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum();
    let a_norm: f32 = a.iter().map(|&x| x * x).sum::<f32>().sqrt();
    let b_norm: f32 = b.iter().map(|&x| x * x).sum::<f32>().sqrt();

    if a_norm == 0.0 || b_norm == 0.0 {
        return 0.0;
    }

    dot_product / (a_norm * b_norm)
}
