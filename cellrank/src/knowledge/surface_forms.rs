//! Surface-form index mapping normalized text to candidate entity ids.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use super::error::{KnowledgeError, Result};
use super::{CandidateIds, SurfaceFormIndex};

/// In-memory surface-form index.
#[derive(Debug, Clone, Default)]
pub struct SurfaceForms {
    entries: HashMap<String, CandidateIds>,
}

impl SurfaceForms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an index file, choosing the parser from the extension.
    ///
    /// `.json` files hold an object of `surface -> [ids]`; `.tsv` and `.txt`
    /// files hold one `surface<TAB>id` pair per line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            KnowledgeError::index_loading(format!("{}: {}", path.display(), e))
        })?;

        let index = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_reader(file)?,
            Some("tsv") | Some("txt") => Self::from_tsv_reader(file)?,
            _ => {
                return Err(KnowledgeError::index_loading(format!(
                    "Unsupported file format: {}",
                    path.display()
                )));
            }
        };

        tracing::info!(
            path = %path.display(),
            surface_forms = index.entries.len(),
            "Loaded surface-form index"
        );

        Ok(index)
    }

    /// Parse a JSON object mapping surface text to an array of ids.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_reader(reader)
            .map_err(|e| KnowledgeError::index_loading(e.to_string()))?;

        let entries = raw
            .into_iter()
            .map(|(surface, ids)| (surface, ids.into_iter().collect()))
            .collect();

        Ok(Self { entries })
    }

    /// Parse tab-separated `surface<TAB>id` lines.
    pub fn from_tsv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut index = Self::new();

        for (line_no, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.map_err(|e| {
                KnowledgeError::index_loading(format!("line {}: {}", line_no + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let Some((surface, id)) = line.split_once('\t') else {
                return Err(KnowledgeError::index_loading(format!(
                    "line {}: expected 'surface<TAB>id'",
                    line_no + 1
                )));
            };
            let id = id.trim();
            if id.is_empty() {
                return Err(KnowledgeError::index_loading(format!(
                    "line {}: empty entity id",
                    line_no + 1
                )));
            }

            index.insert(surface, id);
        }

        Ok(index)
    }

    /// Register `id` as a candidate for `surface`.
    pub fn insert(&mut self, surface: impl Into<String>, id: impl Into<String>) {
        self.entries
            .entry(surface.into())
            .or_default()
            .insert(id.into());
    }
}

impl SurfaceFormIndex for SurfaceForms {
    fn lookup(&self, text: &str) -> Option<&CandidateIds> {
        self.entries.get(text)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
