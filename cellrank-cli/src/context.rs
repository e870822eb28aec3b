use std::path::Path;
use std::sync::Arc;

use cellrank::config::CellRankConfig;
use cellrank::CellRankError;
use cellrank::disambiguation::Disambiguator;
use cellrank::knowledge::{self, EmbeddingModel, KeyedVectors, SurfaceFormIndex};
use cellrank::table::Table;

/// Loaded knowledge base shared by the commands.
pub struct CellRankCliContext {
    pub config: CellRankConfig,
    pub model: Arc<KeyedVectors>,
    pub disambiguator: Disambiguator,
}

impl CellRankCliContext {
    /// Load the embedding model and the surface-form index side by side.
    pub async fn new(config: CellRankConfig) -> cellrank::Result<Self> {
        let index_path = config.data.surface_forms.clone().ok_or_else(|| {
            CellRankError::Configuration(
                "no surface-form index configured (use --surface-forms or data.surface_forms)"
                    .to_string(),
            )
        })?;

        let (model, index) = tokio::try_join!(
            load_model(&config),
            blocking(move || knowledge::load_surface_forms(index_path)),
        )?;
        tracing::debug!(
            vectors = model.len(),
            dimensions = model.dimensions(),
            surface_forms = index.len(),
            scope = %config.disambiguation.graph.scope,
            "Knowledge base loaded"
        );

        let disambiguator = Disambiguator::new(
            Arc::new(index) as Arc<dyn SurfaceFormIndex>,
            Arc::clone(&model) as Arc<dyn EmbeddingModel>,
            config.disambiguation.clone(),
        )?;

        Ok(Self {
            config,
            model,
            disambiguator,
        })
    }

    /// Read the table named by `path` with the configured CSV settings.
    pub fn load_table(&self, path: &Path) -> cellrank::Result<Table> {
        Table::load(path, &self.config.table)
    }
}

/// Load only the embedding model.
pub async fn load_model(config: &CellRankConfig) -> cellrank::Result<Arc<KeyedVectors>> {
    let path = config.data.embeddings.clone().ok_or_else(|| {
        CellRankError::Configuration(
            "no embedding model configured (use --embeddings or data.embeddings)".to_string(),
        )
    })?;

    tracing::debug!(path = %path.display(), "Loading embedding model");
    let model = blocking(move || knowledge::load_embeddings(path)).await?;
    Ok(Arc::new(model))
}

async fn blocking<T, F>(load: F) -> cellrank::Result<T>
where
    F: FnOnce() -> knowledge::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(load)
        .await
        .map_err(|e| CellRankError::Other(format!("loader task failed: {}", e)))?
        .map_err(CellRankError::from)
}
