//! End-to-end disambiguation: resolve, build, rank, select.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::CellRankConfig;
use crate::knowledge::{self, EmbeddingModel, SurfaceFormIndex};
use crate::table::Table;
use crate::text::{Mention, Normalizer};
use crate::{CellRankError, Result};

use super::config::{DisambiguationConfig, GraphScope};
use super::graph::GraphBuilder;
use super::ranker::Ranker;
use super::resolver::CandidateResolver;
use super::selector::select;
use super::types::{
    DisambiguationReport, DisambiguationResult, DisambiguationSummary, Resolution,
    ResolutionOutcome,
};

/// Links table mentions to knowledge-base entities.
///
/// The surface-form index and embedding model are shared, read-only
/// collaborators; one `Disambiguator` can serve any number of runs.
#[derive(Debug, Clone)]
pub struct Disambiguator {
    index: Arc<dyn SurfaceFormIndex>,
    model: Arc<dyn EmbeddingModel>,
    config: DisambiguationConfig,
    ranker: Ranker,
}

impl Disambiguator {
    pub fn new(
        index: Arc<dyn SurfaceFormIndex>,
        model: Arc<dyn EmbeddingModel>,
        config: DisambiguationConfig,
    ) -> Result<Self> {
        let ranker = Ranker::new(config.ranker.clone())?;
        Ok(Self {
            index,
            model,
            config,
            ranker,
        })
    }

    /// Load the index and model named in `config.data` and build a
    /// disambiguator from them.
    pub fn from_config(config: &CellRankConfig) -> Result<Self> {
        let index_path = config.data.surface_forms.as_ref().ok_or_else(|| {
            CellRankError::Configuration("data.surface_forms is not set".to_string())
        })?;
        let model_path = config.data.embeddings.as_ref().ok_or_else(|| {
            CellRankError::Configuration("data.embeddings is not set".to_string())
        })?;

        let index = knowledge::load_surface_forms(index_path)?;
        let model = knowledge::load_embeddings(model_path)?;

        Self::new(
            Arc::new(index),
            Arc::new(model),
            config.disambiguation.clone(),
        )
    }

    /// Bias every ranking towards the given entities.
    pub fn with_personalization(mut self, personalization: BTreeMap<String, f64>) -> Self {
        self.ranker = self.ranker.with_personalization(personalization);
        self
    }

    pub fn config(&self) -> &DisambiguationConfig {
        &self.config
    }

    pub fn model(&self) -> &dyn EmbeddingModel {
        self.model.as_ref()
    }

    pub fn index(&self) -> &dyn SurfaceFormIndex {
        self.index.as_ref()
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.config.text.strip_digits)
    }

    pub fn resolver(&self) -> CandidateResolver<'_> {
        CandidateResolver::new(
            self.index.as_ref(),
            self.model.as_ref(),
            &self.config.resolver,
        )
    }

    /// Normalize the cells of `table` and disambiguate the resulting mentions.
    ///
    /// Cells that normalize to empty text are counted as skipped and get no
    /// result.
    pub fn disambiguate_table(&self, table: &Table) -> DisambiguationReport {
        let (mentions, skipped) = self.normalizer().mentions(table);
        let mut report = self.disambiguate_mentions(&mentions);
        report.summary.skipped += skipped;
        report
    }

    /// Disambiguate mentions, returning one result per mention in input order.
    pub fn disambiguate_mentions(&self, mentions: &[Mention]) -> DisambiguationReport {
        let span = tracing::info_span!(
            "disambiguate",
            mentions = mentions.len(),
            scope = %self.config.graph.scope
        );
        let _enter = span.enter();

        let resolutions = self.resolver().resolve_all(mentions);
        let mut summary = DisambiguationSummary {
            mentions: mentions.len(),
            ..DisambiguationSummary::default()
        };
        for resolution in &resolutions {
            summary.candidates_kept += resolution.kept;
            summary.candidates_discarded += resolution.discarded;
            match resolution.outcome {
                ResolutionOutcome::Skipped => summary.skipped += 1,
                ResolutionOutcome::NoSurfaceForm => summary.no_surface_form += 1,
                ResolutionOutcome::NoEmbedding => summary.no_embedding += 1,
                ResolutionOutcome::Resolved => {}
            }
        }

        let mut selections: Vec<Option<(String, f64)>> = vec![None; mentions.len()];
        for group in self.groups(mentions, &resolutions) {
            self.rank_group(&group, &resolutions, &mut selections, &mut summary);
        }

        let results: Vec<DisambiguationResult> = mentions
            .iter()
            .zip(resolutions)
            .zip(selections)
            .map(|((mention, resolution), selection)| {
                let (selected, score) = match selection {
                    Some((id, score)) => (Some(id), Some(score)),
                    None => (None, None),
                };
                DisambiguationResult {
                    mention: mention.clone(),
                    outcome: resolution.outcome,
                    selected,
                    score,
                    candidates: resolution.candidates.into_iter().collect(),
                }
            })
            .collect();
        summary.disambiguated = results.iter().filter(|r| r.selected.is_some()).count();

        tracing::info!(
            mentions = summary.mentions,
            disambiguated = summary.disambiguated,
            no_surface_form = summary.no_surface_form,
            no_embedding = summary.no_embedding,
            skipped = summary.skipped,
            graphs = summary.graphs,
            "Disambiguation finished"
        );

        DisambiguationReport { results, summary }
    }

    /// Indices of resolved mentions, grouped by graph scope.
    fn groups(&self, mentions: &[Mention], resolutions: &[Resolution]) -> Vec<Vec<usize>> {
        let resolved = (0..mentions.len())
            .filter(|&i| resolutions[i].outcome == ResolutionOutcome::Resolved);

        match self.config.graph.scope {
            GraphScope::Table => {
                let all: Vec<usize> = resolved.collect();
                if all.is_empty() { Vec::new() } else { vec![all] }
            }
            GraphScope::Row => {
                let mut rows: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
                for i in resolved {
                    rows.entry(mentions[i].position.row).or_default().push(i);
                }
                rows.into_values().collect()
            }
        }
    }

    fn rank_group(
        &self,
        group: &[usize],
        resolutions: &[Resolution],
        selections: &mut [Option<(String, f64)>],
        summary: &mut DisambiguationSummary,
    ) {
        let candidate_sets: Vec<_> = group
            .iter()
            .map(|&i| resolutions[i].candidates.clone())
            .collect();

        let graph = GraphBuilder::new(self.model.as_ref()).build(&candidate_sets);
        summary.graphs += 1;
        summary.graph_nodes += graph.node_count();
        summary.graph_edges += graph.edge_count();
        summary.missing_similarities += graph.missing_similarities();

        let scores = self.ranker.rank(&graph);
        if !scores.converged {
            summary.unconverged_rankings += 1;
        }
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            iterations = scores.iterations,
            converged = scores.converged,
            "Ranked graph"
        );

        for (&i, candidates) in group.iter().zip(&candidate_sets) {
            selections[i] = select(candidates, &scores);
        }
    }
}
