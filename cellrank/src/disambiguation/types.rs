//! Result and diagnostic types produced by a disambiguation run.

use serde::{Deserialize, Serialize};

use crate::knowledge::CandidateIds;
use crate::text::{CellPosition, Mention};

/// How the lookup of one mention ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// Empty text, nothing was looked up
    Skipped,
    /// No lookup variant matched a surface form
    NoSurfaceForm,
    /// Surface forms matched but no candidate had an embedding
    NoEmbedding,
    /// At least one candidate survived
    Resolved,
}

impl ResolutionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionOutcome::Skipped => "skipped",
            ResolutionOutcome::NoSurfaceForm => "no_surface_form",
            ResolutionOutcome::NoEmbedding => "no_embedding",
            ResolutionOutcome::Resolved => "resolved",
        }
    }
}

/// Candidate lookup result for one mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: ResolutionOutcome,
    /// Candidates that have an embedding
    pub candidates: CandidateIds,
    /// Ids kept by the embedding filter
    pub kept: usize,
    /// Ids dropped because they have no embedding
    pub discarded: usize,
}

impl Resolution {
    pub(crate) fn skipped() -> Self {
        Self {
            outcome: ResolutionOutcome::Skipped,
            candidates: CandidateIds::new(),
            kept: 0,
            discarded: 0,
        }
    }
}

/// Final decision for one mention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisambiguationResult {
    pub mention: Mention,
    pub outcome: ResolutionOutcome,
    /// Chosen entity, `None` when the mention had no candidates
    pub selected: Option<String>,
    /// Rank score of the chosen entity
    pub score: Option<f64>,
    /// Candidates considered, in id order
    pub candidates: Vec<String>,
}

impl DisambiguationResult {
    pub fn position(&self) -> CellPosition {
        self.mention.position
    }
}

/// Diagnostic counts for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisambiguationSummary {
    /// Mentions processed
    pub mentions: usize,
    /// Cells or mentions with empty normalized text
    pub skipped: usize,
    /// Mentions with no surface form under any variant
    pub no_surface_form: usize,
    /// Mentions whose candidates all lacked an embedding
    pub no_embedding: usize,
    /// Mentions with a selected entity
    pub disambiguated: usize,
    /// Candidate ids kept by the embedding filter
    pub candidates_kept: usize,
    /// Candidate ids dropped by the embedding filter
    pub candidates_discarded: usize,
    /// Graphs built (one per table, or one per row)
    pub graphs: usize,
    pub graph_nodes: usize,
    pub graph_edges: usize,
    /// Cross-mention pairs the model could not score
    pub missing_similarities: usize,
    /// Rankings that hit the iteration bound before converging
    pub unconverged_rankings: usize,
}

impl DisambiguationSummary {
    /// Mentions that produced no entity
    pub fn unmatched(&self) -> usize {
        self.mentions.saturating_sub(self.disambiguated)
    }
}

/// Ordered results plus summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisambiguationReport {
    pub results: Vec<DisambiguationResult>,
    pub summary: DisambiguationSummary,
}

impl DisambiguationReport {
    /// `(position, selected)` pairs in row/column order
    pub fn selections(&self) -> Vec<(CellPosition, Option<&str>)> {
        self.results
            .iter()
            .map(|r| (r.mention.position, r.selected.as_deref()))
            .collect()
    }
}
