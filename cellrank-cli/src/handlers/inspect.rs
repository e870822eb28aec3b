//! Knowledge-base inspection commands: candidates, similarity, model

use cellrank::disambiguation::ResolutionOutcome;
use cellrank::knowledge::{EmbeddingModel, KeyedVectors, ModelMetadata};
use serde::Serialize;

use crate::context::CellRankCliContext;
use crate::output::{print_candidates, print_metadata, print_similarity};

/// How one cell text resolves.
#[derive(Debug, Serialize)]
pub struct CandidatesView {
    pub text: String,
    pub normalized: String,
    pub variants: Vec<String>,
    pub outcome: ResolutionOutcome,
    pub candidates: Vec<String>,
    pub discarded: usize,
}

#[derive(Debug, Serialize)]
pub struct SimilarityView {
    pub a: String,
    pub b: String,
    /// `None` when either id has no embedding
    pub similarity: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct ModelView {
    #[serde(flatten)]
    pub metadata: ModelMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector: Option<VectorView>,
}

#[derive(Debug, Serialize)]
pub struct VectorView {
    pub id: String,
    pub values: Option<Vec<f32>>,
}

pub fn resolve_text(ctx: &CellRankCliContext, text: &str) -> CandidatesView {
    let normalized = ctx.disambiguator.normalizer().normalize(text);
    let resolver = ctx.disambiguator.resolver();
    let variants = if normalized.is_empty() {
        Vec::new()
    } else {
        resolver.lookup_variants(&normalized)
    };
    let resolution = resolver.resolve(&normalized);

    CandidatesView {
        text: text.to_string(),
        normalized,
        variants,
        outcome: resolution.outcome,
        candidates: resolution.candidates.into_iter().collect(),
        discarded: resolution.discarded,
    }
}

pub fn similarity(model: &KeyedVectors, a: &str, b: &str) -> SimilarityView {
    SimilarityView {
        a: a.to_string(),
        b: b.to_string(),
        similarity: model.similarity(a, b),
    }
}

pub fn model_view(model: &KeyedVectors, vector: Option<&str>) -> ModelView {
    ModelView {
        metadata: model.metadata(),
        vector: vector.map(|id| VectorView {
            id: id.to_string(),
            values: model.vector(id).map(<[f32]>::to_vec),
        }),
    }
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn handle_candidates_command(ctx: &CellRankCliContext, text: &str, output_format: &str) {
    let view = resolve_text(ctx, text);
    if output_format == "json" {
        print_json(&view);
    } else {
        print_candidates(&view);
    }
}

pub fn handle_similarity_command(model: &KeyedVectors, a: &str, b: &str, output_format: &str) {
    let view = similarity(model, a, b);
    if output_format == "json" {
        print_json(&view);
    } else {
        print_similarity(&view);
    }
}

pub fn handle_model_command(model: &KeyedVectors, vector: Option<&str>, output_format: &str) {
    let view = model_view(model, vector);
    if output_format == "json" {
        print_json(&view);
    } else {
        print_metadata(&view);
    }
}
