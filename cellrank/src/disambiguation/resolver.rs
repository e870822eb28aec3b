//! Candidate resolution: surface-form lookup under several text variants.

use crate::knowledge::{CandidateIds, EmbeddingModel, SurfaceFormIndex};
use crate::text::{Mention, capitalize};

use super::config::ResolverConfig;
use super::types::{Resolution, ResolutionOutcome};

/// Resolves mention text to the candidate entities that have an embedding.
#[derive(Debug, Clone, Copy)]
pub struct CandidateResolver<'a> {
    index: &'a dyn SurfaceFormIndex,
    model: &'a dyn EmbeddingModel,
    config: &'a ResolverConfig,
}

impl<'a> CandidateResolver<'a> {
    pub fn new(
        index: &'a dyn SurfaceFormIndex,
        model: &'a dyn EmbeddingModel,
        config: &'a ResolverConfig,
    ) -> Self {
        Self {
            index,
            model,
            config,
        }
    }

    /// Texts looked up for `text`, in lookup order and without repeats:
    /// the text itself, its capitalized form, then each of its tokens.
    pub fn lookup_variants(&self, text: &str) -> Vec<String> {
        let mut variants = vec![text.to_string()];

        if self.config.capitalized_variant {
            variants.push(capitalize(text));
        }
        if self.config.token_variants {
            variants.extend(text.split_whitespace().map(str::to_string));
        }

        let mut seen = std::collections::HashSet::new();
        variants.retain(|v| !v.is_empty() && seen.insert(v.clone()));
        variants
    }

    /// Resolve one normalized mention text.
    pub fn resolve(&self, text: &str) -> Resolution {
        if text.is_empty() {
            return Resolution::skipped();
        }

        let mut matched = CandidateIds::new();
        for variant in self.lookup_variants(text) {
            if let Some(ids) = self.index.lookup(&variant) {
                matched.extend(ids.iter().cloned());
            }
        }

        if matched.is_empty() {
            tracing::debug!(text, "No surface form found");
            return Resolution {
                outcome: ResolutionOutcome::NoSurfaceForm,
                candidates: matched,
                kept: 0,
                discarded: 0,
            };
        }

        let found = matched.len();
        let candidates: CandidateIds = matched
            .into_iter()
            .filter(|id| self.model.has_embedding(id))
            .collect();
        let kept = candidates.len();
        let discarded = found - kept;

        let outcome = if candidates.is_empty() {
            tracing::debug!(text, discarded, "No candidate has an embedding");
            ResolutionOutcome::NoEmbedding
        } else {
            tracing::trace!(text, kept, discarded, "Resolved candidates");
            ResolutionOutcome::Resolved
        };

        Resolution {
            outcome,
            candidates,
            kept,
            discarded,
        }
    }

    /// Resolve every mention, preserving order.
    pub fn resolve_all(&self, mentions: &[Mention]) -> Vec<Resolution> {
        mentions.iter().map(|m| self.resolve(&m.text)).collect()
    }
}
