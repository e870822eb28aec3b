//! Disambiguation engine.
//!
//! A run resolves every mention to candidate entities, joins the candidates
//! of different mentions into a similarity-weighted graph, ranks the graph
//! with PageRank and keeps the best-ranked candidate of each mention.

pub mod config;
pub mod graph;
pub mod pipeline;
pub mod ranker;
pub mod resolver;
pub mod selector;
pub mod types;

pub use config::{
    DisambiguationConfig, GraphConfig, GraphScope, RankerConfig, ResolverConfig, TextConfig,
};
pub use graph::{DisambiguationGraph, EntityNode, GraphBuilder};
pub use pipeline::Disambiguator;
pub use ranker::{RankScores, Ranker};
pub use resolver::CandidateResolver;
pub use selector::select;
pub use types::{
    DisambiguationReport, DisambiguationResult, DisambiguationSummary, Resolution,
    ResolutionOutcome,
};
