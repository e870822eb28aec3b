//! Command enum definitions

use crate::args::*;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Display version information
    Version,

    /// Disambiguate every cell of a CSV table
    #[command(alias = "disambiguate")]
    Link(LinkArgs),

    /// Show how one cell text resolves to candidates
    Candidates(CandidatesArgs),

    /// Similarity of two entities in the embedding model
    Similarity(SimilarityArgs),

    /// Show embedding model metadata
    Model(ModelArgs),
}
