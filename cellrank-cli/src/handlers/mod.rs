//! Command handlers for the Cellrank CLI

pub mod inspect;
pub mod link;

pub use inspect::{
    CandidatesView, ModelView, SimilarityView, handle_candidates_command, handle_model_command,
    handle_similarity_command,
};
pub use link::{apply_link_overrides, handle_link_command};
