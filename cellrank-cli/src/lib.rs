pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;

pub use context::CellRankCliContext;
pub use output::{
    CliColors, format_error, format_info, format_outcome, format_success, format_warning,
    output_error, print_candidates, print_metadata, print_report, print_similarity, print_summary,
};
