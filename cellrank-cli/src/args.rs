//! Command argument structures

use cellrank::config::LogLevel;
use cellrank::logging::parse_log_level;
use clap::Args;
use std::path::PathBuf;

/// Log level selected by the global flags, if any.
///
/// Quiet and machine modes force `error` so stdout stays clean. Otherwise an
/// explicit `--log-level` beats `--verbose`.
pub fn resolve_log_level(
    quiet: bool,
    machine: bool,
    verbose: bool,
    log_level: Option<&str>,
) -> cellrank::Result<Option<LogLevel>> {
    if quiet || machine {
        return Ok(Some(LogLevel::Error));
    }
    if let Some(level) = log_level {
        return Ok(Some(parse_log_level(level)?));
    }
    Ok(verbose.then_some(LogLevel::Debug))
}

#[derive(Args)]
pub struct LinkArgs {
    /// CSV file to disambiguate
    pub input: PathBuf,

    /// Graph scope (table, row)
    #[arg(long, short)]
    pub scope: Option<String>,

    /// Treat the first record as a header
    #[arg(long)]
    pub header: bool,

    /// Field delimiter
    #[arg(long, short)]
    pub delimiter: Option<char>,

    /// Drop digits from cell text before lookup
    #[arg(long)]
    pub strip_digits: bool,

    /// Also list the candidates considered for each cell
    #[arg(long)]
    pub show_candidates: bool,
}

#[derive(Args)]
pub struct CandidatesArgs {
    /// Cell text to resolve
    pub text: String,
}

#[derive(Args)]
pub struct SimilarityArgs {
    /// First entity id
    pub a: String,

    /// Second entity id
    pub b: String,
}

#[derive(Args)]
pub struct ModelArgs {
    /// Print the vector of this entity id as well
    #[arg(long)]
    pub vector: Option<String>,
}
