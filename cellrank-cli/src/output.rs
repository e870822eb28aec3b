use cellrank::CellRankError;
use cellrank::disambiguation::{DisambiguationReport, DisambiguationSummary, ResolutionOutcome};
use colored::*;
use serde_json::json;

use crate::handlers::{CandidatesView, ModelView, SimilarityView};

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn entity() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }
}

/// Report an error once, as JSON on stdout or as a colored line on stderr.
pub fn output_error(error: &CellRankError, output_format: &str) {
    if output_format == "json" {
        let code = match error {
            CellRankError::Configuration(_) => "CONFIGURATION_ERROR",
            CellRankError::Logging(_) => "LOGGING_ERROR",
            CellRankError::Model(_) => "MODEL_ERROR",
            CellRankError::Index(_) => "INDEX_ERROR",
            CellRankError::Table(_) => "TABLE_ERROR",
            CellRankError::Io(_) => "IO_ERROR",
            CellRankError::Other(_) => "ERROR",
        };
        let error_response = json!({
            "error": true,
            "code": code,
            "message": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{}", format_error(&error.to_string()));
    }
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

pub fn format_outcome(outcome: ResolutionOutcome) -> ColoredString {
    match outcome {
        ResolutionOutcome::Resolved => "resolved".color(CliColors::success()),
        ResolutionOutcome::NoSurfaceForm => "no surface form".color(CliColors::warning()),
        ResolutionOutcome::NoEmbedding => "no embedding".color(CliColors::warning()),
        ResolutionOutcome::Skipped => "skipped".color(CliColors::muted()),
    }
}

pub fn print_report(report: &DisambiguationReport, show_candidates: bool) {
    println!(
        "{}",
        "━━━ Disambiguation ━━━".color(CliColors::accent()).bold()
    );

    for result in &report.results {
        let position = format!("[{},{}]", result.mention.position.row, result.mention.position.column);
        let selected = match (&result.selected, result.score) {
            (Some(id), Some(score)) => format!(
                "{} {}",
                id.color(CliColors::entity()).bold(),
                format!("({:.4})", score).color(CliColors::muted())
            ),
            (Some(id), None) => id.color(CliColors::entity()).bold().to_string(),
            (None, _) => format_outcome(result.outcome).to_string(),
        };

        println!(
            "{} {} {} {}",
            position.color(CliColors::muted()),
            result.mention.raw,
            "→".color(CliColors::muted()),
            selected
        );

        if show_candidates && !result.candidates.is_empty() {
            println!(
                "    {}: {}",
                "candidates".color(CliColors::muted()),
                result.candidates.join(", ")
            );
        }
    }

    println!();
    print_summary(&report.summary);
}

pub fn print_summary(summary: &DisambiguationSummary) {
    println!(
        "{}",
        format_success(&format!(
            "{} of {} mentions disambiguated",
            summary.disambiguated, summary.mentions
        ))
    );
    if summary.no_surface_form > 0 {
        println!(
            "{}",
            format_warning(&format!(
                "{} mentions had no surface form",
                summary.no_surface_form
            ))
        );
    }
    if summary.no_embedding > 0 {
        println!(
            "{}",
            format_warning(&format!(
                "{} mentions had no candidate with an embedding ({} candidates dropped)",
                summary.no_embedding, summary.candidates_discarded
            ))
        );
    }
    if summary.unconverged_rankings > 0 {
        println!(
            "{}",
            format_warning(&format!(
                "{} rankings stopped at the iteration limit",
                summary.unconverged_rankings
            ))
        );
    }
    println!(
        "{}",
        format_info(&format!(
            "{} graphs, {} nodes, {} edges, {} skipped cells",
            summary.graphs, summary.graph_nodes, summary.graph_edges, summary.skipped
        ))
    );
}

pub fn print_candidates(view: &CandidatesView) {
    println!(
        "{}",
        "━━━ Candidates ━━━".color(CliColors::accent()).bold()
    );
    println!("{}: {}", "Text".color(CliColors::muted()), view.text);
    println!(
        "{}: {}",
        "Normalized".color(CliColors::muted()),
        view.normalized
    );
    println!(
        "{}: {}",
        "Variants".color(CliColors::muted()),
        view.variants.join(" | ")
    );
    println!(
        "{}: {}",
        "Outcome".color(CliColors::muted()),
        format_outcome(view.outcome)
    );

    for id in &view.candidates {
        println!("  • {}", id.color(CliColors::entity()));
    }
    if view.discarded > 0 {
        println!(
            "{}",
            format_warning(&format!(
                "{} candidates dropped for lack of an embedding",
                view.discarded
            ))
        );
    }
}

pub fn print_similarity(view: &SimilarityView) {
    match view.similarity {
        Some(similarity) => println!(
            "{} ~ {}: {}",
            view.a.color(CliColors::entity()),
            view.b.color(CliColors::entity()),
            format!("{:.6}", similarity).bold()
        ),
        None => println!(
            "{}",
            format_warning(&format!(
                "No similarity for {} and {}: missing embedding",
                view.a, view.b
            ))
        ),
    }
}

pub fn print_metadata(view: &ModelView) {
    println!(
        "{}",
        "━━━ Embedding Model ━━━".color(CliColors::accent()).bold()
    );
    println!(
        "{}: {}",
        "File".color(CliColors::muted()),
        view.metadata.filename.as_deref().unwrap_or("-")
    );
    println!(
        "{}: {}",
        "Dimensions".color(CliColors::muted()),
        view.metadata.dimensions
    );
    println!(
        "{}: {}",
        "Vocabulary".color(CliColors::muted()),
        view.metadata.vocabulary_size
    );

    if let Some(vector) = &view.vector {
        match &vector.values {
            Some(values) => {
                let rendered: Vec<String> = values.iter().map(|v| format!("{:.6}", v)).collect();
                println!(
                    "{}: [{}]",
                    vector.id.color(CliColors::entity()).bold(),
                    rendered.join(", ")
                );
            }
            None => println!(
                "{}",
                format_warning(&format!("No vector for {}", vector.id))
            ),
        }
    }
}
