//! Integration tests for the Cellrank CLI handlers
//!
//! Each test writes a small knowledge base into a temporary directory and
//! drives the handlers the binary uses.

use cellrank::config::{CellRankConfig, ConfigBuilder};
use cellrank::disambiguation::{GraphScope, ResolutionOutcome};
use cellrank::CellRankError;
use cellrank::config::LogLevel;
use cellrank_cli::args::{LinkArgs, resolve_log_level};
use cellrank_cli::context::{CellRankCliContext, load_model};
use cellrank_cli::handlers::{apply_link_overrides, inspect, link};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const FORMS: &str = r#"{"earth": ["Q2"], "king": ["Q12097", "Q19643"], "ghost": ["Q404"]}"#;
const MODEL: &str = "3 2\nQ2 1.0 0.0\nQ12097 0.9 0.1\nQ19643 0.1 0.9\n";

fn knowledge_base() -> (TempDir, CellRankConfig) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let forms = temp_dir.path().join("forms.json");
    let model = temp_dir.path().join("entities.txt");
    fs::write(&forms, FORMS).unwrap();
    fs::write(&model, MODEL).unwrap();

    let config = ConfigBuilder::testing()
        .with_surface_forms(&forms)
        .with_embeddings(&model)
        .build()
        .expect("Failed to build config");

    (temp_dir, config)
}

fn link_args(input: PathBuf) -> LinkArgs {
    LinkArgs {
        input,
        scope: None,
        header: false,
        delimiter: None,
        strip_digits: false,
        show_candidates: false,
    }
}

#[tokio::test]
async fn test_link_table() {
    let (temp_dir, config) = knowledge_base();
    let input = temp_dir.path().join("table.csv");
    fs::write(&input, "Earth,King\nGhost,Atlantis\n").unwrap();

    let ctx = CellRankCliContext::new(config).await.unwrap();
    let report = link::run_link(&ctx, &link_args(input)).unwrap();

    assert_eq!(report.results.len(), 4);
    assert_eq!(report.results[0].selected.as_deref(), Some("Q2"));
    assert_eq!(report.results[1].selected.as_deref(), Some("Q12097"));
    assert_eq!(report.results[2].outcome, ResolutionOutcome::NoEmbedding);
    assert_eq!(report.results[3].outcome, ResolutionOutcome::NoSurfaceForm);
    assert_eq!(report.summary.disambiguated, 2);
}

#[tokio::test]
async fn test_link_overrides() {
    let (temp_dir, config) = knowledge_base();
    let input = temp_dir.path().join("table.tsv");
    fs::write(&input, "first\tsecond\nEarth\tKing\n").unwrap();

    let mut args = link_args(input);
    args.scope = Some("row".to_string());
    args.header = true;
    args.delimiter = Some('\t');

    let config = apply_link_overrides(config, &args).unwrap();
    assert_eq!(config.disambiguation.graph.scope, GraphScope::Row);
    assert!(config.table.has_header);

    let ctx = CellRankCliContext::new(config).await.unwrap();
    let report = link::run_link(&ctx, &args).unwrap();
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].mention.position.row, 0);
    assert_eq!(report.results[0].selected.as_deref(), Some("Q2"));
}

#[test]
fn test_invalid_scope_is_rejected() {
    let (_temp_dir, config) = knowledge_base();
    let mut args = link_args(PathBuf::from("table.csv"));
    args.scope = Some("column".to_string());

    assert!(apply_link_overrides(config, &args).is_err());
}

#[tokio::test]
async fn test_missing_table_file() {
    let (temp_dir, config) = knowledge_base();
    let ctx = CellRankCliContext::new(config).await.unwrap();

    let result = link::run_link(&ctx, &link_args(temp_dir.path().join("missing.csv")));
    assert!(matches!(result, Err(cellrank::CellRankError::Table(_))));
}

#[tokio::test]
async fn test_context_requires_index() {
    let (_temp_dir, mut config) = knowledge_base();
    config.data.surface_forms = None;

    let result = CellRankCliContext::new(config).await;
    assert!(matches!(
        result,
        Err(cellrank::CellRankError::Configuration(_))
    ));
}

#[tokio::test]
async fn test_context_rejects_invalid_damping() {
    let (_temp_dir, mut config) = knowledge_base();
    config.disambiguation.ranker.damping = 1.5;

    let result = CellRankCliContext::new(config).await;
    assert!(matches!(result, Err(CellRankError::Configuration(_))));
}

#[tokio::test]
async fn test_candidates_view() {
    let (_temp_dir, config) = knowledge_base();
    let ctx = CellRankCliContext::new(config).await.unwrap();

    let view = inspect::resolve_text(&ctx, "  KING!");
    assert_eq!(view.normalized, "king");
    assert_eq!(view.variants, vec!["king", "King"]);
    assert_eq!(view.outcome, ResolutionOutcome::Resolved);
    assert_eq!(view.candidates, vec!["Q12097", "Q19643"]);

    let view = inspect::resolve_text(&ctx, "Ghost");
    assert_eq!(view.outcome, ResolutionOutcome::NoEmbedding);
    assert_eq!(view.discarded, 1);

    let view = inspect::resolve_text(&ctx, "???");
    assert_eq!(view.outcome, ResolutionOutcome::Skipped);
    assert!(view.variants.is_empty());
}

#[tokio::test]
async fn test_similarity_and_model_views() {
    let (_temp_dir, config) = knowledge_base();
    let model = load_model(&config).await.unwrap();

    let view = inspect::similarity(&model, "Q2", "Q2");
    assert!((view.similarity.unwrap() - 1.0).abs() < 1e-6);
    assert!(inspect::similarity(&model, "Q2", "Q404").similarity.is_none());

    let view = inspect::model_view(&model, Some("Q12097"));
    assert_eq!(view.metadata.filename.as_deref(), Some("entities.txt"));
    assert_eq!(view.metadata.dimensions, 2);
    assert_eq!(view.metadata.vocabulary_size, 3);
    assert_eq!(view.vector.unwrap().values, Some(vec![0.9, 0.1]));

    let json = serde_json::to_value(inspect::model_view(&model, None)).unwrap();
    assert_eq!(json["vocabulary_size"], 3);
    assert!(json.get("vector").is_none());
}

#[test]
fn test_log_level_flags() {
    assert_eq!(resolve_log_level(false, false, false, None).unwrap(), None);
    assert_eq!(
        resolve_log_level(false, false, true, None).unwrap(),
        Some(LogLevel::Debug)
    );
    assert_eq!(
        resolve_log_level(false, false, true, Some("warn")).unwrap(),
        Some(LogLevel::Warn)
    );
    assert_eq!(
        resolve_log_level(true, false, false, Some("trace")).unwrap(),
        Some(LogLevel::Error)
    );
    assert_eq!(
        resolve_log_level(false, true, false, None).unwrap(),
        Some(LogLevel::Error)
    );

    let err = resolve_log_level(false, false, false, Some("loud")).unwrap_err();
    assert!(matches!(err, CellRankError::Logging(_)));
}
