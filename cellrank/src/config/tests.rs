use crate::config::{
    CellRankConfig, ConfigBuilder, ConfigLoader, LogFormat, LogLevel, validation,
};
use crate::disambiguation::GraphScope;
use std::io::Write;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = CellRankConfig::default();
    assert!(config.data.surface_forms.is_none());
    assert!(config.data.embeddings.is_none());
    assert_eq!(config.disambiguation.graph.scope, GraphScope::Table);
    assert_eq!(config.disambiguation.ranker.max_iterations, 100);
    assert_eq!(config.table.delimiter, ',');
    assert!(!config.table.has_header);
    assert_eq!(config.logging.level, LogLevel::Info);
    assert!(validation::validate_config(&config).is_ok());
}

#[test]
fn test_config_builder() {
    let config = ConfigBuilder::new()
        .with_surface_forms("/tmp/forms.json")
        .with_embeddings("/tmp/model.txt")
        .with_scope(GraphScope::Row)
        .with_damping(0.9)
        .with_delimiter(';')
        .with_header(true)
        .with_log_level(LogLevel::Debug)
        .build()
        .unwrap();

    assert_eq!(
        config.data.surface_forms,
        Some(PathBuf::from("/tmp/forms.json"))
    );
    assert_eq!(config.data.embeddings, Some(PathBuf::from("/tmp/model.txt")));
    assert_eq!(config.disambiguation.graph.scope, GraphScope::Row);
    assert_eq!(config.disambiguation.ranker.damping, 0.9);
    assert_eq!(config.table.delimiter, ';');
    assert!(config.table.has_header);
    assert_eq!(config.logging.level, LogLevel::Debug);
}

#[test]
fn test_validation_rejects_bad_values() {
    assert!(ConfigBuilder::new().with_damping(1.5).build().is_err());
    assert!(ConfigBuilder::new().with_tolerance(-1.0).build().is_err());
    assert!(ConfigBuilder::new().with_max_iterations(0).build().is_err());
    assert!(ConfigBuilder::new().with_delimiter('§').build().is_err());
    assert!(ConfigBuilder::new().with_delimiter('"').build().is_err());
    assert!(ConfigBuilder::new().with_delimiter('\t').build().is_ok());
}

#[test]
fn test_predefined_configs() {
    let dev = ConfigBuilder::development().build().unwrap();
    let test = ConfigBuilder::testing().build().unwrap();

    assert_eq!(dev.logging.level, LogLevel::Debug);
    assert_eq!(dev.logging.format, LogFormat::Pretty);

    assert_eq!(test.logging.level, LogLevel::Warn);
    assert_eq!(test.disambiguation.ranker.max_iterations, 50);
}

#[test]
fn test_load_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[data]
surface_forms = "forms.tsv"

[disambiguation.graph]
scope = "row"

[disambiguation.ranker]
damping = 0.7

[table]
delimiter = "\t"
has_header = true
"#
    )
    .unwrap();

    let config = ConfigLoader::load(Some(file.path())).unwrap();
    assert_eq!(config.data.surface_forms, Some(PathBuf::from("forms.tsv")));
    assert_eq!(config.disambiguation.graph.scope, GraphScope::Row);
    assert_eq!(config.disambiguation.ranker.damping, 0.7);
    // Unset keys keep their defaults.
    assert_eq!(config.disambiguation.ranker.max_iterations, 100);
    assert!(config.disambiguation.resolver.token_variants);
    assert_eq!(config.table.delimiter, '\t');
    assert!(config.table.has_header);
}

#[test]
fn test_load_json_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"disambiguation": {{"text": {{"strip_digits": true}}}}, "logging": {{"level": "debug", "format": "json"}}}}"#
    )
    .unwrap();

    let mut loader = ConfigLoader::new();
    let config = loader.load_file(file.path()).unwrap().extract().unwrap();
    assert!(config.disambiguation.text.strip_digits);
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_invalid_file_values_fail_validation() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "disambiguation:\n  ranker:\n    damping: 2.0").unwrap();

    let mut loader = ConfigLoader::new();
    assert!(loader.load_file(file.path()).unwrap().extract().is_err());
}

#[test]
fn test_missing_and_unsupported_files() {
    let mut loader = ConfigLoader::new();
    assert!(loader.load_file("/nonexistent/cellrank.toml").is_err());

    let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
    assert!(loader.load_file(file.path()).is_err());
    // The loader is still usable after a rejected file.
    assert!(loader.extract().is_ok());
}

#[test]
fn test_merge_custom_provider() {
    let mut loader = ConfigLoader::new();
    loader.merge(figment::providers::Serialized::default(
        "disambiguation.ranker.max_iterations",
        7,
    ));
    let config = loader.extract().unwrap();
    assert_eq!(config.disambiguation.ranker.max_iterations, 7);
}

#[test]
fn test_config_serialization() {
    let config = ConfigBuilder::new()
        .with_embeddings("/tmp/model.txt")
        .with_scope(GraphScope::Row)
        .build()
        .unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let deserialized: CellRankConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, deserialized);
}

#[test]
fn test_log_level_parsing() {
    assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
    assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
    assert!("loud".parse::<LogLevel>().is_err());
    assert_eq!(LogLevel::Trace.to_string(), "trace");
}
