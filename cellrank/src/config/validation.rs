//! Configuration validation.

use super::ConfigError;
use super::models::*;
use crate::disambiguation::DisambiguationConfig;

/// Validate the entire configuration.
pub fn validate_config(config: &CellRankConfig) -> Result<(), ConfigError> {
    validate_disambiguation_config(&config.disambiguation)?;
    validate_table_config(&config.table)?;

    Ok(())
}

fn validate_disambiguation_config(config: &DisambiguationConfig) -> Result<(), ConfigError> {
    config
        .ranker
        .validate()
        .map_err(|e| ConfigError::ValidationError(format!("ranker: {}", e)))
}

fn validate_table_config(config: &TableConfig) -> Result<(), ConfigError> {
    if !config.delimiter.is_ascii() {
        return Err(ConfigError::ValidationError(format!(
            "table delimiter must be an ASCII character, got {:?}",
            config.delimiter
        )));
    }
    if matches!(config.delimiter, '"' | '\n' | '\r') {
        return Err(ConfigError::ValidationError(format!(
            "table delimiter cannot be {:?}",
            config.delimiter
        )));
    }

    Ok(())
}
