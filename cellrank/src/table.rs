//! CSV table source.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::TableConfig;
use crate::{CellRankError, Result};

/// A grid of raw text cells. Rows may have different lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Read a CSV file.
    pub fn load(path: impl AsRef<Path>, config: &TableConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| CellRankError::Table(format!("{}: {}", path.display(), e)))?;
        let table = Self::from_reader(file, config)?;

        tracing::debug!(
            path = %path.display(),
            rows = table.rows.len(),
            "Loaded table"
        );

        Ok(table)
    }

    /// Read CSV data from any reader.
    pub fn from_reader<R: Read>(reader: R, config: &TableConfig) -> Result<Self> {
        let delimiter = u8::try_from(config.delimiter).map_err(|_| {
            CellRankError::Table(format!(
                "delimiter '{}' is not a single-byte character",
                config.delimiter
            ))
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(config.has_header)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| CellRankError::Table(e.to_string()))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_ragged_rows() {
        let csv = "Earth,King\nMars\n";
        let table = Table::from_reader(csv.as_bytes(), &TableConfig::default()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0], vec!["Earth", "King"]);
        assert_eq!(table.rows()[1], vec!["Mars"]);
    }

    #[test]
    fn test_header_row_is_skipped() {
        let config = TableConfig {
            has_header: true,
            ..TableConfig::default()
        };
        let table = Table::from_reader("planet,title\nEarth,King\n".as_bytes(), &config).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0][0], "Earth");
    }

    #[test]
    fn test_custom_delimiter() {
        let config = TableConfig {
            delimiter: ';',
            ..TableConfig::default()
        };
        let table = Table::from_reader("\"Paris, France\";King\n".as_bytes(), &config).unwrap();

        assert_eq!(table.rows()[0], vec!["Paris, France", "King"]);
    }

    #[test]
    fn test_multibyte_delimiter_rejected() {
        let config = TableConfig {
            delimiter: '→',
            ..TableConfig::default()
        };
        let err = Table::from_reader("a→b".as_bytes(), &config).unwrap_err();
        assert!(matches!(err, CellRankError::Table(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Table::load("/nonexistent/table.csv", &TableConfig::default()).unwrap_err();
        assert!(matches!(err, CellRankError::Table(_)));
    }
}
