//! Text normalization and mention extraction.
//!
//! A cell becomes a lookup key by lowercasing it and keeping only its
//! alphanumeric tokens, joined by single spaces. Digits can optionally be
//! dropped as well.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::table::Table;

lazy_static! {
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^\p{L}\p{N}]+").unwrap();
    static ref NON_ALPHABETIC: Regex = Regex::new(r"[^\p{L}]+").unwrap();
}

/// Converts raw cell text into normalized lookup keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    strip_digits: bool,
}

impl Normalizer {
    pub fn new(strip_digits: bool) -> Self {
        Self { strip_digits }
    }

    /// Normalize one cell: lowercase, alphanumeric tokens only.
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();
        let separators: &Regex = if self.strip_digits {
            &*NON_ALPHABETIC
        } else {
            &*NON_ALPHANUMERIC
        };

        separators
            .split(&lowered)
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Extract the mentions of a table in row/column order.
    ///
    /// Cells that normalize to nothing are not mentions; their count is
    /// returned alongside.
    pub fn mentions(&self, table: &Table) -> (Vec<Mention>, usize) {
        let mut mentions = Vec::new();
        let mut skipped = 0;

        for (row, cells) in table.rows().iter().enumerate() {
            for (column, raw) in cells.iter().enumerate() {
                let text = self.normalize(raw);
                if text.is_empty() {
                    skipped += 1;
                    continue;
                }
                mentions.push(Mention {
                    position: CellPosition { row, column },
                    raw: raw.clone(),
                    text,
                });
            }
        }

        (mentions, skipped)
    }
}

/// Upper-case the first character of `text`.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Row and column of a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: usize,
    pub column: usize,
}

/// Normalized text of one table cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Where the cell sits in the table
    pub position: CellPosition,
    /// Cell text as read
    pub raw: String,
    /// Normalized lookup key
    pub text: String,
}

impl Mention {
    /// Build a mention by normalizing `raw` with the default normalizer.
    pub fn new(row: usize, column: usize, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let text = Normalizer::default().normalize(&raw);
        Self {
            position: CellPosition { row, column },
            raw,
            text,
        }
    }
}
