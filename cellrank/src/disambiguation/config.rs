//! Configuration for the disambiguation engine.

use serde::{Deserialize, Serialize};

/// Configuration for one disambiguation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisambiguationConfig {
    /// Text normalization settings
    pub text: TextConfig,
    /// Candidate lookup settings
    pub resolver: ResolverConfig,
    /// Graph construction settings
    pub graph: GraphConfig,
    /// PageRank settings
    pub ranker: RankerConfig,
}

/// Text normalization settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TextConfig {
    /// Drop digits from cell text before lookup
    pub strip_digits: bool,
}

/// Which lookup variants the resolver tries besides the exact text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResolverConfig {
    /// Also look up the text with its first letter upper-cased
    pub capitalized_variant: bool,
    /// Also look up every whitespace-separated token on its own
    pub token_variants: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            capitalized_variant: true,
            token_variants: true,
        }
    }
}

/// Graph construction settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GraphConfig {
    /// Unit over which one graph is built and ranked
    pub scope: GraphScope,
}

/// Unit over which one disambiguation graph is built.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GraphScope {
    /// One graph over every mention of the table
    #[default]
    Table,
    /// One graph per table row
    Row,
}

impl std::fmt::Display for GraphScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphScope::Table => write!(f, "table"),
            GraphScope::Row => write!(f, "row"),
        }
    }
}

impl std::str::FromStr for GraphScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(GraphScope::Table),
            "row" => Ok(GraphScope::Row),
            _ => Err(format!("Invalid graph scope: {}", s)),
        }
    }
}

/// PageRank settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RankerConfig {
    /// Probability of following an edge instead of jumping
    pub damping: f64,
    /// Per-node convergence tolerance
    pub tolerance: f64,
    /// Upper bound on power iterations
    pub max_iterations: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

impl RankerConfig {
    /// Validate the configuration, returning an error if invalid
    pub fn validate(&self) -> Result<(), String> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(format!(
                "damping must be between 0 and 1 (exclusive), got {}",
                self.damping
            ));
        }
        if !(self.tolerance > 0.0) || !self.tolerance.is_finite() {
            return Err(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            ));
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be greater than 0".to_string());
        }
        Ok(())
    }
}
