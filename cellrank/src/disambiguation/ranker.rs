//! Weighted PageRank over a [`DisambiguationGraph`].
//!
//! Transition probabilities come from the raw edge similarities, normalized
//! per node so that each node's outgoing weights sum to one. Negative
//! similarities carry no transition mass. A node without positive outgoing
//! weight is dangling and hands its mass back through the random-jump
//! distribution, which keeps the total at one and ranks isolated nodes by the
//! jump term alone.

use std::collections::BTreeMap;

use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::{CellRankError, Result};

use super::config::RankerConfig;
use super::graph::DisambiguationGraph;

/// PageRank output for one graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankScores {
    scores: BTreeMap<String, f64>,
    /// Power iterations performed
    pub iterations: usize,
    /// Whether the change fell below tolerance before the iteration bound
    pub converged: bool,
}

impl RankScores {
    pub fn get(&self, id: &str) -> Option<f64> {
        self.scores.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Sum of all scores (1 for any non-empty graph)
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    /// Scores in entity-id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(id, score)| (id.as_str(), *score))
    }
}

/// PageRank ranker.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: RankerConfig,
    personalization: Option<BTreeMap<String, f64>>,
}

impl Ranker {
    /// Create a ranker, rejecting parameters under which PageRank does not
    /// produce a probability distribution.
    pub fn new(config: RankerConfig) -> Result<Self> {
        config.validate().map_err(CellRankError::Configuration)?;
        Ok(Self {
            config,
            personalization: None,
        })
    }

    /// Bias the random jump towards some entities.
    ///
    /// Entities missing from the map get no jump mass. Negative values count
    /// as zero; if nothing positive remains the jump stays uniform.
    pub fn with_personalization(mut self, personalization: BTreeMap<String, f64>) -> Self {
        self.personalization = Some(personalization);
        self
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Rank every node of `graph`.
    pub fn rank(&self, graph: &DisambiguationGraph) -> RankScores {
        let g = graph.as_petgraph();
        let n = g.node_count();
        if n == 0 {
            return RankScores {
                converged: true,
                ..RankScores::default()
            };
        }

        // Row-normalized transitions over positive weights only.
        let mut transitions: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        for node in g.node_indices() {
            let out: Vec<(usize, f64)> = g
                .edges(node)
                .filter(|edge| *edge.weight() > 0.0)
                .map(|edge| {
                    let other = if edge.source() == node {
                        edge.target()
                    } else {
                        edge.source()
                    };
                    (other.index(), f64::from(*edge.weight()))
                })
                .collect();
            let total: f64 = out.iter().map(|(_, w)| w).sum();
            if total > 0.0 {
                transitions[node.index()] = out.into_iter().map(|(v, w)| (v, w / total)).collect();
            }
        }

        let jump = self.jump_distribution(graph);
        let damping = self.config.damping;
        let mut scores = jump.clone();
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.config.max_iterations {
            iterations += 1;

            let dangling: f64 = transitions
                .iter()
                .zip(&scores)
                .filter(|(out, _)| out.is_empty())
                .map(|(_, score)| score)
                .sum();

            let mut next: Vec<f64> = jump
                .iter()
                .map(|p| (damping * dangling + (1.0 - damping)) * p)
                .collect();
            for (u, out) in transitions.iter().enumerate() {
                for &(v, w) in out {
                    next[v] += damping * scores[u] * w;
                }
            }

            let change: f64 = next
                .iter()
                .zip(&scores)
                .map(|(a, b)| (a - b).abs())
                .sum();
            scores = next;

            if change < n as f64 * self.config.tolerance {
                converged = true;
                break;
            }
        }

        if !converged {
            tracing::warn!(
                nodes = n,
                iterations,
                "PageRank did not converge, using last iterate"
            );
        }

        let total: f64 = scores.iter().sum();
        let scores = g
            .node_indices()
            .map(|idx| (g[idx].id.clone(), scores[idx.index()] / total))
            .collect();

        RankScores {
            scores,
            iterations,
            converged,
        }
    }

    fn jump_distribution(&self, graph: &DisambiguationGraph) -> Vec<f64> {
        let n = graph.node_count();
        let uniform = vec![1.0 / n as f64; n];

        let Some(personalization) = &self.personalization else {
            return uniform;
        };

        let weights: Vec<f64> = graph
            .entity_ids()
            .map(|id| personalization.get(id).copied().unwrap_or(0.0).max(0.0))
            .collect();
        let total: f64 = weights.iter().sum();
        if !(total > 0.0) || !total.is_finite() {
            tracing::warn!("Personalization has no positive mass on this graph, using uniform jump");
            return uniform;
        }

        weights.into_iter().map(|w| w / total).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disambiguation::GraphBuilder;
    use crate::knowledge::{CandidateIds, KeyedVectors};

    fn set(ids: &[&str]) -> CandidateIds {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn model() -> KeyedVectors {
        let mut model = KeyedVectors::new(2);
        model.insert("Q2", vec![1.0, 0.0]).unwrap();
        model.insert("Q12097", vec![0.9, 0.1]).unwrap();
        model.insert("Q19643", vec![0.1, 0.9]).unwrap();
        model.insert("Q3", vec![0.0, 1.0]).unwrap();
        model.insert("Q4", vec![-1.0, 0.0]).unwrap();
        model
    }

    fn assert_sums_to_one(scores: &RankScores) {
        assert!((scores.total() - 1.0).abs() < 1e-6, "total = {}", scores.total());
    }

    #[test]
    fn test_empty_graph() {
        let model = model();
        let graph = GraphBuilder::new(&model).build(&[]);
        let scores = Ranker::default().rank(&graph);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_isolated_nodes_get_uniform_jump_score() {
        let model = model();
        let graph = GraphBuilder::new(&model).build(&[set(&["Q2", "Q3", "Q12097"])]);
        let scores = Ranker::default().rank(&graph);

        assert!(scores.converged);
        assert_sums_to_one(&scores);
        for (_, score) in scores.iter() {
            assert!((score - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_stronger_similarity_ranks_higher() {
        let model = model();
        let graph = GraphBuilder::new(&model).build(&[
            set(&["Q2"]),
            set(&["Q12097", "Q19643"]),
        ]);
        let scores = Ranker::default().rank(&graph);

        assert!(scores.converged);
        assert_sums_to_one(&scores);
        assert!(scores.get("Q12097").unwrap() > scores.get("Q19643").unwrap());
    }

    #[test]
    fn test_negative_weights_carry_no_mass() {
        let model = model();
        // Q2-Q4 is the only edge and its similarity is -1.
        let graph = GraphBuilder::new(&model).build(&[set(&["Q2"]), set(&["Q4"])]);
        assert_eq!(graph.edge_count(), 1);

        let scores = Ranker::default().rank(&graph);
        assert_sums_to_one(&scores);
        assert!((scores.get("Q2").unwrap() - 0.5).abs() < 1e-9);
        assert!(scores.get("Q4").unwrap() > 0.0);
    }

    #[test]
    fn test_scores_sum_to_one_on_larger_graph() {
        let model = model();
        let graph = GraphBuilder::new(&model).build(&[
            set(&["Q2", "Q4"]),
            set(&["Q12097", "Q19643"]),
            set(&["Q3"]),
        ]);
        let scores = Ranker::default().rank(&graph);

        assert_eq!(scores.len(), 5);
        assert_sums_to_one(&scores);
        assert!(scores.iter().all(|(_, s)| s >= 0.0));
    }

    #[test]
    fn test_iteration_bound_terminates() {
        let model = model();
        let graph = GraphBuilder::new(&model).build(&[
            set(&["Q2"]),
            set(&["Q12097", "Q19643"]),
        ]);
        let ranker = Ranker::new(RankerConfig {
            max_iterations: 1,
            tolerance: 1e-15,
            ..RankerConfig::default()
        })
        .unwrap();
        let scores = ranker.rank(&graph);

        assert_eq!(scores.iterations, 1);
        assert!(!scores.converged);
        assert_sums_to_one(&scores);
    }

    #[test]
    fn test_personalization_biases_jump() {
        let model = model();
        let graph = GraphBuilder::new(&model).build(&[set(&["Q2", "Q3"])]);

        let mut bias = BTreeMap::new();
        bias.insert("Q3".to_string(), 1.0);
        let scores = Ranker::default().with_personalization(bias).rank(&graph);

        assert_sums_to_one(&scores);
        assert!(scores.get("Q3").unwrap() > 0.99);
    }

    #[test]
    fn test_personalization_without_mass_falls_back_to_uniform() {
        let model = model();
        let graph = GraphBuilder::new(&model).build(&[set(&["Q2", "Q3"])]);

        let mut bias = BTreeMap::new();
        bias.insert("Q404".to_string(), 1.0);
        let scores = Ranker::default().with_personalization(bias).rank(&graph);

        assert!((scores.get("Q2").unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let model = model();
        let sets = [set(&["Q2", "Q4"]), set(&["Q12097", "Q19643"]), set(&["Q3"])];
        let first = Ranker::default().rank(&GraphBuilder::new(&model).build(&sets));
        let second = Ranker::default().rank(&GraphBuilder::new(&model).build(&sets));
        assert_eq!(first, second);
    }

    #[test]
    fn test_damping_outside_unit_interval_is_rejected() {
        for damping in [1.0, 1.5, 0.0, -0.2, f64::NAN] {
            let err = Ranker::new(RankerConfig {
                damping,
                ..RankerConfig::default()
            })
            .unwrap_err();
            assert!(matches!(err, CellRankError::Configuration(_)));
        }
    }

    #[test]
    fn test_invalid_tolerance_is_rejected() {
        for tolerance in [0.0, -1e-6, f64::NAN, f64::INFINITY] {
            let result = Ranker::new(RankerConfig {
                tolerance,
                ..RankerConfig::default()
            });
            assert!(result.is_err());
        }
    }
}
