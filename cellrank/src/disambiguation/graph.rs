//! Disambiguation graph: a weighted complete multipartite graph over the
//! candidate sets of the mentions.
//!
//! Every entity id becomes one node, however many mentions offer it. Two
//! nodes are joined when they come from different mentions and are never
//! alternatives of the same mention; the edge weight is the raw similarity
//! reported by the embedding model. Weights are stored untouched so they can
//! be inspected; the ranker normalizes them.
//!
//! Building costs one similarity call per cross-mention pair, that is
//! `Σ_{i<j} |set_i|·|set_j|`, quadratic in the total number of candidates.
//! Large tables should use row scope to keep graphs small.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::knowledge::{CandidateIds, EmbeddingModel};

/// Node payload: an entity and the mentions that offered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNode {
    pub id: String,
    /// Indices (into the candidate-set list) of the offering mentions
    pub mentions: BTreeSet<usize>,
}

/// Undirected weighted candidate graph.
#[derive(Debug, Clone, Default)]
pub struct DisambiguationGraph {
    graph: UnGraph<EntityNode, f32>,
    nodes: HashMap<String, NodeIndex>,
    missing_similarities: usize,
}

impl DisambiguationGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Raw similarity stored on the edge between `a` and `b`
    pub fn weight(&self, a: &str, b: &str) -> Option<f32> {
        let a = *self.nodes.get(a)?;
        let b = *self.nodes.get(b)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Mention indices that offered `id`
    pub fn mentions_of(&self, id: &str) -> Option<&BTreeSet<usize>> {
        self.nodes.get(id).map(|&idx| &self.graph[idx].mentions)
    }

    /// Neighbours of `id` with edge weights, sorted by id
    pub fn neighbors(&self, id: &str) -> Vec<(&str, f32)> {
        let Some(&idx) = self.nodes.get(id) else {
            return Vec::new();
        };

        let mut neighbors: Vec<(&str, f32)> = self
            .graph
            .edges(idx)
            .map(|edge| {
                let other = if edge.source() == idx {
                    edge.target()
                } else {
                    edge.source()
                };
                (self.graph[other].id.as_str(), *edge.weight())
            })
            .collect();
        neighbors.sort_by(|a, b| a.0.cmp(b.0));
        neighbors
    }

    /// Entity ids in node insertion order
    pub fn entity_ids(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|node| node.id.as_str())
    }

    /// Cross-mention pairs left unconnected because the model had no score
    pub fn missing_similarities(&self) -> usize {
        self.missing_similarities
    }

    /// Underlying petgraph graph
    pub fn as_petgraph(&self) -> &UnGraph<EntityNode, f32> {
        &self.graph
    }

    fn node_for(&mut self, id: &str, mention: usize) -> NodeIndex {
        let idx = match self.nodes.get(id) {
            Some(&idx) => idx,
            None => {
                let idx = self.graph.add_node(EntityNode {
                    id: id.to_string(),
                    mentions: BTreeSet::new(),
                });
                self.nodes.insert(id.to_string(), idx);
                idx
            }
        };
        self.graph[idx].mentions.insert(mention);
        idx
    }

    /// Whether two nodes are alternatives for at least one common mention
    fn share_mention(&self, a: NodeIndex, b: NodeIndex) -> bool {
        !self.graph[a].mentions.is_disjoint(&self.graph[b].mentions)
    }
}

/// Builds [`DisambiguationGraph`]s from per-mention candidate sets.
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder<'a> {
    model: &'a dyn EmbeddingModel,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(model: &'a dyn EmbeddingModel) -> Self {
        Self { model }
    }

    /// Build the graph for `candidate_sets`, one set per mention in order.
    pub fn build(&self, candidate_sets: &[CandidateIds]) -> DisambiguationGraph {
        let mut graph = DisambiguationGraph::default();
        if candidate_sets.is_empty() {
            return graph;
        }

        let mut indices: Vec<Vec<NodeIndex>> = Vec::with_capacity(candidate_sets.len());
        for (mention, candidates) in candidate_sets.iter().enumerate() {
            indices.push(
                candidates
                    .iter()
                    .map(|id| graph.node_for(id, mention))
                    .collect(),
            );
        }

        for i in 0..indices.len() {
            for j in (i + 1)..indices.len() {
                for &u in &indices[i] {
                    for &v in &indices[j] {
                        self.connect(&mut graph, u, v);
                    }
                }
            }
        }

        tracing::debug!(
            mentions = candidate_sets.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            missing_similarities = graph.missing_similarities,
            "Built disambiguation graph"
        );

        graph
    }

    fn connect(&self, graph: &mut DisambiguationGraph, u: NodeIndex, v: NodeIndex) {
        if u == v || graph.share_mention(u, v) || graph.graph.find_edge(u, v).is_some() {
            return;
        }

        let a = &graph.graph[u].id;
        let b = &graph.graph[v].id;
        match self.model.similarity(a, b) {
            Some(weight) if weight.is_finite() => {
                graph.graph.add_edge(u, v, weight);
            }
            _ => {
                tracing::trace!(a = %a, b = %b, "No similarity for entity pair");
                graph.missing_similarities += 1;
            }
        }
    }
}
