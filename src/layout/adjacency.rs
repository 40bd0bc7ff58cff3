//! Undirected adjacency and edge-label lookup
//!
//! Neighbor sets keep insertion order (edge order), which is what makes BFS
//! discovery order and therefore the whole layout reproducible.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

use crate::document::Edge;

/// Adjacency information for layout
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    /// Every known node, in document order, with its neighbors in edge order
    neighbors: IndexMap<String, IndexSet<String>>,

    /// Labels of the edges joining a pair, reachable from either endpoint
    labels: HashMap<String, HashMap<String, Vec<String>>>,

    /// Edges ignored because an endpoint is not a known node
    dropped_edges: usize,
}

impl Adjacency {
    /// Build adjacency from the edge list, restricted to `node_ids`
    pub fn build(edges: &[Edge], node_ids: &IndexSet<String>) -> Self {
        let mut neighbors: IndexMap<String, IndexSet<String>> = node_ids
            .iter()
            .map(|id| (id.clone(), IndexSet::new()))
            .collect();
        let mut labels: HashMap<String, HashMap<String, Vec<String>>> = HashMap::new();
        let mut dropped_edges = 0;

        for edge in edges {
            if !node_ids.contains(&edge.source) || !node_ids.contains(&edge.target) {
                tracing::debug!(source = %edge.source, target = %edge.target, "dropping edge with unknown endpoint");
                dropped_edges += 1;
                continue;
            }

            let (a, b) = (&edge.source, &edge.target);
            if let Some(set) = neighbors.get_mut(a) {
                set.insert(b.clone());
            }
            if let Some(set) = neighbors.get_mut(b) {
                set.insert(a.clone());
            }

            if let Some(label) = &edge.label {
                labels
                    .entry(a.clone())
                    .or_default()
                    .entry(b.clone())
                    .or_default()
                    .push(label.clone());
                if a != b {
                    labels
                        .entry(b.clone())
                        .or_default()
                        .entry(a.clone())
                        .or_default()
                        .push(label.clone());
                }
            }
        }

        Self {
            neighbors,
            labels,
            dropped_edges,
        }
    }

    /// Whether `id` is a known node
    pub fn contains(&self, id: &str) -> bool {
        self.neighbors.contains_key(id)
    }

    /// Number of known nodes
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Known node identifiers in document order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.neighbors.keys().map(String::as_str)
    }

    /// Neighbors of `id` in first-seen edge order; empty for unknown ids
    pub fn neighbors(&self, id: &str) -> impl Iterator<Item = &str> {
        self.neighbors
            .get(id)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Labels of all edges joining `a` and `b`, in either direction
    pub fn labels(&self, a: &str, b: &str) -> &[String] {
        self.labels
            .get(a)
            .and_then(|inner| inner.get(b))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of edges that referenced an unknown node
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }
}
