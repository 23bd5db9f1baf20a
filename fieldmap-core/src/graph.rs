//! In-memory knowledge graph backed by petgraph.
//!
//! Holds an undirected simple graph where:
//! - Nodes are keyed by display label (e.g., "Ethics", "Kant")
//! - Edges carry an optional relation label (e.g., "wrote", "wrote about")
//!
//! Edge endpoints are get-or-created, so an edge may introduce a bare node
//! that never appeared in the entity table. At most one edge exists per
//! unordered pair; re-connecting a pair overwrites its relation label.

use crate::types::{Category, EdgeData, NodeData};
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use std::collections::{BTreeMap, HashMap};

/// Labeled undirected graph of fields, subfields, authors and works.
#[derive(Debug, Default, Clone)]
pub struct KnowledgeGraph {
    graph: UnGraph<NodeData, EdgeData>,
    node_map: HashMap<String, NodeIndex>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the index for `label`, creating a bare node if it does not exist.
    pub fn ensure_node(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(NodeData::bare(label));
        self.node_map.insert(label.to_string(), idx);
        idx
    }

    /// Insert a node or overwrite the attributes of an existing one.
    pub fn upsert_node(
        &mut self,
        label: &str,
        category: Category,
        tooltip: impl Into<String>,
    ) -> NodeIndex {
        let idx = self.ensure_node(label);
        let node = &mut self.graph[idx];
        node.category = Some(category);
        node.tooltip = Some(tooltip.into());
        idx
    }

    /// Connect two labels, creating either endpoint if needed.
    ///
    /// Returns the edge index. An existing edge between the pair (in either
    /// direction) is reused and its relation overwritten.
    pub fn connect(&mut self, a: &str, b: &str, relation: impl Into<String>) -> EdgeIndex {
        let ia = self.ensure_node(a);
        let ib = self.ensure_node(b);
        let relation = relation.into();
        if let Some(existing) = self.graph.find_edge(ia, ib) {
            if let Some(old) = self.graph[existing].relation.as_deref() {
                if old != relation {
                    tracing::debug!(
                        "Edge {} - {} relabeled '{}' -> '{}'",
                        a,
                        b,
                        old,
                        relation
                    );
                }
            }
        }
        self.graph.update_edge(ia, ib, EdgeData::new(relation))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.node_map.contains_key(label)
    }

    /// Look up a node by label.
    pub fn node(&self, label: &str) -> Option<&NodeData> {
        self.node_map.get(label).map(|&idx| &self.graph[idx])
    }

    /// Relation label of the edge between `a` and `b`, in either direction.
    pub fn relation(&self, a: &str, b: &str) -> Option<&str> {
        let ia = *self.node_map.get(a)?;
        let ib = *self.node_map.get(b)?;
        let edge = self.graph.find_edge(ia, ib)?;
        self.graph[edge].relation.as_deref()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edges in insertion order as `(endpoint, endpoint, data)`.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeData, &NodeData, &EdgeData)> + '_ {
        self.graph.edge_indices().filter_map(move |e| {
            let (a, b) = self.graph.edge_endpoints(e)?;
            Some((&self.graph[a], &self.graph[b], &self.graph[e]))
        })
    }

    /// Number of nodes per category name. Bare nodes count under "(none)".
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for node in self.nodes() {
            let key = node
                .category
                .as_ref()
                .map(|c| c.as_str().to_string())
                .unwrap_or_else(|| "(none)".to_string());
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_is_idempotent() {
        let mut g = KnowledgeGraph::new();
        g.upsert_node("Kant", Category::Subfield, "Kant");
        g.upsert_node("Kant", Category::Author, "Immanuel Kant");

        assert_eq!(g.node_count(), 1);
        let node = g.node("Kant").unwrap();
        assert_eq!(node.category, Some(Category::Author));
        assert_eq!(node.tooltip.as_deref(), Some("Immanuel Kant"));
    }

    #[test]
    fn test_connect_creates_bare_endpoints() {
        let mut g = KnowledgeGraph::new();
        g.connect("Logic", "Modal Logic", "includes");

        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(g.node("Logic").unwrap().is_bare());
        assert_eq!(g.relation("Modal Logic", "Logic"), Some("includes"));
    }

    #[test]
    fn test_duplicate_edge_last_write_wins() {
        let mut g = KnowledgeGraph::new();
        g.connect("Ethics", "Kant", "influenced");
        g.connect("Kant", "Ethics", "wrote about");

        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.relation("Ethics", "Kant"), Some("wrote about"));
    }

    #[test]
    fn test_upsert_after_bare_keeps_index() {
        let mut g = KnowledgeGraph::new();
        let bare = g.ensure_node("Ethics");
        let upserted = g.upsert_node("Ethics", Category::Subfield, "Ethics");
        assert_eq!(bare, upserted);
        assert!(!g.node("Ethics").unwrap().is_bare());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut g = KnowledgeGraph::new();
        g.upsert_node("B", Category::Field, "B");
        g.upsert_node("A", Category::Field, "A");
        g.connect("C", "A", "x");

        let labels: Vec<&str> = g.nodes().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_category_counts() {
        let mut g = KnowledgeGraph::new();
        g.upsert_node("Philosophy", Category::Field, "Philosophy");
        g.upsert_node("Ethics", Category::Subfield, "Ethics");
        g.upsert_node("Logic", Category::Subfield, "Logic");
        g.connect("Ethics", "Stoicism", "includes");

        let counts = g.category_counts();
        assert_eq!(counts.get("Field"), Some(&1));
        assert_eq!(counts.get("Subfield"), Some(&2));
        assert_eq!(counts.get("(none)"), Some(&1));
    }
}
