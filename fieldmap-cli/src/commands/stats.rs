//! Stats command - Summarize the graph without exporting
//!
//! Runs only the loader, which makes it a quick check that the CSV tables
//! are present and well-formed.

use super::{category_rows, describe_failure, InputArgs};
use crate::config::FieldmapConfig;
use crate::output::{Output, OutputConfig, OutputFormat, TableDisplay, TableOutput};
use anyhow::Result;
use colored::Colorize;
use fieldmap_core::{load_graph, KnowledgeGraph, PipelineError};
use serde::Serialize;
use std::collections::BTreeMap;

/// Statistics about the knowledge graph.
#[derive(Debug, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Nodes that only appear as relationship endpoints.
    pub bare_nodes: Vec<String>,
    pub categories: BTreeMap<String, usize>,
}

impl GraphStats {
    pub fn from_graph(graph: &KnowledgeGraph) -> Self {
        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            bare_nodes: graph
                .nodes()
                .filter(|n| n.is_bare())
                .map(|n| n.label.clone())
                .collect(),
            categories: graph.category_counts(),
        }
    }
}

impl TableDisplay for GraphStats {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut lines = Vec::new();
        lines.push(format!("{}", "Knowledge Graph".green().bold()));
        lines.push(TableOutput::format_key_value(
            &[
                ("Nodes", self.node_count.to_string()),
                ("Edges", self.edge_count.to_string()),
            ],
            config,
        ));
        lines.push(TableOutput::from_rows(
            &["Category", "Nodes"],
            &category_rows(&self.categories),
            config,
        ));

        if !self.bare_nodes.is_empty() {
            lines.push(format!(
                "{} {} labels appear only as relationship endpoints: {}",
                "NOTE:".yellow().bold(),
                self.bare_nodes.len(),
                self.bare_nodes.join(", ")
            ));
        }
        lines.join("\n")
    }
}

/// Run the stats command
pub fn run(inputs: &InputArgs, config: &FieldmapConfig, format: OutputFormat) -> Result<()> {
    let graph = load_graph(&inputs.resolve(config))
        .map_err(|e| describe_failure(PipelineError::Load(e)))?;

    Output::new(GraphStats::from_graph(&graph), format).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_core::Category;

    #[test]
    fn test_stats_from_graph() {
        let mut graph = KnowledgeGraph::new();
        graph.upsert_node("Ethics", Category::Subfield, "Ethics");
        graph.connect("Ethics", "Stoicism", "includes");

        let stats = GraphStats::from_graph(&graph);
        assert_eq!(stats.node_count, 2);
        assert_eq!(stats.edge_count, 1);
        assert_eq!(stats.bare_nodes, vec!["Stoicism".to_string()]);

        let config = OutputConfig::new(OutputFormat::Table).without_truncation();
        assert!(stats.to_table(&config).contains("Stoicism"));
    }
}
