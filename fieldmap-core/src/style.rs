//! Style mapping from graph categories to renderer attributes.
//!
//! Produces a [`StyledNetwork`]: one styled node per graph node, one styled
//! edge per graph edge, plus fixed physics, font and canvas options. The
//! category tables live in an immutable [`Palette`] handed in by the caller.

use crate::graph::KnowledgeGraph;
use crate::types::Category;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Per-category values with a fallback for bare and unrecognized nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable<T> {
    pub field: T,
    pub subfield: T,
    pub author: T,
    pub work: T,
    pub fallback: T,
}

impl<T> CategoryTable<T> {
    /// Value for a category; `None` and `Other` use the fallback.
    pub fn get(&self, category: Option<&Category>) -> &T {
        match category {
            Some(Category::Field) => &self.field,
            Some(Category::Subfield) => &self.subfield,
            Some(Category::Author) => &self.author,
            Some(Category::Work) => &self.work,
            Some(Category::Other(_)) | None => &self.fallback,
        }
    }
}

impl<T: Clone> CategoryTable<T> {
    /// Replace entries that are set in `overrides`.
    pub fn apply(&mut self, overrides: &CategoryOverrides<T>) {
        let pairs = [
            (&mut self.field, &overrides.field),
            (&mut self.subfield, &overrides.subfield),
            (&mut self.author, &overrides.author),
            (&mut self.work, &overrides.work),
            (&mut self.fallback, &overrides.fallback),
        ];
        for (slot, value) in pairs {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }
    }
}

/// Optional per-category replacements, as read from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CategoryOverrides<T> {
    pub field: Option<T>,
    pub subfield: Option<T>,
    pub author: Option<T>,
    pub work: Option<T>,
    pub fallback: Option<T>,
}

/// Category -> color and category -> size tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub colors: CategoryTable<String>,
    pub sizes: CategoryTable<u32>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: CategoryTable {
                field: "#1f77b4".to_string(),    // blue
                subfield: "#ff7f0e".to_string(), // orange
                author: "#2ca02c".to_string(),   // green
                work: "#d62728".to_string(),     // red
                fallback: "#cccccc".to_string(),
            },
            sizes: CategoryTable {
                field: 35,
                subfield: 20,
                author: 12,
                work: 8,
                fallback: 10,
            },
        }
    }
}

impl Palette {
    pub fn with_overrides(
        mut self,
        colors: &CategoryOverrides<String>,
        sizes: &CategoryOverrides<u32>,
    ) -> Self {
        self.colors.apply(colors);
        self.sizes.apply(sizes);
        self
    }

    pub fn color(&self, category: Option<&Category>) -> &str {
        self.colors.get(category)
    }

    pub fn size(&self, category: Option<&Category>) -> u32 {
        *self.sizes.get(category)
    }
}

/// Barnes-Hut force parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarnesHut {
    pub gravitational_constant: f64,
    pub central_gravity: f64,
    pub spring_length: f64,
    pub spring_constant: f64,
    pub damping: f64,
    pub avoid_overlap: f64,
}

impl Default for BarnesHut {
    fn default() -> Self {
        Self {
            gravitational_constant: -25000.0,
            central_gravity: 0.4,
            spring_length: 130.0,
            spring_constant: 0.05,
            damping: 0.9,
            avoid_overlap: 0.0,
        }
    }
}

/// Label font applied to every node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelFont {
    pub face: String,
    pub size: u32,
    pub mono: bool,
    pub color: String,
}

impl Default for LabelFont {
    fn default() -> Self {
        Self {
            face: "IBM Plex Mono".to_string(),
            size: 16,
            mono: true,
            color: "white".to_string(),
        }
    }
}

/// Container dimensions and background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pub height: String,
    pub width: String,
    pub background: String,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            height: "100vh".to_string(),
            width: "100%".to_string(),
            background: "#0a0a0a".to_string(),
        }
    }
}

/// Global presentation options. Constant; not derived from the graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NetworkOptions {
    pub physics: BarnesHut,
    pub font: LabelFont,
    pub canvas: Canvas,
}

impl NetworkOptions {
    /// Options object in the shape vis-network's `Network` constructor expects.
    pub fn to_vis_options(&self) -> serde_json::Value {
        json!({
            "nodes": {
                "shape": "dot",
                "font": self.font,
            },
            "edges": {
                "color": { "inherit": true },
                "smooth": { "enabled": true, "type": "dynamic" },
            },
            "interaction": {
                "hover": true,
                "tooltipDelay": 100,
            },
            "physics": {
                "enabled": true,
                "solver": "barnesHut",
                "barnesHut": self.physics,
                "stabilization": { "enabled": true, "iterations": 1000 },
            },
        })
    }
}

/// Renderer-ready node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledNode {
    pub id: String,
    pub label: String,
    pub title: String,
    pub color: String,
    pub size: u32,
}

/// Renderer-ready edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledEdge {
    pub from: String,
    pub to: String,
    pub title: String,
}

/// Styled graph plus global options, ready for export.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledNetwork {
    pub options: NetworkOptions,
    pub nodes: Vec<StyledNode>,
    pub edges: Vec<StyledEdge>,
}

/// Compute presentation attributes for every node and edge.
pub fn style_graph(
    graph: &KnowledgeGraph,
    palette: &Palette,
    options: &NetworkOptions,
) -> StyledNetwork {
    let nodes = graph
        .nodes()
        .map(|node| {
            let category = node.category.as_ref();
            StyledNode {
                id: node.label.clone(),
                label: node.label.clone(),
                title: node.tooltip.clone().unwrap_or_else(|| node.label.clone()),
                color: palette.color(category).to_string(),
                size: palette.size(category),
            }
        })
        .collect();

    let edges = graph
        .edges()
        .map(|(a, b, data)| StyledEdge {
            from: a.label.clone(),
            to: b.label.clone(),
            title: data.relation.clone().unwrap_or_default(),
        })
        .collect();

    StyledNetwork {
        options: options.clone(),
        nodes,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> KnowledgeGraph {
        let mut g = KnowledgeGraph::new();
        g.upsert_node("Philosophy", Category::Field, "Philosophy");
        g.upsert_node("Ethics", Category::Subfield, "Ethics");
        g.upsert_node("Kant", Category::Author, "Kant");
        g.upsert_node("Groundwork", Category::Work, "\"Groundwork\"");
        g.connect("Philosophy", "Ethics", "contains");
        g.connect("Ethics", "Kant", "wrote about");
        g.connect("Kant", "Groundwork", "wrote");
        g.connect("Ethics", "Virtue", "includes");
        g
    }

    fn find<'a>(net: &'a StyledNetwork, id: &str) -> &'a StyledNode {
        net.nodes.iter().find(|n| n.id == id).unwrap()
    }

    #[test]
    fn test_one_styled_entity_per_graph_entity() {
        let g = sample_graph();
        let net = style_graph(&g, &Palette::default(), &NetworkOptions::default());
        assert_eq!(net.nodes.len(), g.node_count());
        assert_eq!(net.edges.len(), g.edge_count());
    }

    #[test]
    fn test_category_colors_and_sizes() {
        let net = style_graph(
            &sample_graph(),
            &Palette::default(),
            &NetworkOptions::default(),
        );

        let field = find(&net, "Philosophy");
        assert_eq!(field.color, "#1f77b4");
        assert_eq!(field.size, 35);

        let work = find(&net, "Groundwork");
        assert_eq!(work.color, "#d62728");
        assert_eq!(work.size, 8);
        assert_eq!(work.title, "\"Groundwork\"");
        assert_eq!(work.label, "Groundwork");
    }

    #[test]
    fn test_bare_node_gets_fallback() {
        let net = style_graph(
            &sample_graph(),
            &Palette::default(),
            &NetworkOptions::default(),
        );
        let bare = find(&net, "Virtue");
        assert_eq!(bare.color, "#cccccc");
        assert_eq!(bare.size, 10);
        assert_eq!(bare.title, "Virtue");
    }

    #[test]
    fn test_unrecognized_category_gets_fallback() {
        let mut g = KnowledgeGraph::new();
        g.upsert_node("Stoa", Category::Other("School".to_string()), "Stoa");
        let net = style_graph(&g, &Palette::default(), &NetworkOptions::default());
        assert_eq!(net.nodes[0].color, "#cccccc");
        assert_eq!(net.nodes[0].size, 10);
    }

    #[test]
    fn test_edge_titles() {
        let net = style_graph(
            &sample_graph(),
            &Palette::default(),
            &NetworkOptions::default(),
        );
        let edge = net
            .edges
            .iter()
            .find(|e| e.from == "Kant" && e.to == "Groundwork")
            .unwrap();
        assert_eq!(edge.title, "wrote");
    }

    #[test]
    fn test_styling_is_deterministic() {
        let g = sample_graph();
        let palette = Palette::default();
        let options = NetworkOptions::default();
        assert_eq!(
            style_graph(&g, &palette, &options),
            style_graph(&g, &palette, &options)
        );
    }

    #[test]
    fn test_palette_overrides() {
        let colors = CategoryOverrides {
            field: Some("#000000".to_string()),
            ..Default::default()
        };
        let sizes = CategoryOverrides {
            fallback: Some(4),
            ..Default::default()
        };
        let palette = Palette::default().with_overrides(&colors, &sizes);

        assert_eq!(palette.color(Some(&Category::Field)), "#000000");
        assert_eq!(palette.color(Some(&Category::Work)), "#d62728");
        assert_eq!(palette.size(None), 4);
    }

    #[test]
    fn test_vis_options_shape() {
        let value = NetworkOptions::default().to_vis_options();
        assert_eq!(value["nodes"]["font"]["face"], "IBM Plex Mono");
        assert_eq!(value["nodes"]["font"]["mono"], true);
        assert_eq!(
            value["physics"]["barnesHut"]["gravitationalConstant"],
            -25000.0
        );
        assert_eq!(value["physics"]["barnesHut"]["springLength"], 130.0);
    }
}
