//! CSV loading and graph assembly.
//!
//! Reads the three input tables into typed rows, then translates rows into
//! nodes and edges. All tables are parsed before the graph is touched, so a
//! failure on any file yields no graph at all.
//!
//! | Table         | Columns                            |
//! |---------------|------------------------------------|
//! | entities      | `Label`, `Type`                    |
//! | relationships | `Source`, `Target`, `Relationship` |
//! | authorship    | `Subfield`, `Author`, `Work`       |

use crate::error::LoadError;
use crate::graph::KnowledgeGraph;
use crate::types::{work_tooltip, Category, RELATION_WROTE, RELATION_WROTE_ABOUT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Locations of the three input tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub nodes: PathBuf,
    pub edges: PathBuf,
    pub authors: PathBuf,
}

impl InputPaths {
    pub fn new(
        nodes: impl Into<PathBuf>,
        edges: impl Into<PathBuf>,
        authors: impl Into<PathBuf>,
    ) -> Self {
        Self {
            nodes: nodes.into(),
            edges: edges.into(),
            authors: authors.into(),
        }
    }
}

/// Row of the entity table.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityRow {
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
}

impl EntityRow {
    const COLUMNS: &'static [&'static str] = &["Label", "Type"];
}

/// Row of the relationship table.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipRow {
    #[serde(rename = "Source", default, deserialize_with = "cell")]
    pub source: String,
    #[serde(rename = "Target", default, deserialize_with = "cell")]
    pub target: String,
    #[serde(rename = "Relationship", default)]
    pub relationship: Option<String>,
}

impl RelationshipRow {
    const COLUMNS: &'static [&'static str] = &["Source", "Target", "Relationship"];
}

/// Row of the authorship table. `Subfield` may be empty.
///
/// Short rows leave the trailing cells empty instead of failing the load.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorshipRow {
    #[serde(rename = "Subfield", default)]
    pub subfield: Option<String>,
    #[serde(rename = "Author", default, deserialize_with = "cell")]
    pub author: String,
    #[serde(rename = "Work", default, deserialize_with = "cell")]
    pub work: String,
}

impl AuthorshipRow {
    const COLUMNS: &'static [&'static str] = &["Subfield", "Author", "Work"];
}

/// Parsed contents of all three tables.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub entities: Vec<EntityRow>,
    pub relationships: Vec<RelationshipRow>,
    pub authorship: Vec<AuthorshipRow>,
}

/// Read and parse every input table.
///
/// Files are read in the order entities, relationships, authorship; the
/// first failure is returned.
pub fn read_tables(paths: &InputPaths) -> Result<Tables, LoadError> {
    let entities = read_table::<EntityRow>(&paths.nodes, EntityRow::COLUMNS)?;
    let relationships = read_table::<RelationshipRow>(&paths.edges, RelationshipRow::COLUMNS)?;
    let authorship = read_table::<AuthorshipRow>(&paths.authors, AuthorshipRow::COLUMNS)?;

    Ok(Tables {
        entities,
        relationships,
        authorship,
    })
}

/// Read the tables and assemble the graph.
pub fn load_graph(paths: &InputPaths) -> Result<KnowledgeGraph, LoadError> {
    let tables = read_tables(paths)?;
    Ok(build_graph(&tables))
}

/// Translate parsed rows into a graph.
///
/// Nodes first (entities, then authors and works), then edges
/// (relationships, then authorship links).
pub fn build_graph(tables: &Tables) -> KnowledgeGraph {
    let mut graph = KnowledgeGraph::new();

    for row in &tables.entities {
        if row.label.is_empty() {
            warn!("Skipping entity row with empty Label");
            continue;
        }
        match present(row.kind.as_deref()) {
            Some(kind) => {
                let category = Category::from_name(kind);
                if !category.is_known() {
                    debug!("Entity '{}' has unrecognized Type '{}'", row.label, kind);
                }
                graph.upsert_node(&row.label, category, row.label.clone());
            }
            None => {
                warn!("Entity '{}' has no Type", row.label);
                graph.ensure_node(&row.label);
            }
        }
    }

    for row in &tables.authorship {
        if !row.author.is_empty() {
            graph.upsert_node(&row.author, Category::Author, row.author.clone());
        }
        if !row.work.is_empty() {
            graph.upsert_node(&row.work, Category::Work, work_tooltip(&row.work));
        }
    }

    for row in &tables.relationships {
        if row.source.is_empty() || row.target.is_empty() {
            warn!(
                "Skipping relationship row with empty endpoint ('{}' - '{}')",
                row.source, row.target
            );
            continue;
        }
        let relation = row.relationship.clone().unwrap_or_default();
        graph.connect(&row.source, &row.target, relation);
    }

    for row in &tables.authorship {
        if row.author.is_empty() {
            warn!("Skipping authorship row with empty Author (Work '{}')", row.work);
            continue;
        }
        if let Some(subfield) = present(row.subfield.as_deref()) {
            graph.connect(subfield, &row.author, RELATION_WROTE_ABOUT);
        }
        if row.work.is_empty() {
            warn!("Author '{}' has an authorship row with no Work", row.author);
            continue;
        }
        graph.connect(&row.author, &row.work, RELATION_WROTE);
    }

    debug!(
        "Built graph with {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}

/// Text cell that may be absent from a short row.
fn cell<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `None` for missing or blank cells.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn read_table<T: DeserializeOwned>(
    path: &Path,
    columns: &[&'static str],
) -> Result<Vec<T>, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = reader.headers().map_err(csv_err)?.clone();
    for &column in columns {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let rows = reader
        .deserialize::<T>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
