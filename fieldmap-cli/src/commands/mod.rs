//! Command implementations for the fieldmap CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod build;
pub mod publish;
pub mod stats;

use crate::config::FieldmapConfig;
use clap::Args;
use fieldmap_core::{InputPaths, PipelineError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Input table flags shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Entity table (Label, Type)
    #[arg(long, value_name = "CSV")]
    pub nodes: Option<PathBuf>,

    /// Relationship table (Source, Target, Relationship)
    #[arg(long, value_name = "CSV")]
    pub edges: Option<PathBuf>,

    /// Authorship table (Subfield, Author, Work)
    #[arg(long, value_name = "CSV")]
    pub authors: Option<PathBuf>,
}

impl InputArgs {
    /// Resolve paths: flag > config file > built-in default.
    pub fn resolve(&self, config: &FieldmapConfig) -> InputPaths {
        InputPaths::new(
            self.nodes.clone().unwrap_or_else(|| config.nodes_path()),
            self.edges.clone().unwrap_or_else(|| config.edges_path()),
            self.authors.clone().unwrap_or_else(|| config.authors_path()),
        )
    }
}

/// Attach a user-facing hint to pipeline failures.
pub(crate) fn describe_failure(err: PipelineError) -> anyhow::Error {
    match err {
        PipelineError::Load(_) => anyhow::Error::new(err)
            .context("Could not load input tables. Make sure all CSV files exist and are readable."),
        PipelineError::Export(_) => {
            anyhow::Error::new(err).context("Could not write the network document")
        }
    }
}

/// `file://` URL for a written document.
pub(crate) fn file_url(path: &Path) -> String {
    let absolute = path
        .canonicalize()
        .unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}

/// Category rows sorted with the four known categories first.
pub(crate) fn category_rows(categories: &BTreeMap<String, usize>) -> Vec<Vec<String>> {
    const ORDER: [&str; 4] = ["Field", "Subfield", "Author", "Work"];
    let mut rows: Vec<Vec<String>> = ORDER
        .iter()
        .filter_map(|name| {
            categories
                .get(*name)
                .map(|count| vec![name.to_string(), count.to_string()])
        })
        .collect();
    rows.extend(
        categories
            .iter()
            .filter(|(name, _)| !ORDER.contains(&name.as_str()))
            .map(|(name, count)| vec![name.clone(), count.to_string()]),
    );
    rows
}
