//! Build command - Render the knowledge graph to an interactive HTML page
//!
//! Loads the three CSV tables, styles the graph and writes a self-contained
//! vis-network document.

use super::{category_rows, describe_failure, file_url, InputArgs};
use crate::config::FieldmapConfig;
use crate::output::{Output, OutputConfig, OutputFormat, TableDisplay, TableOutput};
use anyhow::Result;
use colored::Colorize;
use fieldmap_core::{BuildReport, Pipeline, PipelineConfig, Stage};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Result of a build
#[derive(Debug, Serialize)]
pub struct BuildSummary {
    pub output_path: String,
    pub url: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub categories: BTreeMap<String, usize>,
}

impl BuildSummary {
    pub fn from_report(report: &BuildReport) -> Self {
        Self {
            output_path: report.output_path.clone(),
            url: file_url(Path::new(&report.output_path)),
            node_count: report.node_count,
            edge_count: report.edge_count,
            categories: report.categories.clone(),
        }
    }
}

impl TableDisplay for BuildSummary {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut output = format!(
            "{} Generated {} with custom styles\n",
            "SUCCESS:".green().bold(),
            self.output_path.cyan()
        );

        output.push_str(&TableOutput::format_key_value(
            &[
                ("Nodes", self.node_count.to_string()),
                ("Edges", self.edge_count.to_string()),
            ],
            config,
        ));
        output.push('\n');
        output.push_str(&TableOutput::from_rows(
            &["Category", "Nodes"],
            &category_rows(&self.categories),
            config,
        ));
        output.push_str(&format!("\n\nOpen {} in your browser.", self.url.cyan()));
        output
    }
}

/// Print a numbered progress line to stderr.
pub(crate) fn progress_printer(enabled: bool) -> impl FnMut(Stage) {
    let mut step = 0;
    move |stage: Stage| {
        step += 1;
        if enabled {
            eprintln!("{} {}...", format!("{}.", step).dimmed(), stage.describe());
        }
    }
}

/// Run the build command
pub fn run(
    inputs: &InputArgs,
    output: Option<PathBuf>,
    config: &FieldmapConfig,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let pipeline = PipelineConfig::new(
        inputs.resolve(config),
        output.unwrap_or_else(|| config.html_path()),
    )
    .with_palette(config.palette());

    let report = Pipeline::run_with_progress(&pipeline, progress_printer(!quiet))
        .map_err(describe_failure)?;

    Output::new(BuildSummary::from_report(&report), format).render()
}
