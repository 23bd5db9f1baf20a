//! Load -> style -> export, run once per invocation.
//!
//! Load and write failures abort the run. Publishing happens only after the
//! document is on disk, and a publishing failure is recorded on the report
//! instead of failing the run: the written document stays valid.

use crate::error::Result;
use crate::exporter::{self, MirrorStats};
use crate::loader::{self, InputPaths};
use crate::style::{style_graph, NetworkOptions, Palette};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// Name the document gets inside a publish directory.
pub const PUBLISH_INDEX: &str = "index.html";

/// Where to mirror static assets for hosting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    /// Static assets to mirror.
    pub assets: PathBuf,
    /// Publishing root; assets land in `<directory>/<assets dir name>`.
    pub directory: PathBuf,
}

impl PublishTarget {
    /// Destination of the mirrored assets.
    pub fn assets_dest(&self) -> PathBuf {
        match self.assets.file_name() {
            Some(name) => self.directory.join(name),
            None => self.directory.join("static"),
        }
    }
}

/// Everything a run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub inputs: InputPaths,
    pub output: PathBuf,
    pub palette: Palette,
    pub options: NetworkOptions,
    pub publish: Option<PublishTarget>,
}

impl PipelineConfig {
    pub fn new(inputs: InputPaths, output: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            output: output.into(),
            palette: Palette::default(),
            options: NetworkOptions::default(),
            publish: None,
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_publish(mut self, target: PublishTarget) -> Self {
        self.publish = Some(target);
        self
    }
}

/// Result of the publishing step.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublishOutcome {
    Published {
        directory: String,
        index: String,
        assets: MirrorStats,
    },
    Failed {
        directory: String,
        error: String,
    },
}

/// Summary of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub output_path: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub categories: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish: Option<PublishOutcome>,
}

/// Stage about to start, reported to progress observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loading,
    Styling,
    Saving,
    Publishing,
}

impl Stage {
    pub fn describe(&self) -> &'static str {
        match self {
            Stage::Loading => "Loading and building graph data",
            Stage::Styling => "Styling the network",
            Stage::Saving => "Saving final HTML",
            Stage::Publishing => "Mirroring static assets",
        }
    }
}

/// The three-stage build.
pub struct Pipeline;

impl Pipeline {
    /// Run all stages.
    pub fn run(config: &PipelineConfig) -> Result<BuildReport> {
        Self::run_with_progress(config, |_| {})
    }

    /// Run all stages, calling `on_stage` before each one starts.
    pub fn run_with_progress(
        config: &PipelineConfig,
        mut on_stage: impl FnMut(Stage),
    ) -> Result<BuildReport> {
        on_stage(Stage::Loading);
        info!("Loading graph data");
        let graph = loader::load_graph(&config.inputs)?;
        info!(
            "Loaded {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        on_stage(Stage::Styling);
        info!("Styling the network");
        let network = style_graph(&graph, &config.palette, &config.options);

        on_stage(Stage::Saving);
        info!("Saving HTML to {}", config.output.display());
        let html = exporter::generate_html(&network)?;
        exporter::write_document(&config.output, &html)?;

        let publish = config.publish.as_ref().map(|target| {
            on_stage(Stage::Publishing);
            Self::publish(target, &html)
        });

        Ok(BuildReport {
            output_path: config.output.display().to_string(),
            node_count: network.nodes.len(),
            edge_count: network.edges.len(),
            categories: graph.category_counts(),
            publish,
        })
    }

    /// Mirror assets and write the document into the publish directory.
    fn publish(target: &PublishTarget, html: &str) -> PublishOutcome {
        match Self::try_publish(target, html) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("Publishing failed: {}", err);
                PublishOutcome::Failed {
                    directory: target.directory.display().to_string(),
                    error: err.to_string(),
                }
            }
        }
    }

    fn try_publish(target: &PublishTarget, html: &str) -> Result<PublishOutcome> {
        info!(
            "Mirroring {} into {}",
            target.assets.display(),
            target.directory.display()
        );
        let assets = exporter::mirror_assets(&target.assets, &target.assets_dest())?;

        let index = target.directory.join(PUBLISH_INDEX);
        exporter::write_document(&index, html)?;

        Ok(PublishOutcome::Published {
            directory: target.directory.display().to_string(),
            index: index.display().to_string(),
            assets,
        })
    }
}
