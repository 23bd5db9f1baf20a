//! Publish command - Build and stage the network for static hosting
//!
//! Writes the document, mirrors the static assets directory into the publish
//! directory (replacing any previous copy) and prints the manual deployment
//! steps. A failed mirror is reported but leaves the written document intact.

use super::build::{progress_printer, BuildSummary};
use super::{describe_failure, InputArgs};
use crate::config::FieldmapConfig;
use crate::output::{Output, OutputConfig, OutputFormat, TableDisplay};
use anyhow::Result;
use colored::Colorize;
use fieldmap_core::{Pipeline, PipelineConfig, PublishOutcome, PublishTarget};
use serde::Serialize;
use std::path::PathBuf;

/// Result of a publish run
#[derive(Debug, Serialize)]
pub struct PublishSummary {
    #[serde(flatten)]
    pub build: BuildSummary,
    pub publish: PublishOutcome,
}

impl PublishSummary {
    fn deployment_steps(directory: &str) -> String {
        let mut lines = Vec::new();
        lines.push(format!("{}", "To deploy on GitHub Pages:".cyan().bold()));
        lines.push(format!("  1. git add {} && git commit -m \"Update network\"", directory));
        lines.push("  2. git push".to_string());
        lines.push(format!(
            "  3. Settings -> Pages -> Deploy from a branch, folder: /{}",
            directory.trim_start_matches("./").trim_end_matches('/')
        ));
        lines.join("\n")
    }
}

impl TableDisplay for PublishSummary {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut output = self.build.to_table(config);
        output.push_str("\n\n");

        match &self.publish {
            PublishOutcome::Published {
                directory,
                index,
                assets,
            } => {
                output.push_str(&format!(
                    "{} Mirrored {} asset files ({} bytes) and {} into {}\n\n",
                    "PUBLISHED:".green().bold(),
                    assets.files,
                    assets.bytes,
                    index,
                    directory.cyan()
                ));
                output.push_str(&Self::deployment_steps(directory));
            }
            PublishOutcome::Failed { directory, error } => {
                output.push_str(&format!(
                    "{} Could not publish into {}: {}\n{}",
                    "WARNING:".yellow().bold(),
                    directory,
                    error,
                    "The HTML document was still written.".dimmed()
                ));
            }
        }
        output
    }
}

/// Run the publish command
pub fn run(
    inputs: &InputArgs,
    output: Option<PathBuf>,
    assets: Option<PathBuf>,
    publish_dir: Option<PathBuf>,
    config: &FieldmapConfig,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let target = PublishTarget {
        assets: assets.unwrap_or_else(|| config.assets_dir()),
        directory: publish_dir.unwrap_or_else(|| config.publish_dir()),
    };

    let pipeline = PipelineConfig::new(
        inputs.resolve(config),
        output.unwrap_or_else(|| config.html_path()),
    )
    .with_palette(config.palette())
    .with_publish(target.clone());

    let report = Pipeline::run_with_progress(&pipeline, progress_printer(!quiet))
        .map_err(describe_failure)?;

    let publish = report.publish.clone().unwrap_or(PublishOutcome::Failed {
        directory: target.directory.display().to_string(),
        error: "publish step did not run".to_string(),
    });

    let summary = PublishSummary {
        build: BuildSummary::from_report(&report),
        publish,
    };

    Output::new(summary, format).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_core::exporter::MirrorStats;
    use std::collections::BTreeMap;

    fn build() -> BuildSummary {
        BuildSummary {
            output_path: "network.html".to_string(),
            url: "file:///tmp/network.html".to_string(),
            node_count: 1,
            edge_count: 0,
            categories: BTreeMap::new(),
        }
    }

    #[test]
    fn test_published_shows_instructions() {
        let summary = PublishSummary {
            build: build(),
            publish: PublishOutcome::Published {
                directory: "docs".to_string(),
                index: "docs/index.html".to_string(),
                assets: MirrorStats { files: 2, bytes: 10 },
            },
        };
        let config = OutputConfig::new(OutputFormat::Table).without_truncation();
        let table = summary.to_table(&config);
        assert!(table.contains("GitHub Pages"));
        assert!(table.contains("folder: /docs"));
    }

    #[test]
    fn test_failed_publish_is_warning() {
        let summary = PublishSummary {
            build: build(),
            publish: PublishOutcome::Failed {
                directory: "docs".to_string(),
                error: "Assets directory not found: static".to_string(),
            },
        };
        let config = OutputConfig::new(OutputFormat::Table).without_truncation();
        let table = summary.to_table(&config);
        assert!(table.contains("WARNING:"));
        assert!(table.contains("Assets directory not found"));

        let json: serde_json::Value =
            serde_json::from_str(&summary.render(&OutputConfig::new(OutputFormat::Json))).unwrap();
        assert_eq!(json["publish"]["status"], "failed");
        assert_eq!(json["node_count"], 1);
    }
}
