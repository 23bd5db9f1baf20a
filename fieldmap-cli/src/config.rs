//! fieldmap configuration loading from `.fieldmaprc.toml`.
//!
//! Configuration is optional; built-in defaults reproduce the philosophy
//! network layout. Command-line flags override anything set here.
//!
//! # Example Configuration
//!
//! ```toml
//! [input]
//! nodes = "data/philosophy_nodes.csv"
//! edges = "data/philosophy_edges.csv"
//! authors = "data/philosophy_authors.csv"
//!
//! [output]
//! html = "philosophy_extended_network.html"
//! format = "table"
//! color = true
//!
//! [publish]
//! assets = "static"
//! directory = "docs"
//!
//! [style.colors]
//! field = "#1f77b4"
//!
//! [style.sizes]
//! work = 8
//! ```

use crate::constants::{
    CONFIG_FILE, DEFAULT_ASSETS_DIR, DEFAULT_AUTHORS_CSV, DEFAULT_EDGES_CSV, DEFAULT_NODES_CSV,
    DEFAULT_OUTPUT_HTML, DEFAULT_PUBLISH_DIR,
};
use fieldmap_core::style::CategoryOverrides;
use fieldmap_core::Palette;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from `.fieldmaprc.toml`.
///
/// All sections are optional and will use defaults if not specified.
#[derive(Debug, Deserialize, Default)]
pub struct FieldmapConfig {
    /// Input table locations.
    #[serde(default)]
    pub input: InputSettings,

    /// Output document and CLI formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,

    /// Static-hosting publish settings.
    #[serde(default)]
    pub publish: PublishSettings,

    /// Palette overrides.
    #[serde(default)]
    pub style: StyleSettings,
}

/// Paths to the three CSV tables.
#[derive(Debug, Deserialize, Default)]
pub struct InputSettings {
    #[serde(default)]
    pub nodes: Option<PathBuf>,
    #[serde(default)]
    pub edges: Option<PathBuf>,
    #[serde(default)]
    pub authors: Option<PathBuf>,
}

/// Output preferences.
///
/// `format` and `color` provide defaults for CLI rendering; `--format`
/// overrides them.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Where the HTML document is written.
    #[serde(default)]
    pub html: Option<PathBuf>,

    /// Default output format: `table` or `json`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output. Defaults to TTY detection.
    #[serde(default)]
    pub color: Option<bool>,
}

/// Publish directory settings for `fieldmap publish`.
#[derive(Debug, Deserialize, Default)]
pub struct PublishSettings {
    /// Static assets mirrored next to the document.
    #[serde(default)]
    pub assets: Option<PathBuf>,

    /// Directory served by the static host.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// Per-category palette overrides.
#[derive(Debug, Deserialize, Default)]
pub struct StyleSettings {
    #[serde(default)]
    pub colors: CategoryOverrides<String>,
    #[serde(default)]
    pub sizes: CategoryOverrides<u32>,
}

impl FieldmapConfig {
    /// Load configuration from `.fieldmaprc.toml` in the given directory.
    ///
    /// If the config file doesn't exist or can't be parsed, returns defaults.
    /// Parse errors are logged as warnings but don't cause failures.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    pub fn nodes_path(&self) -> PathBuf {
        self.input
            .nodes
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_NODES_CSV))
    }

    pub fn edges_path(&self) -> PathBuf {
        self.input
            .edges
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EDGES_CSV))
    }

    pub fn authors_path(&self) -> PathBuf {
        self.input
            .authors
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_AUTHORS_CSV))
    }

    pub fn html_path(&self) -> PathBuf {
        self.output
            .html
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_HTML))
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.publish
            .assets
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR))
    }

    pub fn publish_dir(&self) -> PathBuf {
        self.publish
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLISH_DIR))
    }

    /// Default palette with configured overrides applied.
    pub fn palette(&self) -> Palette {
        Palette::default().with_overrides(&self.style.colors, &self.style.sizes)
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Returns the configured color preference, or `None` for auto-detection.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_core::Category;

    #[test]
    fn test_default_config() {
        let config = FieldmapConfig::default();
        assert_eq!(config.nodes_path(), PathBuf::from(DEFAULT_NODES_CSV));
        assert_eq!(config.html_path(), PathBuf::from(DEFAULT_OUTPUT_HTML));
        assert_eq!(config.palette(), Palette::default());
        assert!(config.default_format().is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r##"
[input]
nodes = "data/n.csv"
edges = "data/e.csv"
authors = "data/a.csv"

[output]
html = "out/graph.html"
format = "json"
color = false

[publish]
assets = "site"
directory = "public"

[style.colors]
field = "#000000"

[style.sizes]
work = 6
fallback = 14
"##;
        let config: FieldmapConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.nodes_path(), PathBuf::from("data/n.csv"));
        assert_eq!(config.edges_path(), PathBuf::from("data/e.csv"));
        assert_eq!(config.authors_path(), PathBuf::from("data/a.csv"));
        assert_eq!(config.html_path(), PathBuf::from("out/graph.html"));
        assert_eq!(config.default_format(), Some("json"));
        assert_eq!(config.use_color(), Some(false));
        assert_eq!(config.assets_dir(), PathBuf::from("site"));
        assert_eq!(config.publish_dir(), PathBuf::from("public"));

        let palette = config.palette();
        assert_eq!(palette.color(Some(&Category::Field)), "#000000");
        assert_eq!(palette.color(Some(&Category::Author)), "#2ca02c");
        assert_eq!(palette.size(Some(&Category::Work)), 6);
        assert_eq!(palette.size(None), 14);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = FieldmapConfig::load(dir.path());
        assert_eq!(config.edges_path(), PathBuf::from(DEFAULT_EDGES_CSV));
    }

    #[test]
    fn test_load_invalid_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[input\nnodes = ").unwrap();
        let config = FieldmapConfig::load(dir.path());
        assert_eq!(config.nodes_path(), PathBuf::from(DEFAULT_NODES_CSV));
    }
}
