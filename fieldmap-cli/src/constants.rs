//! Shared constants for the fieldmap CLI.
//!
//! Default file names used when neither flags nor `.fieldmaprc.toml`
//! provide a path.

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = ".fieldmaprc.toml";

/// Entity table (`Label`, `Type`).
pub const DEFAULT_NODES_CSV: &str = "philosophy_nodes.csv";

/// Relationship table (`Source`, `Target`, `Relationship`).
pub const DEFAULT_EDGES_CSV: &str = "philosophy_edges.csv";

/// Authorship table (`Subfield`, `Author`, `Work`).
pub const DEFAULT_AUTHORS_CSV: &str = "philosophy_authors.csv";

pub const DEFAULT_OUTPUT_HTML: &str = "philosophy_extended_network.html";

/// Static assets mirrored by `fieldmap publish`.
pub const DEFAULT_ASSETS_DIR: &str = "static";

/// Publish directory; `docs/` is what GitHub Pages serves from a branch.
pub const DEFAULT_PUBLISH_DIR: &str = "docs";
