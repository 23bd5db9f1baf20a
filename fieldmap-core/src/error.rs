//! Error types for fieldmap-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors raised while reading the input tables.
///
/// Loading is all-or-nothing: any of these means no graph was produced.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Input file does not exist.
    #[error("Could not find file {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Input file exists but could not be read or parsed as CSV.
    #[error("Failed to read {}: {source}", path.display())]
    Csv {
        /// File being read.
        path: PathBuf,
        /// Underlying reader error.
        #[source]
        source: csv::Error,
    },

    /// A required column header is absent.
    #[error("{} is missing required column '{column}'", path.display())]
    MissingColumn {
        /// File being read.
        path: PathBuf,
        /// Name of the absent column.
        column: &'static str,
    },
}

impl LoadError {
    /// The input file this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::NotFound { path }
            | LoadError::Csv { path, .. }
            | LoadError::MissingColumn { path, .. } => path,
        }
    }
}

/// Errors raised while rendering or writing the output document.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Network options or elements could not be serialized.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Output document could not be written.
    #[error("Error saving file {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Static assets directory does not exist.
    #[error("Assets directory not found: {}", path.display())]
    AssetsMissing {
        /// Directory that was expected.
        path: PathBuf,
    },

    /// Copying assets into the publish directory failed.
    #[error("Failed to mirror {} into {}: {message}", source_dir.display(), dest_dir.display())]
    Mirror {
        source_dir: PathBuf,
        dest_dir: PathBuf,
        message: String,
    },
}

/// Umbrella error for a full pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
