//! fieldmap core - knowledge-domain graph assembly and HTML export.
//!
//! Turns three CSV tables (entities, relationships, authorship) into an
//! interactive network document rendered by vis-network in the browser.
//!
//! # Pipeline
//!
//! ```text
//! CSV tables -> loader -> KnowledgeGraph -> style -> StyledNetwork -> exporter -> HTML
//! ```
//!
//! Each stage runs to completion before the next one starts. The
//! [`pipeline::Pipeline`] wires them together; the individual modules are
//! public so callers can run a single stage (e.g. `fieldmap stats` only loads).

pub mod error;
pub mod exporter;
pub mod graph;
pub mod loader;
pub mod pipeline;
pub mod style;
pub mod types;

pub use error::{ExportError, LoadError, PipelineError};
pub use graph::KnowledgeGraph;
pub use loader::{load_graph, InputPaths};
pub use pipeline::{BuildReport, Pipeline, PipelineConfig, PublishOutcome, PublishTarget, Stage};
pub use style::{style_graph, NetworkOptions, Palette, StyledNetwork};
pub use types::Category;
