//! HTML export for styled networks.
//!
//! The document loads vis-network from a CDN and hands it the nodes, edges
//! and options as JSON; layout and interaction happen in the browser.
//! Supplementary CSS is spliced in textually before `</head>`.

use crate::error::ExportError;
use crate::style::StyledNetwork;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Marker the style fragment is inserted in front of.
pub const HEAD_CLOSE: &str = "</head>";

/// Fullscreen layout and tooltip look injected into every document.
pub const STYLE_FRAGMENT: &str = r#"<style type="text/css">

  /* Fullscreen */
  html, body {
    margin: 0 !important;
    padding: 0 !important;
    width: 100%;
    height: 100%;
    overflow: hidden;
  }

  /* Card container reset */
  .card, .card-body {
    padding: 0 !important;
    margin: 0 !important;
    border: none !important;
    width: 100%;
    height: 100%;
  }

  /* Empty heading wrapper adds whitespace at the top */
  h1, center {
    margin: 0 !important;
    padding: 0 !important;
  }

  @import url('https://fonts.googleapis.com/css2?family=IBM+Plex+Mono&display=swap');

  .vis-tooltip {
    font-family: "IBM Plex Mono", monospace;
    font-size: 14px;
    background-color: #f0f0f0;
    color: #333;
    border: 1px solid #ccc;
    padding: 8px;
    border-radius: 4px;
    box-shadow: 0 2px 5px rgba(0,0,0,0.2);
  }
</style>"#;

const VIS_NETWORK_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/vis-network/9.1.2/dist/vis-network.min.js";
const VIS_NETWORK_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/vis-network/9.1.2/dist/dist/vis-network.min.css";

const DOCUMENT_TEMPLATE: &str = r#"<html>
    <head>
        <meta charset="utf-8">
        <script src="{vis_js}"></script>
        <link rel="stylesheet" href="{vis_css}" />
        <style type="text/css">
            #mynetwork {
                width: {width};
                height: {height};
                background-color: {background};
                position: relative;
                float: left;
            }
        </style>
    </head>
    <body>
        <center>
            <h1></h1>
        </center>
        <div class="card" style="width: 100%">
            <div id="mynetwork" class="card-body"></div>
        </div>
        <script type="text/javascript">
            var nodes = new vis.DataSet({nodes});
            var edges = new vis.DataSet({edges});
            var container = document.getElementById("mynetwork");
            var options = {options};
            var network = new vis.Network(container, { nodes: nodes, edges: edges }, options);
        </script>
    </body>
</html>
"#;

/// Render the interactive document without the supplementary styles.
pub fn render_document(network: &StyledNetwork) -> Result<String, ExportError> {
    let nodes = script_json(&network.nodes)?;
    let edges = script_json(&network.edges)?;
    let options = script_json(&network.options.to_vis_options())?;
    let canvas = &network.options.canvas;

    // Data placeholders last so JSON content is never rescanned
    Ok(DOCUMENT_TEMPLATE
        .replace("{vis_js}", VIS_NETWORK_JS)
        .replace("{vis_css}", VIS_NETWORK_CSS)
        .replace("{width}", &canvas.width)
        .replace("{height}", &canvas.height)
        .replace("{background}", &canvas.background)
        .replacen("{options}", &options, 1)
        .replacen("{edges}", &edges, 1)
        .replacen("{nodes}", &nodes, 1))
}

/// Serialize for embedding inside a `<script>` element.
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Insert `fragment` immediately before the first `</head>`.
///
/// Returns `None` when the document has no `</head>` marker.
pub fn splice_before_head_close(document: &str, fragment: &str) -> Option<String> {
    let at = document.find(HEAD_CLOSE)?;
    let mut out = String::with_capacity(document.len() + fragment.len() + 1);
    out.push_str(&document[..at]);
    out.push_str(fragment);
    out.push('\n');
    out.push_str(&document[at..]);
    Some(out)
}

/// Splice `fragment` into the head, leaving the document unchanged if the
/// marker is missing.
pub fn inject_styles(document: &str, fragment: &str) -> String {
    match splice_before_head_close(document, fragment) {
        Some(spliced) => spliced,
        None => {
            warn!("Document has no {} marker; styles not injected", HEAD_CLOSE);
            document.to_string()
        }
    }
}

/// Render, inject [`STYLE_FRAGMENT`], and return the final document.
pub fn generate_html(network: &StyledNetwork) -> Result<String, ExportError> {
    let document = render_document(network)?;
    Ok(inject_styles(&document, STYLE_FRAGMENT))
}

/// Write the document as UTF-8.
pub fn write_document(path: &Path, html: &str) -> Result<(), ExportError> {
    fs::write(path, html).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} bytes to {}", html.len(), path.display());
    Ok(())
}

/// Outcome of an asset mirror.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct MirrorStats {
    pub files: usize,
    pub bytes: u64,
}

/// Replace `dest` with a fresh copy of `source`.
///
/// Any existing `dest` is removed first, so files deleted from `source`
/// never linger in the mirror.
pub fn mirror_assets(source: &Path, dest: &Path) -> Result<MirrorStats, ExportError> {
    if !source.is_dir() {
        return Err(ExportError::AssetsMissing {
            path: source.to_path_buf(),
        });
    }

    let mirror_err = |message: String| ExportError::Mirror {
        source_dir: source.to_path_buf(),
        dest_dir: dest.to_path_buf(),
        message,
    };

    if let (Ok(src), Ok(dst)) = (source.canonicalize(), absolute(dest)) {
        if dst.starts_with(&src) {
            return Err(mirror_err("destination is inside the source".to_string()));
        }
    }

    if dest.exists() {
        debug!("Removing previous mirror at {}", dest.display());
        let removed = if dest.is_dir() {
            fs::remove_dir_all(dest)
        } else {
            fs::remove_file(dest)
        };
        removed.map_err(|e| mirror_err(format!("could not remove old copy: {}", e)))?;
    }

    let mut stats = MirrorStats::default();
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| mirror_err(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| mirror_err(e.to_string()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| mirror_err(format!("{}: {}", target.display(), e)))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| mirror_err(format!("{}: {}", parent.display(), e)))?;
            }
            stats.bytes += fs::copy(entry.path(), &target)
                .map_err(|e| mirror_err(format!("{}: {}", entry.path().display(), e)))?;
            stats.files += 1;
        }
    }

    debug!(
        "Mirrored {} files ({} bytes) into {}",
        stats.files,
        stats.bytes,
        dest.display()
    );
    Ok(stats)
}

/// Absolute form of a path that may not exist yet.
fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && parent.exists() => {
            let name = path.file_name().unwrap_or_default();
            Ok(parent.canonicalize()?.join(name))
        }
        _ => Ok(std::env::current_dir()?.join(path)),
    }
}
