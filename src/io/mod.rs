//! File boundary: model XML in, nested XML and JSON documents out.
//!
//! The core modules never touch the filesystem; everything that reads or
//! writes bytes lives here.

pub mod json;
pub mod model;
pub mod xml;

use std::path::Path;

use crate::error::{DocumentError, DocumentResult};

pub use json::{load_delta, load_flat_document, persist_json, to_json_string};
pub use model::{load_model, parse_model};
pub use xml::{XmlOptions, render_tree, write_tree};

/// Create the output directory (and parents) if it does not exist yet.
///
/// Commands call this explicitly before writing any output.
pub fn prepare_output_dir(path: &Path) -> DocumentResult<()> {
    std::fs::create_dir_all(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("[io] output directory ready: {}", path.display());
    Ok(())
}

pub(crate) fn read_to_string(path: &Path) -> DocumentResult<String> {
    std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_string(path: &Path, content: &str) -> DocumentResult<()> {
    std::fs::write(path, content).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })
}
