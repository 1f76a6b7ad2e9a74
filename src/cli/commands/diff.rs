//! Diff command: two flat JSON documents to a delta document.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::Settings;
use crate::delta::{self, DeltaDocument};
use crate::io;

pub fn diff_files(base: &Path, patched: &Path, output: &Path) -> anyhow::Result<DeltaDocument> {
    let base_doc = io::load_flat_document(base)
        .with_context(|| format!("Cannot load base document {}", base.display()))?;
    let patched_doc = io::load_flat_document(patched)
        .with_context(|| format!("Cannot load patched document {}", patched.display()))?;

    let delta = delta::diff(&base_doc, &patched_doc);

    super::prepare_parent(output)?;
    io::persist_json(&delta, output)?;
    Ok(delta)
}

/// Run diff command, falling back to configured paths.
pub fn run_diff(
    settings: &Settings,
    base: Option<PathBuf>,
    patched: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<DeltaDocument> {
    let base = base.unwrap_or_else(|| settings.input_path(&settings.files.base_config));
    let patched = patched.unwrap_or_else(|| settings.input_path(&settings.files.patched_config));
    let output = output.unwrap_or_else(|| settings.output_path(&settings.files.delta));

    let delta = diff_files(&base, &patched, &output)?;
    println!(
        "Delta written to {}: {} additions, {} deletions, {} updates",
        output.display(),
        delta.additions.len(),
        delta.deletions.len(),
        delta.updates.len()
    );
    Ok(delta)
}
