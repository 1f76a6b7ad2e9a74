//! Patch command: base document plus delta to a rebuilt document.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::Settings;
use crate::delta::{FlatDocument, PatchMode, Patcher};
use crate::io;

pub fn patch_files(
    base: &Path,
    delta: &Path,
    output: &Path,
    mode: PatchMode,
) -> anyhow::Result<FlatDocument> {
    let base_doc = io::load_flat_document(base)
        .with_context(|| format!("Cannot load base document {}", base.display()))?;
    let delta_doc = io::load_delta(delta)
        .with_context(|| format!("Cannot load delta {}", delta.display()))?;

    let patched = Patcher::new(mode).apply(&base_doc, &delta_doc);

    super::prepare_parent(output)?;
    io::persist_json(&patched, output)?;
    Ok(patched)
}

/// Run patch command, falling back to configured paths and mode.
pub fn run_patch(
    settings: &Settings,
    base: Option<PathBuf>,
    delta: Option<PathBuf>,
    output: Option<PathBuf>,
    mode: Option<PatchMode>,
) -> anyhow::Result<FlatDocument> {
    let base = base.unwrap_or_else(|| settings.input_path(&settings.files.base_config));
    let delta = delta.unwrap_or_else(|| settings.output_path(&settings.files.delta));
    let output = output.unwrap_or_else(|| settings.output_path(&settings.files.patched_output));
    let mode = mode.unwrap_or(settings.patch.mode);

    let patched = patch_files(&base, &delta, &output, mode)?;
    println!(
        "Patched document written to {} ({} keys)",
        output.display(),
        patched.len()
    );
    Ok(patched)
}
