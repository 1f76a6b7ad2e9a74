//! Command implementations for the CLI.
//!
//! Each command is implemented in its own module and returns `anyhow::Result`
//! so `main` can report failures uniformly.

pub mod diff;
pub mod generate;
pub mod init;
pub mod patch;
pub mod run;

use std::path::Path;

use anyhow::Context;

use crate::io::prepare_output_dir;

/// Make sure the directory a file will be written into exists.
pub(crate) fn prepare_parent(file: &Path) -> anyhow::Result<()> {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => prepare_output_dir(parent)
            .with_context(|| format!("Cannot prepare output directory for {}", file.display())),
        _ => Ok(()),
    }
}
