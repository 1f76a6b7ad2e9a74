//! Run command: generate, diff and patch in sequence with configured paths.

use crate::config::Settings;

pub fn run_all(settings: &Settings) -> anyhow::Result<()> {
    tracing::info!(
        "[run] input {} -> output {}",
        settings.input_dir.display(),
        settings.output_dir.display()
    );

    super::generate::run_generate(settings, None, None, None, None)?;
    super::diff::run_diff(settings, None, None, None)?;
    super::patch::run_patch(settings, None, None, None, None)?;
    Ok(())
}
