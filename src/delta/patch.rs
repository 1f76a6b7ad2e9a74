use serde::{Deserialize, Serialize};

use super::{DeltaDocument, FlatDocument};

/// How a delta is applied to its base document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatchMode {
    /// Output holds only the keys named by updates and additions. The base is not consulted.
    #[default]
    DeltaOnly,
    /// Base minus deletions, with updates applied in place and additions appended.
    InPlace,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Patcher {
    mode: PatchMode,
}

impl Patcher {
    pub fn new(mode: PatchMode) -> Self {
        Self { mode }
    }

    /// Rebuild a document from `base` and `delta` according to the patch mode.
    ///
    /// Updates are written first, then additions, so a key present in both
    /// ends up with the addition's value.
    pub fn apply(&self, base: &FlatDocument, delta: &DeltaDocument) -> FlatDocument {
        let mut result = match self.mode {
            PatchMode::DeltaOnly => {
                FlatDocument::with_capacity(delta.updates.len() + delta.additions.len())
            }
            PatchMode::InPlace => {
                let mut kept = base.clone();
                for key in &delta.deletions {
                    kept.shift_remove(key);
                }
                kept
            }
        };

        for update in &delta.updates {
            result.insert(update.key.clone(), update.to.clone());
        }
        for addition in &delta.additions {
            result.insert(addition.key.clone(), addition.value.clone());
        }

        tracing::info!(
            "[patch] {:?}: {} keys from base of {}",
            self.mode,
            result.len(),
            base.len()
        );
        result
    }
}
