//! Artifact registry — tracks what the current run produced and removes
//! orphans afterwards.
//!
//! An explicit per-run value, created empty and threaded through processing;
//! `sweep` must only run once every spec document has been handled, since an
//! artifact belonging to a later document is not an orphan.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct ArtifactRegistry {
    recorded: BTreeSet<PathBuf>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an artifact path that was written or confirmed up to date.
    pub fn record(&mut self, path: impl Into<PathBuf>) {
        self.recorded.insert(path.into());
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.recorded.contains(path)
    }

    /// Delete every regular file directly under `output_dir` that was never
    /// recorded this run. Returns the removed paths. Subdirectories are left
    /// alone.
    pub fn sweep(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(output_dir)
            .with_context(|| format!("failed to read output directory: {}", output_dir.display()))?;

        let mut removed = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && !self.contains(&path) {
                fs::remove_file(&path)
                    .with_context(|| format!("failed to remove orphan: {}", path.display()))?;
                removed.push(path);
            }
        }
        removed.sort();
        Ok(removed)
    }
}
