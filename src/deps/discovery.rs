//! Manifest discovery
//!
//! Non-recursive scans only look at `<root>/build.zig.zon`. Recursive scans
//! walk the tree with the `ignore` crate so projects' own ignore rules keep
//! caches and vendored trees out of the results.

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::zon;

/// Dependency URLs grouped by the folder of the manifest that lists them
pub type Dependencies = BTreeMap<PathBuf, Vec<String>>;

/// Locates manifests under a project root
#[derive(Debug, Clone)]
pub struct ManifestScanner {
    manifest: String,
    recursive: bool,
    respect_gitignore: bool,
}

impl ManifestScanner {
    pub fn new(manifest: impl Into<String>) -> Self {
        Self {
            manifest: manifest.into(),
            recursive: false,
            respect_gitignore: true,
        }
    }

    /// Scan subdirectories for other manifests
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Apply .gitignore and hidden-file filtering while walking
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Paths of every manifest under `root`, sorted by path
    pub fn manifests(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            anyhow::bail!("'{}' is not a directory.", root.display());
        }

        if !self.recursive {
            let candidate = root.join(&self.manifest);
            return Ok(if candidate.is_file() {
                vec![candidate]
            } else {
                Vec::new()
            });
        }

        let walker = WalkBuilder::new(root)
            .standard_filters(self.respect_gitignore)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut found = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("skipping unreadable path: {err}");
                    continue;
                }
            };

            let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
            if is_file && entry.file_name() == self.manifest.as_str() {
                tracing::debug!("found manifest {}", entry.path().display());
                found.push(entry.into_path());
            }
        }

        found.sort();
        Ok(found)
    }

    /// Given a folder, get all of the dependency URLs in it
    pub fn collect(&self, root: &Path) -> Result<Dependencies> {
        let mut dependencies = Dependencies::new();

        for manifest in self.manifests(root)? {
            let source = std::fs::read_to_string(&manifest)
                .with_context(|| format!("Failed to read manifest: {}", manifest.display()))?;

            let urls = zon::extract_urls(&source);
            tracing::debug!("{} lists {} URL(s)", manifest.display(), urls.len());
            if urls.is_empty() {
                continue;
            }

            let folder = manifest
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            dependencies.entry(folder).or_default().extend(urls);
        }

        Ok(dependencies)
    }
}
