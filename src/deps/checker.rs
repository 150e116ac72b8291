use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::{Dependencies, Fetcher, base_url, short_hash};

/// Outcome for a single dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyStatus {
    UpToDate,
    OutOfDate,
    Updated,
}

/// What the checker found (and did) for one dependency URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    /// Folder of the manifest listing the dependency
    pub folder: PathBuf,
    pub url: String,
    pub base: String,
    /// Hash of the pinned URL
    pub current: String,
    /// Hash of the base URL
    pub latest: String,
    pub status: DependencyStatus,
}

impl DependencyReport {
    /// One-line human readable summary
    pub fn summary(&self, hash_len: usize) -> String {
        match self.status {
            DependencyStatus::UpToDate => format!("[{}] already up to date", self.base),
            DependencyStatus::OutOfDate => format!("[{}] out of date", self.base),
            DependencyStatus::Updated => format!(
                "[{}] updated {} -> {}",
                self.base,
                short_hash(&self.current, hash_len),
                short_hash(&self.latest, hash_len)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    /// Save the latest version of out-of-date dependencies
    pub update: bool,

    /// Hash lookups allowed in flight at once
    pub jobs: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            update: false,
            jobs: 1,
        }
    }
}

struct Pending {
    folder: PathBuf,
    url: String,
    base: String,
}

/// Compares pinned and latest hashes for every dependency
pub struct Checker<F> {
    fetcher: Arc<F>,
    options: CheckOptions,
}

impl<F: Fetcher + 'static> Checker<F> {
    pub fn new(fetcher: F, options: CheckOptions) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            options,
        }
    }

    /// Check every dependency, returning reports in discovery order
    pub async fn run(&self, dependencies: &Dependencies) -> Result<Vec<DependencyReport>> {
        let mut reports = Vec::new();
        self.run_with(dependencies, |report| reports.push(report)).await?;
        Ok(reports)
    }

    /// Check every dependency, handing each report to `on_report` as soon as
    /// it and every report before it are settled.
    ///
    /// Lookups run concurrently. Updates run one at a time, in discovery
    /// order, since `zig fetch --save` rewrites the manifest shared by a
    /// folder's entries. When a lookup or save fails, every report already
    /// handed out stays valid, so callers can show which manifests changed.
    pub async fn run_with<R>(&self, dependencies: &Dependencies, mut on_report: R) -> Result<()>
    where
        R: FnMut(DependencyReport),
    {
        let pending = Self::pending(dependencies)?;
        let mut lookups = self.spawn_lookups(&pending);

        let mut hashes: Vec<Option<(String, String)>> = vec![None; pending.len()];
        let mut next = 0;

        // Dropping the set on error aborts the remaining lookups
        while let Some(joined) = lookups.join_next().await {
            let (index, current, latest) = joined??;
            hashes[index] = Some((current, latest));

            while let Some((current, latest)) = hashes.get_mut(next).and_then(Option::take) {
                on_report(self.settle(&pending[next], current, latest).await?);
                next += 1;
            }
        }

        Ok(())
    }

    // Unsupported URLs are rejected before any zig process is started
    fn pending(dependencies: &Dependencies) -> Result<Vec<Pending>> {
        let mut pending = Vec::new();
        for (folder, urls) in dependencies {
            for url in urls {
                pending.push(Pending {
                    folder: folder.clone(),
                    url: url.clone(),
                    base: base_url(url)?.to_string(),
                });
            }
        }
        Ok(pending)
    }

    fn spawn_lookups(&self, pending: &[Pending]) -> JoinSet<Result<(usize, String, String)>> {
        let semaphore = Arc::new(Semaphore::new(self.options.jobs.max(1)));
        let mut tasks = JoinSet::new();

        for (index, dep) in pending.iter().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let semaphore = Arc::clone(&semaphore);
            let url = dep.url.clone();
            let base = dep.base.clone();

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await?;
                tracing::debug!("looking up {url}");
                let current = fetcher.hash(&url).await?;
                let latest = fetcher.hash(&base).await?;
                Ok::<_, anyhow::Error>((index, current, latest))
            });
        }

        tasks
    }

    async fn settle(
        &self,
        dep: &Pending,
        current: String,
        latest: String,
    ) -> Result<DependencyReport> {
        let status = if current == latest {
            DependencyStatus::UpToDate
        } else if self.options.update {
            tracing::info!("updating {} in {}", dep.base, dep.folder.display());
            self.fetcher.save(&dep.folder, &dep.base).await?;
            DependencyStatus::Updated
        } else {
            DependencyStatus::OutOfDate
        };

        Ok(DependencyReport {
            folder: dep.folder.clone(),
            url: dep.url.clone(),
            base: dep.base.clone(),
            current,
            latest,
            status,
        })
    }
}
