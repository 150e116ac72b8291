use anyhow::{Context, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use super::DepsError;

/// Source of package hashes and manifest updates
pub trait Fetcher: Send + Sync {
    /// Given a package's URL, get its hash
    fn hash(&self, url: &str) -> impl Future<Output = Result<String>> + Send;

    /// Save `url` as the dependency of the manifest in `folder`
    fn save(&self, folder: &Path, url: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Fetcher backed by the `zig` executable
#[derive(Debug, Clone)]
pub struct ZigFetcher {
    binary: PathBuf,
    timeout: Duration,
}

impl ZigFetcher {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Resolve `binary` (a name in PATH or a path) before any work starts
    pub fn locate(binary: &str, timeout: Duration) -> Result<Self, DepsError> {
        let resolved = which::which(binary).map_err(|_| DepsError::ZigNotFound {
            binary: binary.to_string(),
        })?;
        tracing::debug!("using zig at {}", resolved.display());
        Ok(Self::new(resolved, timeout))
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    async fn run(&self, args: &[&str], cwd: Option<&Path>) -> Result<String> {
        let command = format!("zig {}", args.join(" "));
        tracing::debug!("running `{command}`");

        let mut cmd = Command::new(&self.binary);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| DepsError::Timeout {
                command: command.clone(),
                secs: self.timeout.as_secs(),
            })?
            .with_context(|| format!("Failed to execute `{command}`"))?;

        if !output.status.success() {
            return Err(DepsError::FetchFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Fetcher for ZigFetcher {
    async fn hash(&self, url: &str) -> Result<String> {
        self.run(&["fetch", url], None).await
    }

    async fn save(&self, folder: &Path, url: &str) -> Result<()> {
        self.run(&["fetch", "--save", url], Some(folder)).await?;
        Ok(())
    }
}
