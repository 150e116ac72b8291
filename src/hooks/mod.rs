//! Pre-commit hook configuration
//!
//! Reads `.pre-commit-config.yaml` files: an ordered list of repository
//! blocks, each pinned to a revision and listing the hooks to run from it.
//! Nothing here runs hooks. The external runner does that; this module only
//! models and checks the data it will be handed.

mod validate;

pub use validate::{Finding, FindingKind, Severity};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Runner pseudo-repositories that are never cloned and carry no `rev`
pub const LOCAL_REPOS: [&str; 2] = ["local", "meta"];

/// Top-level structure of a pre-commit configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreCommitConfig {
    /// Repository blocks in execution order
    #[serde(default)]
    pub repos: Vec<RepoBlock>,

    /// Top-level runner options (`default_stages`, `fail_fast`, ...)
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// One external hook repository pinned to a revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoBlock {
    /// Source repository URL (or `local` / `meta`)
    pub repo: String,

    /// Pinned revision, tag or commit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,

    #[serde(default)]
    pub hooks: Vec<HookEntry>,
}

/// A hook selected from a repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookEntry {
    /// Identifier exported by the repository's hook manifest
    pub id: String,

    /// Extra command-line arguments for the hook
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Any other per-hook option, kept untouched
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// A hook flattened together with the repository it comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookRegistration<'a> {
    /// 1-based execution position
    pub position: usize,
    pub repo: &'a str,
    pub rev: Option<&'a str>,
    pub id: &'a str,
    pub args: &'a [String],
}

impl RepoBlock {
    /// Whether the runner clones this repository
    pub fn is_remote(&self) -> bool {
        !LOCAL_REPOS.contains(&self.repo.as_str())
    }
}

impl PreCommitConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yml::from_str(source).context("Failed to parse pre-commit configuration")
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read hook config: {}", path.display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Invalid hook config: {}", path.display()))
    }

    /// Every hook in the order the runner executes them
    pub fn registrations(&self) -> Vec<HookRegistration<'_>> {
        self.repos
            .iter()
            .flat_map(|block| block.hooks.iter().map(move |hook| (block, hook)))
            .enumerate()
            .map(|(index, (block, hook))| HookRegistration {
                position: index + 1,
                repo: &block.repo,
                rev: block.rev.as_deref(),
                id: &hook.id,
                args: &hook.args,
            })
            .collect()
    }

    /// Total number of hook entries
    pub fn hook_count(&self) -> usize {
        self.repos.iter().map(|block| block.hooks.len()).sum()
    }

    /// Structural checks; see [`FindingKind`] for what is reported
    pub fn check(&self) -> Vec<Finding> {
        validate::check(self)
    }
}

#[cfg(test)]
mod tests;
