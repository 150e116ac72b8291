//! Configuration management for zig-deps
//!
//! Settings are layered with figment: embedded defaults, the user config,
//! the repository config (or an explicit `--config` file), `ZIG_DEPS_`
//! environment variables and finally command-line overrides.

mod loader;

pub use loader::ZigDepsConfig;

use serde::{Deserialize, Serialize};

/// Fully resolved settings extracted from the merged configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub zig: ZigSettings,
    pub scan: ScanSettings,
    pub fetch: FetchSettings,
    pub output: OutputSettings,
    pub hooks: HooksSettings,
}

/// Zig toolchain settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZigSettings {
    /// Executable name or path used for `zig fetch`
    pub binary: String,
}

/// Manifest discovery settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Manifest file name to look for
    pub manifest: String,

    /// Descend into subdirectories
    pub recursive: bool,

    /// Honour .gitignore and skip hidden folders while descending
    pub respect_gitignore: bool,
}

/// Hash lookup settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Concurrent lookups (0 = number of CPUs)
    pub jobs: usize,

    /// Per-invocation timeout in seconds
    pub timeout_secs: u64,
}

/// Report rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Characters of a package hash shown in update lines
    pub hash_len: usize,

    /// `text` or `json`
    pub format: OutputFormat,
}

/// Pre-commit configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksSettings {
    /// Default hook configuration file read by `zig-deps hooks`
    pub config_file: String,
}

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for ZigSettings {
    fn default() -> Self {
        Self {
            binary: "zig".to_string(),
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            manifest: "build.zig.zon".to_string(),
            recursive: false,
            respect_gitignore: true,
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            jobs: 0,
            timeout_secs: 300,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            hash_len: 7,
            format: OutputFormat::Text,
        }
    }
}

impl Default for HooksSettings {
    fn default() -> Self {
        Self {
            config_file: ".pre-commit-config.yaml".to_string(),
        }
    }
}

impl FetchSettings {
    /// Number of lookups allowed to run at once
    pub fn effective_jobs(&self) -> usize {
        if self.jobs == 0 {
            num_cpus::get().max(1)
        } else {
            self.jobs
        }
    }
}

impl Settings {
    /// Validate values figment cannot check on its own
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.zig.binary.trim().is_empty() {
            anyhow::bail!("zig.binary cannot be empty");
        }
        if self.scan.manifest.trim().is_empty() {
            anyhow::bail!("scan.manifest cannot be empty");
        }
        if self.fetch.timeout_secs == 0 {
            anyhow::bail!("fetch.timeout_secs cannot be 0");
        }
        if self.output.hash_len == 0 {
            anyhow::bail!("output.hash_len cannot be 0");
        }
        Ok(())
    }
}
