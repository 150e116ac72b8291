//! Command-line interface for zig-deps
//!
//! Without a subcommand zig-deps checks the dependencies of the project at
//! ROOT. The `hooks` and `config` subcommands inspect the pre-commit hook
//! configuration and the merged zig-deps settings.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod output;

pub use commands::check::CheckArgs;
pub use output::Output;

use crate::config::{OutputFormat, ZigDepsConfig};

/// Tool to check if a zig project's dependencies are up to date
#[derive(Parser)]
#[command(
    name = "zig-deps",
    version,
    about = "Tool to check if a zig project's dependencies are up to date",
    long_about = "Tool to check if a zig project's dependencies are up to date.\n\n\
                  Can also update them, and check for sub-projects recursively.",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub check: CheckArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect the pre-commit hook configuration
    #[command(subcommand)]
    Hooks(HooksCommands),
    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum HooksCommands {
    /// Check the hook configuration for structural problems
    Check {
        /// Hook configuration file (defaults to hooks.config_file)
        file: Option<PathBuf>,
        /// Also verify every pinned rev exists on its remote
        #[arg(long)]
        remote: bool,
    },
    /// List hooks in execution order
    List {
        /// Hook configuration file (defaults to hooks.config_file)
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the merged configuration
    Show,
    /// Validate the merged configuration
    Validate,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<ExitCode> {
        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);
        let config = ZigDepsConfig::load_with(self.config.as_deref(), Some(self.overrides()))?;
        let settings = config.settings()?;

        match self.command {
            Some(Commands::Hooks(cmd)) => commands::hooks::execute(cmd, &settings, &output).await,
            Some(Commands::Config(cmd)) => {
                commands::config::execute(cmd, &config, &settings, &output)
            }
            None => commands::check::execute(self.check, &settings, &output).await,
        }
    }

    /// Flags that take precedence over every configuration source
    fn overrides(&self) -> serde_json::Value {
        let mut overrides = json!({});

        if self.check.recursive {
            overrides["scan"]["recursive"] = json!(true);
        }
        if let Some(jobs) = self.check.jobs {
            overrides["fetch"]["jobs"] = json!(jobs);
        }
        if let Some(zig) = &self.check.zig {
            overrides["zig"]["binary"] = json!(zig);
        }
        if let Some(format) = self.format {
            overrides["output"]["format"] = json!(format);
        }

        overrides
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
