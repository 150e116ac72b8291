//! Configuration command implementations

use anyhow::Result;
use std::process::ExitCode;

use crate::cli::{ConfigCommands, Output};
use crate::config::{OutputFormat, Settings, ZigDepsConfig};

/// Execute config commands
pub fn execute(
    cmd: ConfigCommands,
    config: &ZigDepsConfig,
    settings: &Settings,
    output: &Output,
) -> Result<ExitCode> {
    match cmd {
        ConfigCommands::Show => show(config, settings),
        ConfigCommands::Validate => validate(settings, output),
    }
}

fn show(config: &ZigDepsConfig, settings: &Settings) -> Result<ExitCode> {
    match settings.output.format {
        OutputFormat::Json => {
            let merged = config.get_full_config()?;
            println!("{}", serde_json::to_string_pretty(&merged)?);
        }
        OutputFormat::Text => print!("{}", toml::to_string_pretty(settings)?),
    }
    Ok(ExitCode::SUCCESS)
}

// Settings were already extracted and validated while loading
fn validate(settings: &Settings, output: &Output) -> Result<ExitCode> {
    output.success("Configuration is valid");
    output.key_value("zig:", &settings.zig.binary);
    output.key_value("manifest:", &settings.scan.manifest);
    output.key_value("recursive:", &settings.scan.recursive.to_string());
    output.key_value("jobs:", &settings.fetch.effective_jobs().to_string());
    output.key_value("timeout:", &format!("{}s", settings.fetch.timeout_secs));
    output.key_value("hook config:", &settings.hooks.config_file);
    Ok(ExitCode::SUCCESS)
}
