use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use std::path::Path;

use super::Settings;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Merged zig-deps configuration
pub struct ZigDepsConfig {
    figment: Figment,
}

impl ZigDepsConfig {
    pub fn load() -> Result<Self> {
        Self::load_with(None, None)
    }

    /// Load configuration, optionally from an explicit file and with
    /// command-line overrides layered on top
    pub fn load_with(
        custom_config: Option<&str>,
        cli_overrides: Option<serde_json::Value>,
    ) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        // A custom config replaces the user and repository files
        if let Some(custom_path) = custom_config {
            let path = Path::new(custom_path);
            if !path.is_file() {
                anyhow::bail!("Config file not found: {custom_path}");
            }
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        } else {
            let user_config = Self::user_config_path();
            figment = figment
                // User config
                .merge(Toml::file(&user_config))
                .merge(Json::file(user_config.replace(".toml", ".json")))
                .merge(Yaml::file(user_config.replace(".toml", ".yaml")))
                .merge(Yaml::file(user_config.replace(".toml", ".yml")))
                // Repository config
                .merge(Toml::file("zig-deps.toml"))
                .merge(Json::file("zig-deps.json"))
                .merge(Yaml::file("zig-deps.yaml"))
                .merge(Yaml::file("zig-deps.yml"));
        }

        figment = figment.merge(Env::prefixed("ZIG_DEPS_").split("__"));

        if let Some(overrides) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides {overrides}");
            figment = figment.merge(Serialized::defaults(overrides));
        }

        Ok(ZigDepsConfig { figment })
    }

    /// Extract and validate typed settings
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .context("Failed to read zig-deps configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Get the full merged configuration as a structured value
    pub fn get_full_config(&self) -> Result<serde_json::Value> {
        Ok(self.figment.extract()?)
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/zig-deps/config.toml"),
            Err(_) => "~/.config/zig-deps/config.toml".to_string(),
        }
    }
}
