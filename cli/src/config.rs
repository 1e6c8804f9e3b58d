// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config file handling for the CLI

use anyhow::{Context, Result};
use directories::ProjectDirs;
use pins_core::PinsConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of `config.toml` for this platform
pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from("io", "pins", "pins").context("Failed to determine config directory")?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Load the config at `path`, or the platform default when `None`.
///
/// A missing file is created with default settings.
pub fn load_config(path: Option<&Path>) -> Result<PinsConfig> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => get_config_path().context("Failed to determine config path")?,
    };

    if !config_path.exists() {
        tracing::info!("Config file not found, creating default at: {}", config_path.display());
        let default_config = PinsConfig::default();
        write_config(&config_path, &default_config)?;
        return Ok(default_config);
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let config = toml::from_str::<PinsConfig>(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid settings in {}", config_path.display()))?;
    Ok(config)
}

/// Save `config` to `path`, or the platform default when `None`
pub fn save_config(config: &PinsConfig, path: Option<&Path>) -> Result<()> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => get_config_path().context("Failed to determine config path")?,
    };
    write_config(&config_path, config)?;
    tracing::info!("Saved config to: {}", config_path.display());
    Ok(())
}

fn write_config(path: &Path, config: &PinsConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    let toml_content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, toml_content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))
}
