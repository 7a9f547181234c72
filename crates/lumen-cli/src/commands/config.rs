//! Effective configuration display.

use anyhow::Context;
use lumen_app::AppConfig;
use std::path::Path;

/// Load the configuration the way every command does: file (or defaults),
/// then `LUMEN_*` environment overrides.
pub fn load(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut config = match path {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    config
        .merge_with_env()
        .context("invalid LUMEN_* environment override")?;
    Ok(config)
}

/// Render the effective configuration as TOML.
pub fn show(config: &AppConfig) -> anyhow::Result<String> {
    Ok(config.to_toml_string()?)
}
