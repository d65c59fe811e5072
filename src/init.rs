use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{ConfigFormat, Spec, CONFIG_NAME};

const TOML_TEMPLATE: &str = include_str!("../templates/klepto.toml");

/// Conventional file name for a format, e.g. `.klepto.toml`
pub fn default_file_name(format: ConfigFormat) -> String {
    format!("{}.{}", CONFIG_NAME, format.extension())
}

/// Starter configuration in the requested format.
/// Every format describes the same tables.
pub fn render(format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Toml => Ok(TOML_TEMPLATE.to_string()),
        ConfigFormat::Yaml => {
            serde_yaml::to_string(&template_spec()?).context("Failed to render YAML configuration")
        }
        ConfigFormat::Json => {
            let json = serde_json::to_string_pretty(&template_spec()?)
                .context("Failed to render JSON configuration")?;
            Ok(json + "\n")
        }
    }
}

fn template_spec() -> Result<Spec> {
    toml::from_str(TOML_TEMPLATE).context("Invalid starter configuration template")
}

/// Write a starter configuration to `path`
pub fn generate_config_at_path<P: AsRef<Path>>(path: P, format: ConfigFormat, force: bool) -> Result<PathBuf> {
    let path = path.as_ref();

    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "Config file {} already exists. Use --force to overwrite it.",
            path.display()
        ));
    }

    let content = render(format)?;
    debug!("Writing {format} configuration to {}", path.display());
    fs::write(path, content).with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(path.to_path_buf())
}
