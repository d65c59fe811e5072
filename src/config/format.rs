use clap::ValueEnum;
use std::fmt;
use std::path::Path;

use super::error::ConfigError;
use super::spec::Spec;

/// Extensions probed when searching, in probe order
pub const SEARCH_EXTENSIONS: [&str; 4] = ["json", "toml", "yaml", "yml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Guess the format of a file whose extension says nothing.
    /// JSON or TOML when the content parses as such, YAML otherwise.
    /// A leading brace may still be a YAML flow mapping.
    pub fn sniff(content: &str) -> Self {
        let trimmed = content.trim_start();
        if trimmed.starts_with('{') && serde_json::from_str::<serde_json::Value>(content).is_ok() {
            Self::Json
        } else if toml::from_str::<toml::Value>(content).is_ok() {
            Self::Toml
        } else {
            Self::Yaml
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        })
    }
}

/// A syntactically valid configuration file that has not been checked
/// against the [`Spec`] schema yet.
#[derive(Debug, Clone)]
pub enum Document {
    Toml(toml::Value),
    Yaml(serde_yaml::Value),
    Json(serde_json::Value),
}

impl Document {
    pub fn parse(path: &Path, format: ConfigFormat, content: &str) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::from_str(content)
                .map(Self::Toml)
                .map_err(|e| ConfigError::parse(path, format, e)),
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map(Self::Yaml)
                .map_err(|e| ConfigError::parse(path, format, e)),
            ConfigFormat::Json => serde_json::from_str(content)
                .map(Self::Json)
                .map_err(|e| ConfigError::parse(path, format, e)),
        }
    }

    pub fn into_spec(self, path: &Path) -> Result<Spec, ConfigError> {
        match self {
            Self::Toml(value) => value.try_into().map_err(|e| ConfigError::schema(path, e)),
            // An empty YAML file parses to null
            Self::Yaml(serde_yaml::Value::Null) => Ok(Spec::default()),
            Self::Yaml(value) => serde_yaml::from_value(value).map_err(|e| ConfigError::schema(path, e)),
            Self::Json(value) => serde_json::from_value(value).map_err(|e| ConfigError::schema(path, e)),
        }
    }
}
