//! # Configuration resolution
//!
//! klepto reads exactly one configuration file per invocation:
//!
//! 1. **Explicit path**: `--config <PATH>`. Only that file is read.
//! 2. **Search path**: otherwise `.klepto.{json,toml,yaml,yml}` is looked up in
//!    the working directory, then in `.`. The first file found wins.
//!
//! The file is parsed according to its extension (or sniffed when it has
//! none) and unmarshalled into a [`Spec`]. Every failure is reported as a
//! [`ConfigError`]; nothing is ever substituted with defaults.

mod error;
mod format;
mod spec;

pub use error::ConfigError;
pub use format::{ConfigFormat, Document, SEARCH_EXTENSIONS};
pub use spec::{Filter, Relationship, Spec, Table};

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Base name of the configuration file looked up on the search path
pub const CONFIG_NAME: &str = ".klepto";

/// Where the configuration comes from for this invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Search { name: String, dirs: Vec<PathBuf> },
}

impl ConfigSource {
    /// Pick the source for a `--config` value. An empty path means "not given".
    pub fn detect(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) if !path.as_os_str().is_empty() => Ok(Self::Explicit(path.to_path_buf())),
            _ => {
                let cwd = std::env::current_dir().map_err(ConfigError::EnvironmentUnavailable)?;
                Ok(Self::search_from(cwd))
            }
        }
    }

    /// Search source rooted at `cwd`, followed by the relative `.`
    pub fn search_from(cwd: PathBuf) -> Self {
        Self::Search {
            name: CONFIG_NAME.to_string(),
            dirs: vec![cwd, PathBuf::from(".")],
        }
    }

    /// Find the file this source points at
    pub fn locate(&self) -> Result<PathBuf, ConfigError> {
        match self {
            Self::Explicit(path) => Ok(path.clone()),
            Self::Search { name, dirs } => {
                let mut probed = HashSet::new();
                for dir in dirs {
                    // "." and the working directory are usually the same place
                    let key = fs::canonicalize(dir).unwrap_or_else(|_| dir.clone());
                    if !probed.insert(key) {
                        debug!("Skipping {}, already searched", dir.display());
                        continue;
                    }
                    for ext in SEARCH_EXTENSIONS {
                        let candidate = dir.join(format!("{name}.{ext}"));
                        debug!("Looking for {}", candidate.display());
                        if candidate.is_file() {
                            return Ok(candidate);
                        }
                    }
                }

                let searched: Vec<_> = dirs.iter().map(|d| d.display().to_string()).collect();
                Err(ConfigError::NotFound {
                    location: format!("[{}]", searched.join(", ")),
                    source: io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("config file \"{name}\" not found"),
                    ),
                })
            }
        }
    }

    /// Locate, read, parse and unmarshal the configuration
    pub fn load(&self) -> Result<Spec, ConfigError> {
        let path = self.locate()?;
        load_file(&path)
    }
}

/// Resolve the effective configuration for this invocation
pub fn resolve(explicit: Option<&Path>) -> Result<Spec, ConfigError> {
    let source = ConfigSource::detect(explicit)?;
    match &source {
        ConfigSource::Explicit(path) => debug!("Reading config from {}...", path.display()),
        ConfigSource::Search { name, .. } => debug!("Reading config from {name}..."),
    }
    source.load()
}

/// Read a single configuration file
pub fn load_file(path: &Path) -> Result<Spec, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::NotFound {
        location: path.display().to_string(),
        source,
    })?;

    let format = ConfigFormat::from_path(path).unwrap_or_else(|| ConfigFormat::sniff(&content));
    debug!("Parsing {} as {format}", path.display());

    let spec = Document::parse(path, format, &content)?.into_spec(path)?;
    debug!("Loaded {} table definitions", spec.tables.len());
    Ok(spec)
}
