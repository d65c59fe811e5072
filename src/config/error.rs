use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::format::ConfigFormat;

type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures while resolving the configuration. Every variant keeps the
/// underlying error as its `source()`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can't find current working directory")]
    EnvironmentUnavailable(#[source] io::Error),

    #[error("could not read configurations from {location}")]
    NotFound {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("could not read configurations: {} is not valid {format}", path.display())]
    ParseFailure {
        path: PathBuf,
        format: ConfigFormat,
        #[source]
        source: Cause,
    },

    #[error("could not unmarshal config file {}", path.display())]
    SchemaMismatch {
        path: PathBuf,
        #[source]
        source: Cause,
    },
}

impl ConfigError {
    pub(crate) fn parse(path: impl Into<PathBuf>, format: ConfigFormat, source: impl Into<Cause>) -> Self {
        Self::ParseFailure {
            path: path.into(),
            format,
            source: source.into(),
        }
    }

    pub(crate) fn schema(path: impl Into<PathBuf>, source: impl Into<Cause>) -> Self {
        Self::SchemaMismatch {
            path: path.into(),
            source: source.into(),
        }
    }
}
