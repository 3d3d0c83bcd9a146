use std::path::PathBuf;

use thiserror::Error;

pub type DriftResult<T> = Result<T, DriftError>;

/// Errors raised outside the pure capture/compare core: baseline storage,
/// config loading and CLI plumbing.
#[derive(Debug, Error)]
pub enum DriftError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization of a baseline or report failed
    #[error("JSON error ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Config file could not be parsed
    #[error("YAML error ({context}): {source}")]
    Yaml {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// No baseline stored under this id
    #[error("Baseline '{id}' not found")]
    BaselineNotFound { id: String },

    /// Stored baseline is structurally unusable
    #[error("Invalid baseline: {0}")]
    InvalidBaseline(String),
}

impl DriftError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DriftError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(context: impl ToString, source: serde_json::Error) -> Self {
        DriftError::Json {
            context: context.to_string(),
            source,
        }
    }
}
