//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors (for CLI use)
    #[error("entry path not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    // Config parsing/loading errors
    #[error("no crx.toml, crx.config.json or package.json `crx` field found in {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config value for `{field}`: {message}")]
    InvalidValue { field: String, message: String },

    // Schema validation errors (no filesystem checks)
    #[error("no background or content entries specified")]
    NoEntries,

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        let field = err
            .path
            .last()
            .cloned()
            .unwrap_or_else(|| "configuration".to_string());
        ConfigError::InvalidValue {
            field,
            message: err.kind.to_string(),
        }
    }
}
