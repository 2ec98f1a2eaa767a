//! Error types for the build-graph generator.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A plugin hook failed. The build that ran it should be aborted.
    #[error("plugin `{plugin}` failed in `{hook}`: {message}")]
    Plugin {
        plugin: String,
        hook: &'static str,
        message: String,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] crx_config::ConfigError),
}

impl Error {
    pub fn plugin(
        plugin: impl Into<String>,
        hook: &'static str,
        message: impl std::fmt::Display,
    ) -> Self {
        Error::Plugin {
            plugin: plugin.into(),
            hook,
            message: message.to_string(),
        }
    }
}
