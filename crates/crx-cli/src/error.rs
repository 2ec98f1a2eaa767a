//! Error handling for the crx CLI.
//!
//! `CliError` wraps the library errors and adds the failures only the CLI can
//! hit: binding the reload server, watching the output directory, writing
//! artifacts.
//!
//! ```rust,no_run
//! use crx_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_manifest(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

mod report;

use std::path::PathBuf;
use thiserror::Error;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating the extension config failed
    #[error("Configuration error: {0}")]
    Config(#[from] crx_config::ConfigError),

    /// Build graph generation failed
    #[error("Build error: {0}")]
    Bundler(#[from] crx_bundler::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reload server errors
    #[error("Server error: {0}")]
    Server(String),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("{0}")]
    Custom(String),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}
