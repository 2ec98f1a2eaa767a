//! crx CLI - browser-extension builds from a single config file.
//!
//! The CLI loads `crx.toml` (or `crx.config.json`, or the `crx` field of
//! `package.json`), generates the build graph through `crx-bundler`, and writes
//! `manifest.json`, `background.html` and `crx.builds.json` for the host
//! bundler. `crx dev` additionally serves the reload channel over WebSocket.
//!
//! - [`error`] - error types and miette reporting
//! - [`logger`] - tracing setup
//! - [`ui`] - status lines
//! - [`commands`] - `build`, `dev` and `check`
//! - [`dev`] - reload server and output watcher

pub mod cli;
pub mod commands;
pub mod dev;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
