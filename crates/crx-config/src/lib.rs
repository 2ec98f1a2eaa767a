//! Configuration for crx, the browser-extension build-graph generator.
//!
//! The types here describe what a user declares about their extension:
//! background scripts, content scripts, the dev reload address and any
//! manifest keys that should pass straight through to `manifest.json`.

pub mod dev;
pub mod discovery;
pub mod entries;
pub mod error;
pub mod options;
pub mod validation;

mod helpers;

pub use dev::{Mode, ReloadOptions};
pub use discovery::{ConfigDiscovery, ConfigOverrides};
pub use entries::{BackgroundSpec, ContentScriptGroup, ContentSpec};
pub use error::{ConfigError, Result};
pub use options::{ExtensionOptions, RESERVED_KEYS};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator};
