//! Pluggable config validation strategies
//!
//! Resolution itself never fails on a bad shape. These validators are what
//! `crx check` runs to tell the user about problems up front.

use std::path::{Path, PathBuf};

use crate::entries::{BackgroundSpec, ContentSpec};
use crate::error::{ConfigError, Result};
use crate::options::ExtensionOptions;

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, options: &ExtensionOptions) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use crx_config::{BackgroundSpec, ConfigValidator, ExtensionOptions, SchemaValidator};
///
/// let options = ExtensionOptions::default().with_background(BackgroundSpec::path("bg.ts"));
/// SchemaValidator.validate(&options).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, options: &ExtensionOptions) -> Result<()> {
        if options.name.trim().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "extension name cannot be empty".to_string(),
                hint: Some("Set `name` in crx.toml".to_string()),
            });
        }

        if !is_valid_version(&options.version) {
            return Err(ConfigError::SchemaValidation {
                message: format!("invalid extension version `{}`", options.version),
                hint: Some(
                    "Use one to four dot-separated integers between 0 and 65535, e.g. 1.0.0"
                        .to_string(),
                ),
            });
        }

        if !matches!(options.manifest_version, 2 | 3) {
            return Err(ConfigError::SchemaValidation {
                message: format!(
                    "manifest_version {} is not supported",
                    options.manifest_version
                ),
                hint: Some("Use 2 or 3".to_string()),
            });
        }

        if options.port == 0 {
            return Err(ConfigError::SchemaValidation {
                message: "reload port cannot be 0".to_string(),
                hint: Some("Pick a fixed port so the extension can reconnect".to_string()),
            });
        }

        if let Some(BackgroundSpec::Unrecognized(value)) = &options.background {
            return Err(ConfigError::SchemaValidation {
                message: format!("unrecognized `background` value: {value}"),
                hint: Some(
                    "Use a path, a list of paths, { page = ... } or { scripts = [...] }"
                        .to_string(),
                ),
            });
        }

        if let Some(ContentSpec::Unrecognized(value)) = &options.content {
            return Err(ConfigError::SchemaValidation {
                message: format!("unrecognized `content` value: {value}"),
                hint: Some(
                    "Use a path, a list of paths, or a list of { matches, js } groups".to_string(),
                ),
            });
        }

        if declared_sources(options).is_empty() {
            return Err(ConfigError::NoEntries);
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs the schema checks, then confirms every declared source exists
/// relative to the project root.
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, options: &ExtensionOptions) -> Result<()> {
        SchemaValidator.validate(options)?;

        for source in declared_sources(options) {
            let path = Path::new(source);
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                self.root.join(path)
            };
            if !path.exists() {
                return Err(ConfigError::EntryNotFound(path));
            }
        }

        Ok(())
    }
}

fn declared_sources(options: &ExtensionOptions) -> Vec<&str> {
    let mut sources = Vec::new();
    if let Some(background) = &options.background {
        sources.extend(background.declared_paths());
    }
    if let Some(content) = &options.content {
        sources.extend(content.declared_paths());
    }
    sources
}

fn is_valid_version(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    (1..=4).contains(&parts.len())
        && parts.iter().all(|part| {
            !part.is_empty()
                && part.chars().all(|c| c.is_ascii_digit())
                && (part.len() == 1 || !part.starts_with('0'))
                && part.parse::<u32>().is_ok_and(|n| n <= 65535)
        })
}
