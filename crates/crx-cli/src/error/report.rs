//! Miette reports for CLI errors.

use miette::Report;

use crate::error::CliError;
use crx_config::ConfigError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::Server(msg) => miette::miette!(
            help = "Pick another port with --port or CRX_PORT",
            "Reload server error: {}",
            msg
        ),
        _ => miette::miette!("{}", err),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::SchemaValidation {
            message,
            hint: Some(hint),
        } => miette::miette!(help = hint, "Invalid configuration: {}", message),
        ConfigError::NotFound(root) => miette::miette!(
            help = "Create crx.toml, crx.config.json, or add a `crx` field to package.json",
            "No crx config found in {}",
            root.display()
        ),
        ConfigError::NoEntries => miette::miette!(
            help = "Declare `background` and/or `content` scripts",
            "{}",
            ConfigError::NoEntries
        ),
        ConfigError::EntryNotFound(path) => miette::miette!(
            help = "Paths are resolved relative to the project root",
            "Entry file not found: {}",
            path.display()
        ),
        other => miette::miette!("Configuration error: {}", other),
    }
}
