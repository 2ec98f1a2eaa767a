//! Check command implementation.
//!
//! Validates the configuration and entry files without writing anything.

use crx_bundler::{resolve_background_entries, resolve_content_entries};
use crx_config::{ConfigOverrides, ConfigValidator, FsValidator};

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load the config (syntax and field types)
/// 2. Schema checks: name, version, manifest_version, port, entry shapes
/// 3. Every declared entry file exists under the project root
pub async fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking configuration...");

    let options = utils::load_options(&args.project, &ConfigOverrides::default())?;

    if let Err(err) = FsValidator::new(&options.root).validate(&options) {
        ui::error(&err.to_string());
        return Err(err.into());
    }

    let background = options
        .background
        .as_ref()
        .map(resolve_background_entries)
        .unwrap_or_default();
    let content = options
        .content
        .as_ref()
        .map(resolve_content_entries)
        .unwrap_or_default();

    for (name, path) in background.iter().chain(content.iter()) {
        ui::success(&format!("  {} <- {}", name, path));
    }

    if options.manifest_version >= 3 {
        ui::warning("manifest_version 3 does not support background pages");
    }

    ui::success("Configuration is valid!");
    Ok(())
}
