//! Build command implementation.

use std::time::Instant;

use crx_bundler::generate;
use crx_config::Mode;

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the build command.
///
/// Loads the config, generates the build graph, and writes `manifest.json`,
/// `background.html` and `crx.builds.json` to the output directory.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start = Instant::now();

    let options = utils::load_options(&args.project, &args.overrides())?;
    let mode = args.mode.unwrap_or_else(Mode::from_env);
    ui::info(&format!("Generating {} build for {}", mode, options.name));

    let generated = generate(&options, Vec::new(), mode)?;
    if generated.builds.is_empty() {
        ui::warning("No background or content entries resolved; nothing for the bundler to build");
    }

    for path in utils::write_artifacts(&generated).await? {
        ui::success(&format!(
            "Wrote {}",
            ui::relative_display(&path, &options.root)
        ));
    }

    ui::success(&format!(
        "{} build configuration(s) generated in {}",
        generated.builds.len(),
        ui::format_duration(start.elapsed())
    ));
    Ok(())
}
