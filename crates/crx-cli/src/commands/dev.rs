//! Dev command implementation.
//!
//! Orchestrates the reload lifecycle:
//! - Initial artifact write
//! - WebSocket reload server
//! - Output directory watching
//! - Graceful shutdown on Ctrl+C

use std::path::Path;

use crx_bundler::{Generated, generate};
use crx_config::Mode;
use tokio::signal;
use tokio::sync::oneshot;

use crate::cli::DevArgs;
use crate::commands::utils;
use crate::dev::{OutputWatcher, ReloadServer};
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the dev command.
///
/// # Process Flow
///
/// 1. Load config and generate the development build graph
/// 2. Write manifest, background page and build graph
/// 3. Start the reload server
/// 4. Watch the output directory; each change is a finished build
/// 5. Stop on Ctrl+C
pub async fn execute(args: DevArgs) -> Result<()> {
    let options = utils::load_options(&args.project, &args.overrides())?;
    let generated = generate(&options, Vec::new(), Mode::Development)?;

    for path in utils::write_artifacts(&generated).await? {
        ui::success(&format!(
            "Wrote {}",
            ui::relative_display(&path, &options.root)
        ));
    }

    let channel = generated
        .coordinator
        .channel()
        .cloned()
        .ok_or_else(|| CliError::Custom("reload channel is not active".to_string()))?;

    let server = ReloadServer::bind(&options.host, options.port, channel).await?;
    ui::success(&format!("Reload server listening on {}", server.url()));
    match generated.background_build().and_then(|build| build.reload.as_ref()) {
        Some(reload) => ui::info(&format!(
            "Reload client goes into {} (see {})",
            ui::relative_display(Path::new(&reload.entry), &options.root),
            utils::BUILDS_FILE
        )),
        None => ui::warning("No background entry; nothing will receive the reload client"),
    }

    let (watcher, mut changes) =
        OutputWatcher::new(generated.out_dir.clone(), utils::GENERATED_FILES)?;
    ui::info(&format!(
        "Watching {} for bundler output",
        ui::relative_display(watcher.root(), &options.root)
    ));

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let mut server_handle = tokio::spawn(server.serve(async move {
        let _ = shutdown_rx.await;
    }));
    let mut server_finished = false;

    ui::info("Press Ctrl+C to stop");

    loop {
        tokio::select! {
            Some(path) = changes.recv() => {
                tracing::debug!(path = %path.display(), "output changed");
                notify_build_end(&generated).await;
            }

            _ = signal::ctrl_c() => {
                ui::info("Shutting down reload server...");
                break;
            }

            result = &mut server_handle => {
                server_finished = true;
                match result {
                    Ok(Err(e)) => ui::error(&e.to_string()),
                    Err(e) => ui::error(&format!("Server task failed: {}", e)),
                    Ok(Ok(())) => ui::warning("Reload server stopped unexpectedly"),
                }
                break;
            }
        }
    }

    generated.coordinator.shutdown();
    let _ = shutdown_tx.send(());
    if !server_finished {
        match server_handle.await {
            Ok(result) => result?,
            Err(e) => return Err(CliError::Server(e.to_string())),
        }
    }

    ui::success("Reload server stopped");
    Ok(())
}

/// Run every build's `build_end` hook. Reload plugins coalesce the calls.
async fn notify_build_end(generated: &Generated) {
    for build in &generated.builds {
        if let Err(e) = build.build_end().await {
            ui::error(&format!("build end hook failed: {}", e));
        }
    }
}
