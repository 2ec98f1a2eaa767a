//! Command-line interface definition.
//!
//! - `crx build` - write the manifest, background page and build graph
//! - `crx dev` - same, then serve the reload channel until Ctrl+C
//! - `crx check` - validate the config and entry files

mod commands;

use clap::Parser;

pub use commands::{BuildArgs, CheckArgs, Command, DevArgs, ProjectArgs};

/// crx - browser-extension builds from one config file
#[derive(Parser, Debug)]
#[command(
    name = "crx",
    version,
    about = "Generate manifest.json, the background page and bundler configs for a browser extension",
    long_about = "crx reads crx.toml (or crx.config.json, or the `crx` field of package.json),\n\
                  resolves background and content-script entries, and writes manifest.json,\n\
                  background.html and crx.builds.json. `crx dev` also serves a WebSocket\n\
                  channel that reloads the extension after every rebuild."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
