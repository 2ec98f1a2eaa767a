//! crx CLI entry point.
//!
//! Parses arguments, initializes logging, and dispatches to the command.

use clap::Parser;
use crx_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args).await,
        cli::Command::Dev(dev_args) => commands::dev_execute(dev_args).await,
        cli::Command::Check(check_args) => commands::check_execute(check_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
