//! Logging setup for the crx CLI.
//!
//! # Example
//!
//! ```rust,no_run
//! use crx_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("generating build graph");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "crx=debug,crx_cli=debug,crx_bundler=debug,crx_config=debug";
const QUIET_FILTER: &str = "crx=error,crx_cli=error,crx_bundler=error,crx_config=error";
const DEFAULT_FILTER: &str = "crx=info,crx_cli=info,crx_bundler=info,crx_config=warn";

/// Pick the log filter for the given flags.
///
/// The level is determined in this order:
/// 1. `--verbose`: debug for crx crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info for crx crates
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}
