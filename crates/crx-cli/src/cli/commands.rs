use clap::{Args, Subcommand};
use std::path::PathBuf;

use crx_config::{ConfigOverrides, Mode};

/// Available crx subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write manifest.json, background.html and crx.builds.json
    Build(BuildArgs),

    /// Build, then serve the reload channel and watch the output directory
    ///
    /// Every change the host bundler writes to the output directory pushes an
    /// `update` message, and the extension reloads itself.
    Dev(DevArgs),

    /// Validate the config and check that every entry file exists
    Check(CheckArgs),
}

/// Where to find the project and its config
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Config file, relative to the project root
    ///
    /// Defaults to crx.toml, then crx.config.json, then the `crx` field of
    /// package.json.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the build command
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output directory (overrides `outDir`)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Build mode: development or production
    ///
    /// Defaults to CRX_MODE, then NODE_ENV. Anything but `production` is a
    /// development build.
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<Mode>,
}

impl BuildArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            out_dir: self.out_dir.clone(),
            ..ConfigOverrides::default()
        }
    }
}

/// Arguments for the dev command
#[derive(Args, Debug, Clone)]
pub struct DevArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output directory (overrides `outDir`)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Host the reload server binds to (overrides `host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port of the reload server (overrides `port`)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl DevArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            out_dir: self.out_dir.clone(),
            host: self.host.clone(),
            port: self.port,
        }
    }
}

/// Arguments for the check command
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}
