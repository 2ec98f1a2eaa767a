//! Build-graph generation for browser extensions.
//!
//! Takes a declarative [`ExtensionOptions`](crx_config::ExtensionOptions) and
//! produces everything a host bundler needs: named entries, one build
//! configuration per target, `manifest.json`, the background page, and in
//! development mode a live-reload channel with its client snippet.
//!
//! ```
//! use crx_bundler::generate;
//! use crx_config::{BackgroundSpec, ContentSpec, ExtensionOptions, Mode};
//!
//! let options = ExtensionOptions::default()
//!     .with_background(BackgroundSpec::paths(["bg/index.ts"]))
//!     .with_content(ContentSpec::path("content/main.ts"));
//!
//! let generated = generate(&options, Vec::new(), Mode::Production).unwrap();
//! assert_eq!(generated.builds.len(), 2);
//! assert_eq!(generated.manifest["background"]["page"], "background.html");
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod generate;
pub mod html;
pub mod manifest;
pub mod path;
pub mod plugins;
pub mod reload;

pub use config::{
    BuildConfig, FILE_NAME_PATTERN, OutputConfig, OutputFormat, build_background_config,
    build_content_configs, output_file_name,
};
pub use entry::{
    DEFAULT_BACKGROUND_NAME, DEFAULT_CONTENT_NAME, EntryMap, derive_entry_name,
    resolve_background_entries, resolve_content_entries,
};
pub use error::{Error, Result};
pub use generate::{Generated, generate};
pub use html::render_background_html;
pub use manifest::{
    ALL_URLS, BACKGROUND_PAGE, BackgroundManifest, ContentScriptManifest, ManifestFragment,
    build_manifest, build_manifest_fragment,
};
pub use path::{normalize_path, slash};
pub use plugins::{CrxPlugin, PluginPhase, PluginRegistry, SharedPlugin};
pub use reload::{
    ReloadChannel, ReloadCoordinator, ReloadInjection, ReloadMessage, ReloadPlugin,
    UpdateScheduler, reload_client_snippet,
};
