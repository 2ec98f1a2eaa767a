//! Plugin entry point: options in, build graph and manifest out.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crx_config::{ExtensionOptions, Mode};

use crate::config::{BuildConfig, build_background_config, build_content_configs};
use crate::entry::{EntryMap, resolve_background_entries, resolve_content_entries};
use crate::error::{Error, Result};
use crate::html::render_background_html;
use crate::manifest::build_manifest;
use crate::plugins::{PluginRegistry, SharedPlugin};
use crate::reload::ReloadCoordinator;

/// Everything the host bundler and the CLI need for one invocation.
#[derive(Debug)]
pub struct Generated {
    /// Content builds in entry order, then the background build.
    pub builds: Vec<BuildConfig>,
    pub background_entries: EntryMap,
    pub content_entries: EntryMap,
    pub manifest: Value,
    pub background_html: String,
    pub out_dir: PathBuf,
    pub coordinator: ReloadCoordinator,
}

impl Generated {
    pub fn manifest_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.manifest).map_err(|source| Error::Serialize {
            what: "manifest",
            source,
        })
    }

    pub fn builds_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.builds).map_err(|source| Error::Serialize {
            what: "build graph",
            source,
        })
    }

    /// The background build, when there are background entries.
    pub fn background_build(&self) -> Option<&BuildConfig> {
        if self.background_entries.is_empty() {
            return None;
        }
        self.builds.last()
    }
}

/// Turn `options` into a build graph, a manifest and the background page.
///
/// `plugins` are the user's plugins. Each build gets its own copy of the list,
/// plus the reload plugin in development mode. The background build is
/// omitted when there are no background entries.
pub fn generate(
    options: &ExtensionOptions,
    plugins: Vec<SharedPlugin>,
    mode: Mode,
) -> Result<Generated> {
    let background_entries = options
        .background
        .as_ref()
        .map(resolve_background_entries)
        .unwrap_or_default();
    let content_entries = options
        .content
        .as_ref()
        .map(resolve_content_entries)
        .unwrap_or_default();

    let manifest = build_manifest(options)?;
    let background_html = render_background_html(&background_entries);
    let out_dir = options.resolved_out_dir();
    let coordinator = ReloadCoordinator::new(mode, options);

    let mut background_plugins: PluginRegistry = plugins.iter().map(Arc::clone).collect();
    let mut content_plugins: PluginRegistry = plugins.iter().map(Arc::clone).collect();

    let reload = background_entries
        .first()
        .and_then(|(_, entry)| coordinator.injection(options.resolve_source(entry)));
    if let Some(injection) = &reload {
        if let Some(plugin) = coordinator.background_plugin(injection.clone()) {
            background_plugins.add_shared(plugin);
        }
    }
    if let Some(plugin) = coordinator.content_plugin() {
        content_plugins.add_shared(plugin);
    }

    let background_plugins = background_plugins.into_plugins();
    let content_plugins = content_plugins.into_plugins();

    let mut builds = build_content_configs(&content_entries, &content_plugins, &out_dir);
    if !background_entries.is_empty() {
        let mut background = build_background_config(
            &background_entries,
            &background_plugins,
            &out_dir,
        );
        background.reload = reload;
        builds.push(background);
    }

    info!(
        %mode,
        background = background_entries.len(),
        content = content_entries.len(),
        builds = builds.len(),
        out_dir = %out_dir.display(),
        "build graph generated"
    );

    Ok(Generated {
        builds,
        background_entries,
        content_entries,
        manifest,
        background_html,
        out_dir,
        coordinator,
    })
}
