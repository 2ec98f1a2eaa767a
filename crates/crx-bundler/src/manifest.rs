//! Manifest generation.
//!
//! The fragment covers the `background` and `content_scripts` keys. Every
//! script name in it matches an output file produced by the build graph.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crx_config::{BackgroundSpec, ContentSpec, ExtensionOptions};

use crate::config::output_file_name;
use crate::entry::{DEFAULT_CONTENT_NAME, derive_entry_name};
use crate::error::{Error, Result};

/// File name of the generated background page.
pub const BACKGROUND_PAGE: &str = "background.html";

/// Match pattern for content scripts declared without explicit `matches`.
pub const ALL_URLS: &str = "<all_urls>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundManifest {
    pub page: String,
}

impl Default for BackgroundManifest {
    fn default() -> Self {
        Self {
            page: BACKGROUND_PAGE.to_string(),
        }
    }
}

/// One entry of the manifest's `content_scripts` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentScriptManifest {
    pub matches: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub js: Vec<String>,

    /// Extra keys copied from the declaring group
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestFragment {
    pub background: BackgroundManifest,
    pub content_scripts: Vec<ContentScriptManifest>,
}

/// Build the `background` and `content_scripts` manifest keys.
///
/// Background scripts always load through the generated page, whatever shape
/// they were declared in.
pub fn build_manifest_fragment(
    background: Option<&BackgroundSpec>,
    content: Option<&ContentSpec>,
) -> ManifestFragment {
    debug!(
        scripts = background.map_or(0, |spec| spec.declared_paths().len()),
        "background scripts load through {BACKGROUND_PAGE}"
    );

    ManifestFragment {
        background: BackgroundManifest::default(),
        content_scripts: content.map(content_scripts).unwrap_or_default(),
    }
}

fn content_scripts(spec: &ContentSpec) -> Vec<ContentScriptManifest> {
    match spec {
        ContentSpec::Path(_) => vec![ContentScriptManifest {
            matches: vec![ALL_URLS.to_string()],
            js: vec![output_file_name(DEFAULT_CONTENT_NAME)],
            extra: Map::new(),
        }],
        ContentSpec::Paths(paths) => vec![ContentScriptManifest {
            matches: vec![ALL_URLS.to_string()],
            js: script_files(paths),
            extra: Map::new(),
        }],
        ContentSpec::Groups(groups) => groups
            .iter()
            .map(|group| ContentScriptManifest {
                matches: group.matches.clone(),
                js: group.js.as_deref().map(script_files).unwrap_or_default(),
                extra: group.extra.clone(),
            })
            .collect(),
        ContentSpec::Unrecognized(_) => Vec::new(),
    }
}

/// Output file names for `paths`, first occurrence of each name kept.
fn script_files(paths: &[String]) -> Vec<String> {
    let mut files: Vec<String> = Vec::with_capacity(paths.len());
    for path in paths {
        let file = output_file_name(&derive_entry_name(path, DEFAULT_CONTENT_NAME));
        if !files.contains(&file) {
            files.push(file);
        }
    }
    files
}

/// Assemble the complete `manifest.json` document.
///
/// Identity keys come first, then passthrough keys from the config, then the
/// generated fragment, which wins over any passthrough of the same name.
pub fn build_manifest(options: &ExtensionOptions) -> Result<Value> {
    let fragment =
        build_manifest_fragment(options.background.as_ref(), options.content.as_ref());

    if options.manifest_version >= 3 {
        warn!(
            manifest_version = options.manifest_version,
            "background pages are a manifest v2 feature; the generated manifest still declares one"
        );
    }

    let mut manifest = Map::new();
    manifest.insert("name".into(), Value::String(options.name.clone()));
    manifest.insert("version".into(), Value::String(options.version.clone()));
    manifest.insert(
        "manifest_version".into(),
        Value::from(options.manifest_version),
    );
    manifest.extend(options.manifest_passthrough());

    manifest.insert("background".into(), to_value(&fragment.background)?);
    manifest.insert(
        "content_scripts".into(),
        to_value(&fragment.content_scripts)?,
    );

    Ok(Value::Object(manifest))
}

fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|source| Error::Serialize {
        what: "manifest",
        source,
    })
}
