//! Top-level extension options.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dev::ReloadOptions;
use crate::entries::{BackgroundSpec, ContentSpec};
use crate::error::ConfigError;
use crate::helpers::{
    default_host, default_manifest_version, default_name, default_out_dir_name, default_port,
    default_version,
};

/// Keys that configure the build itself and never reach `manifest.json`.
pub const RESERVED_KEYS: &[&str] = &[
    "host",
    "port",
    "root",
    "background",
    "content",
    "outDir",
    "out_dir",
    "plugins",
    "reload",
];

/// Everything the user declares about their extension.
///
/// Unknown keys are collected into [`ExtensionOptions::extra`] and copied into
/// the manifest untouched, so `permissions`, `icons`, `description` and friends
/// need no dedicated fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionOptions {
    /// Extension name
    #[serde(default = "default_name")]
    pub name: String,

    /// Extension version
    #[serde(default = "default_version")]
    pub version: String,

    /// Host the dev reload server binds to and the client connects to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port of the dev reload server
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_manifest_version")]
    pub manifest_version: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentSpec>,

    /// Output directory; `<root>/dist` when unset
    #[serde(default, rename = "outDir", skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,

    #[serde(default)]
    pub reload: ReloadOptions,

    /// Project root. Set by the loader, never read from a file.
    #[serde(skip)]
    pub root: PathBuf,

    /// Passthrough manifest keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExtensionOptions {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use crx_config::ExtensionOptions;
    /// use serde_json::json;
    ///
    /// let options = ExtensionOptions::from_value(json!({
    ///     "name": "demo",
    ///     "background": ["background/index.ts"],
    ///     "permissions": ["tabs"]
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(options.name, "demo");
    /// assert_eq!(options.port, 3060);
    /// assert_eq!(options.extra["permissions"], json!(["tabs"]));
    /// ```
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            message: e.to_string(),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value, ConfigError> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            message: e.to_string(),
        })
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_background(mut self, background: BackgroundSpec) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_content(mut self, content: ContentSpec) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(out_dir.into());
        self
    }

    /// The directory build outputs land in.
    ///
    /// A relative `outDir` is taken relative to the project root.
    pub fn resolved_out_dir(&self) -> PathBuf {
        match &self.out_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.root.join(dir),
            None => self.root.join(default_out_dir_name()),
        }
    }

    /// Resolve a declared source path against the project root.
    pub fn resolve_source(&self, source: &str) -> PathBuf {
        let path = Path::new(source);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Passthrough keys with everything in [`RESERVED_KEYS`] removed.
    pub fn manifest_passthrough(&self) -> Map<String, Value> {
        self.extra
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl Default for ExtensionOptions {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            host: default_host(),
            port: default_port(),
            manifest_version: default_manifest_version(),
            background: None,
            content: None,
            out_dir: None,
            reload: ReloadOptions::default(),
            root: PathBuf::new(),
            extra: Map::new(),
        }
    }
}
