//! Build graph: one bundler configuration per target.
//!
//! Background entries share a single ESM build so the background page can load
//! them as modules. Every content entry gets its own CommonJS build, since
//! content scripts cannot import one another.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::entry::EntryMap;
use crate::error::Result;
use crate::plugins::SharedPlugin;
use crate::reload::ReloadInjection;

/// Output naming pattern for entries, chunks and assets alike.
pub const FILE_NAME_PATTERN: &str = "[name].js";

/// The file an entry named `name` is written to.
pub fn output_file_name(name: &str) -> String {
    FILE_NAME_PATTERN.replace("[name]", name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Esm,
    Cjs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub format: OutputFormat,
    pub entry_file_names: String,
    pub chunk_file_names: String,
    pub asset_file_names: String,
}

impl OutputConfig {
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
            entry_file_names: FILE_NAME_PATTERN.to_string(),
            chunk_file_names: FILE_NAME_PATTERN.to_string(),
            asset_file_names: FILE_NAME_PATTERN.to_string(),
        }
    }
}

/// A complete configuration for one host-bundler invocation.
///
/// Serializes with plugins listed by name. A development background build
/// also carries its `reload` injection, since the plugin itself does not
/// survive serialization.
#[derive(Clone, Serialize)]
pub struct BuildConfig {
    pub input: EntryMap,
    pub output: OutputConfig,
    #[serde(serialize_with = "serialize_plugin_names")]
    pub plugins: Vec<SharedPlugin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reload: Option<ReloadInjection>,
}

impl BuildConfig {
    pub fn plugin_names(&self) -> Vec<String> {
        self.plugins
            .iter()
            .map(|plugin| plugin.name().into_owned())
            .collect()
    }

    /// Files this build writes, in entry order.
    pub fn output_files(&self) -> Vec<String> {
        self.input.names().map(output_file_name).collect()
    }

    /// Run `code` through every plugin's transform hook in order.
    pub async fn transform(&self, code: &str, id: &str) -> Result<String> {
        let mut current = code.to_string();
        for plugin in &self.plugins {
            if let Some(next) = plugin.transform(&current, id).await? {
                current = next;
            }
        }
        Ok(current)
    }

    /// Signal every plugin that this build has finished.
    pub async fn build_end(&self) -> Result<()> {
        for plugin in &self.plugins {
            plugin.build_end().await?;
        }
        Ok(())
    }
}

impl fmt::Debug for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildConfig")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("plugins", &self.plugin_names())
            .field("reload", &self.reload)
            .finish()
    }
}

fn serialize_plugin_names<S: Serializer>(
    plugins: &[SharedPlugin],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(plugins.iter().map(|plugin| plugin.name()))
}

/// One ESM build covering every background entry.
pub fn build_background_config(
    entries: &EntryMap,
    plugins: &[SharedPlugin],
    out_dir: impl AsRef<Path>,
) -> BuildConfig {
    debug!(entries = entries.len(), "background build configured");
    BuildConfig {
        input: entries.clone(),
        output: OutputConfig::new(out_dir.as_ref(), OutputFormat::Esm),
        plugins: plugins.to_vec(),
        reload: None,
    }
}

/// One CommonJS build per content entry, in entry order.
pub fn build_content_configs(
    entries: &EntryMap,
    plugins: &[SharedPlugin],
    out_dir: impl AsRef<Path>,
) -> Vec<BuildConfig> {
    debug!(entries = entries.len(), "content builds configured");
    entries
        .iter()
        .map(|(name, path)| BuildConfig {
            input: EntryMap::single(name, path),
            output: OutputConfig::new(out_dir.as_ref(), OutputFormat::Cjs),
            plugins: plugins.to_vec(),
            reload: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::CrxPlugin;
    use async_trait::async_trait;
    use serde_json::json;
    use std::borrow::Cow;
    use std::sync::Arc;

    struct Banner;

    #[async_trait]
    impl CrxPlugin for Banner {
        fn name(&self) -> Cow<'static, str> {
            Cow::Borrowed("banner")
        }

        async fn transform(&self, code: &str, _id: &str) -> Result<Option<String>> {
            Ok(Some(format!("/* banner */\n{code}")))
        }
    }

    fn entries() -> EntryMap {
        let mut entries = EntryMap::new();
        entries.insert_or_overwrite("c", "c/index.ts");
        entries.insert_or_overwrite("helper", "c/helper.ts");
        entries
    }

    #[test]
    fn background_is_one_esm_build() {
        let config = build_background_config(&entries(), &[], "/out");
        assert_eq!(config.output.format, OutputFormat::Esm);
        assert_eq!(config.input, entries());
        assert_eq!(config.output_files(), ["c.js", "helper.js"]);
    }

    #[test]
    fn content_gets_one_cjs_build_per_entry() {
        let configs = build_content_configs(&entries(), &[], "/out");
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].input, EntryMap::single("c", "c/index.ts"));
        assert_eq!(configs[1].input, EntryMap::single("helper", "c/helper.ts"));
        assert!(
            configs
                .iter()
                .all(|config| config.output.format == OutputFormat::Cjs)
        );
    }

    #[test]
    fn serializes_with_plugin_names() {
        let plugins: Vec<SharedPlugin> = vec![Arc::new(Banner)];
        let config = build_background_config(&EntryMap::single("bg", "bg.ts"), &plugins, "dist");
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "input": { "bg": "bg.ts" },
                "output": {
                    "dir": "dist",
                    "format": "esm",
                    "entryFileNames": "[name].js",
                    "chunkFileNames": "[name].js",
                    "assetFileNames": "[name].js"
                },
                "plugins": ["banner"]
            })
        );
    }

    #[test]
    fn reload_injection_is_serialized_when_present() {
        let mut config = build_background_config(&EntryMap::single("bg", "bg.ts"), &[], "dist");
        config.reload = Some(ReloadInjection::new("/ext/bg.ts", "/*client*/"));

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value["reload"],
            json!({ "entry": "/ext/bg.ts", "snippet": "/*client*/" })
        );
    }

    #[tokio::test]
    async fn transform_runs_plugins_in_order() {
        let plugins: Vec<SharedPlugin> = vec![Arc::new(Banner), Arc::new(Banner)];
        let config = build_background_config(&EntryMap::single("bg", "bg.ts"), &plugins, "dist");
        let code = config.transform("run();", "bg.ts").await.unwrap();
        assert_eq!(code, "/* banner */\n/* banner */\nrun();");
    }
}
