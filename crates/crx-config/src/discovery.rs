//! File-based config discovery for CLI use
//!
//! Finds the project's crx configuration and layers it with environment
//! variables and command-line overrides.
//! Priority: overrides > environment > config file > defaults

use std::fs;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::options::ExtensionOptions;

const TOML_CONFIG: &str = "crx.toml";
const JSON_CONFIG: &str = "crx.config.json";
const PACKAGE_JSON: &str = "package.json";
const PACKAGE_FIELD: &str = "crx";

/// Environment keys read with the `CRX_` prefix.
const ENV_KEYS: &[&str] = &["name", "version", "host", "port", "manifest_version"];

/// Values supplied on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(rename = "outDir", skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use crx_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let options = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. crx.toml
    /// 2. crx.config.json
    /// 3. package.json (crx field)
    pub fn find(&self) -> Option<PathBuf> {
        for name in [TOML_CONFIG, JSON_CONFIG] {
            let path = self.root.join(name);
            if path.exists() {
                return Some(path);
            }
        }

        let pkg_path = self.root.join(PACKAGE_JSON);
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed
                        .get(PACKAGE_FIELD)
                        .is_some_and(|field| !field.is_null())
                    {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load config from the discovered file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<ExtensionOptions> {
        self.load_with(None, &ConfigOverrides::default())
    }

    /// Load config from `explicit` (or the discovered file) and apply overrides.
    pub fn load_with(
        &self,
        explicit: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<ExtensionOptions> {
        let path = match explicit {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.root.join(path),
            None => self
                .find()
                .ok_or_else(|| ConfigError::NotFound(self.root.clone()))?,
        };

        tracing::debug!(config = %path.display(), "loading extension config");

        let mut figment =
            Figment::new().merge(Serialized::defaults(ExtensionOptions::default()));
        figment = self.merge_file(figment, &path)?;
        figment = figment.merge(Env::prefixed("CRX_").only(ENV_KEYS));
        if let Ok(out_dir) = std::env::var("CRX_OUT_DIR") {
            figment = figment.merge(Serialized::default("outDir", out_dir));
        }
        figment = figment.merge(Serialized::defaults(overrides));

        let options: ExtensionOptions = figment.extract()?;
        Ok(options.with_root(&self.root))
    }

    fn merge_file(&self, figment: Figment, path: &Path) -> Result<Figment> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let file_name = path.file_name().and_then(|name| name.to_str());
        let extension = path.extension().and_then(|ext| ext.to_str());

        match (file_name, extension) {
            (Some(PACKAGE_JSON), _) => {
                let field = self.read_package_field(path)?;
                Ok(figment.merge(Serialized::defaults(field)))
            }
            (_, Some("toml")) => Ok(figment.merge(Toml::file(path))),
            (_, Some("json")) => Ok(figment.merge(Json::file(path))),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn read_package_field(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;
        let mut parsed: Value =
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        match parsed.get_mut(PACKAGE_FIELD).map(Value::take) {
            Some(Value::Null) | None => Err(ConfigError::InvalidValue {
                field: PACKAGE_FIELD.to_string(),
                message: "add a `crx` object to package.json".to_string(),
            }),
            Some(field) => Ok(field),
        }
    }
}
