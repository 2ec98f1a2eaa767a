//! Background and content-script entry declarations.
//!
//! Both options accept several mutually exclusive shapes. They are modelled as
//! untagged enums so a config file can use whichever shape reads best, and each
//! ends in an `Unrecognized` variant: a shape we don't understand still loads,
//! it just resolves to no entries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Background script sources.
///
/// ```
/// use crx_config::BackgroundSpec;
/// use serde_json::json;
///
/// let spec: BackgroundSpec = serde_json::from_value(json!(["bg/index.ts", "bg/a.ts"])).unwrap();
/// assert_eq!(spec.declared_paths(), vec!["bg/index.ts", "bg/a.ts"]);
///
/// let spec: BackgroundSpec = serde_json::from_value(json!({ "scripts": ["main.ts"] })).unwrap();
/// assert_eq!(spec.declared_paths(), vec!["main.ts"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackgroundSpec {
    /// A single script.
    Path(String),

    /// Several scripts, loaded in order.
    Paths(Vec<String>),

    /// `{ "page": ... }` wrapping another background declaration.
    Page { page: Box<BackgroundSpec> },

    /// `{ "scripts": [...] }`, the manifest v2 spelling.
    Scripts { scripts: Vec<String> },

    /// Anything else. Kept so loading never fails on shape alone.
    Unrecognized(Value),
}

impl BackgroundSpec {
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    pub fn paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Paths(paths.into_iter().map(Into::into).collect())
    }

    /// Every source path, in declaration order.
    pub fn declared_paths(&self) -> Vec<&str> {
        match self {
            Self::Path(path) => vec![path.as_str()],
            Self::Paths(paths) | Self::Scripts { scripts: paths } => {
                paths.iter().map(String::as_str).collect()
            }
            Self::Page { page } => page.declared_paths(),
            Self::Unrecognized(_) => Vec::new(),
        }
    }
}

/// Content script sources.
///
/// ```
/// use crx_config::ContentSpec;
/// use serde_json::json;
///
/// let spec: ContentSpec = serde_json::from_value(json!([
///     { "matches": ["https://*.example.com/*"], "js": ["content/index.ts"], "run_at": "document_end" }
/// ]))
/// .unwrap();
///
/// let ContentSpec::Groups(groups) = &spec else { panic!("expected groups") };
/// assert_eq!(groups[0].extra["run_at"], "document_end");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentSpec {
    /// A single script injected into every page.
    Path(String),

    /// Several scripts injected into every page.
    Paths(Vec<String>),

    /// Injection groups, each with its own URL match patterns.
    Groups(Vec<ContentScriptGroup>),

    /// Anything else. Resolves to no content scripts.
    Unrecognized(Value),
}

impl ContentSpec {
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    pub fn paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Paths(paths.into_iter().map(Into::into).collect())
    }

    /// Every script path, groups flattened in order. Groups without `js` contribute nothing.
    pub fn declared_paths(&self) -> Vec<&str> {
        match self {
            Self::Path(path) => vec![path.as_str()],
            Self::Paths(paths) => paths.iter().map(String::as_str).collect(),
            Self::Groups(groups) => groups
                .iter()
                .filter_map(|group| group.js.as_deref())
                .flatten()
                .map(String::as_str)
                .collect(),
            Self::Unrecognized(_) => Vec::new(),
        }
    }
}

/// One `content_scripts` entry as the user declares it.
///
/// Keys other than `matches` and `js` (`css`, `run_at`, `all_frames`, ...) are
/// kept verbatim and copied into the generated manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentScriptGroup {
    pub matches: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentScriptGroup {
    pub fn new<M, J, S, T>(matches: M, js: J) -> Self
    where
        M: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            matches: matches.into_iter().map(Into::into).collect(),
            js: Some(js.into_iter().map(Into::into).collect()),
            extra: Map::new(),
        }
    }
}
