//! Entry resolution: user declarations to named bundler inputs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crx_config::{BackgroundSpec, ContentSpec};

use crate::path::normalize_path;

/// Name used for a background entry whose name cannot be derived.
pub const DEFAULT_BACKGROUND_NAME: &str = "background";
/// Name used for a content entry whose name cannot be derived.
pub const DEFAULT_CONTENT_NAME: &str = "content";

/// Ordered mapping from entry name to normalized source path.
///
/// Names are unique. Inserting an existing name replaces its path but keeps
/// the slot where the name first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryMap {
    entries: IndexMap<String, String>,
}

impl EntryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a single name to a single path.
    pub fn single(name: impl Into<String>, path: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert_or_overwrite(name, path);
        map
    }

    /// Insert `path` under `name`, replacing and returning any earlier path.
    ///
    /// ```
    /// use crx_bundler::EntryMap;
    ///
    /// let mut entries = EntryMap::new();
    /// entries.insert_or_overwrite("a", "x/a.ts");
    /// entries.insert_or_overwrite("b", "b.ts");
    /// let previous = entries.insert_or_overwrite("a", "y/a.ts");
    ///
    /// assert_eq!(previous.as_deref(), Some("x/a.ts"));
    /// assert_eq!(entries.names().collect::<Vec<_>>(), ["a", "b"]);
    /// assert_eq!(entries.get("a"), Some("y/a.ts"));
    /// ```
    pub fn insert_or_overwrite(
        &mut self,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(name.into(), path.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry in the first slot.
    pub fn first(&self) -> Option<(&str, &str)> {
        self.entries
            .first()
            .map(|(name, path)| (name.as_str(), path.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_str()))
    }
}

impl<'a> IntoIterator for &'a EntryMap {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Derive an entry name from a source path.
///
/// The name is the file stem, except that `index` files take the name of
/// their parent directory. `default` is used when neither yields a name.
///
/// ```
/// use crx_bundler::derive_entry_name;
///
/// assert_eq!(derive_entry_name("src/popup.ts", "content"), "popup");
/// assert_eq!(derive_entry_name("background/index.ts", "content"), "background");
/// assert_eq!(derive_entry_name("index.ts", "content"), "content");
/// ```
pub fn derive_entry_name(path: &str, default: &str) -> String {
    let normalized = normalize_path(path);
    let trimmed = match normalized.trim_end_matches('/') {
        "" => normalized.as_str(),
        trimmed => trimmed,
    };

    let (dir, base) = match trimmed.rsplit_once('/') {
        Some((dir, base)) => (dir, base),
        None => ("", trimmed),
    };

    let stem = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };

    let name = if stem == "index" {
        dir.rsplit('/').next().unwrap_or_default()
    } else {
        stem
    };

    match name {
        "" | "." | ".." | "/" => default.to_string(),
        name => name.to_string(),
    }
}

/// Resolve background declarations into named entries.
///
/// A bare path is always named `background`; lists derive a name per path.
/// An unrecognized shape resolves to no entries.
pub fn resolve_background_entries(spec: &BackgroundSpec) -> EntryMap {
    match spec {
        BackgroundSpec::Path(path) => {
            EntryMap::single(DEFAULT_BACKGROUND_NAME, normalize_path(path))
        }
        BackgroundSpec::Paths(paths) | BackgroundSpec::Scripts { scripts: paths } => {
            resolve_sequence(paths, DEFAULT_BACKGROUND_NAME)
        }
        BackgroundSpec::Page { page } => resolve_background_entries(page),
        BackgroundSpec::Unrecognized(value) => {
            warn!(%value, "unrecognized `background` declaration; no background entries");
            EntryMap::new()
        }
    }
}

/// Resolve content-script declarations into named entries.
///
/// Groups are flattened in order; groups without `js` contribute nothing.
pub fn resolve_content_entries(spec: &ContentSpec) -> EntryMap {
    match spec {
        ContentSpec::Path(path) => EntryMap::single(DEFAULT_CONTENT_NAME, normalize_path(path)),
        ContentSpec::Paths(paths) => resolve_sequence(paths, DEFAULT_CONTENT_NAME),
        ContentSpec::Groups(_) => resolve_sequence(spec.declared_paths(), DEFAULT_CONTENT_NAME),
        ContentSpec::Unrecognized(value) => {
            warn!(%value, "unrecognized `content` declaration; no content entries");
            EntryMap::new()
        }
    }
}

fn resolve_sequence<I, S>(paths: I, default: &str) -> EntryMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut entries = EntryMap::new();
    for path in paths {
        let path = path.as_ref();
        let name = derive_entry_name(path, default);
        let normalized = normalize_path(path);
        if let Some(previous) = entries.insert_or_overwrite(name.clone(), normalized.clone()) {
            if previous != normalized {
                debug!(name, %previous, replacement = %normalized, "entry name collision; later path wins");
            }
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crx_config::ContentScriptGroup;
    use serde_json::json;

    #[test]
    fn names_come_from_stems_and_index_parents() {
        assert_eq!(derive_entry_name("a/b/options.tsx", "x"), "options");
        assert_eq!(derive_entry_name("a\\b\\index.ts", "x"), "b");
        assert_eq!(derive_entry_name("./index.js", "x"), "x");
        assert_eq!(derive_entry_name("/index.js", "x"), "x");
        assert_eq!(derive_entry_name("script", "x"), "script");
        assert_eq!(derive_entry_name("lib/worker.min.js", "x"), "worker.min");
    }

    #[test]
    fn dotfiles_keep_their_name() {
        assert_eq!(derive_entry_name("cfg/.hidden", "x"), ".hidden");
    }

    #[test]
    fn single_background_path_uses_default_name() {
        let entries = resolve_background_entries(&BackgroundSpec::path("src/main.ts"));
        assert_eq!(entries, EntryMap::single("background", "src/main.ts"));
    }

    #[test]
    fn background_list_derives_names() {
        let entries =
            resolve_background_entries(&BackgroundSpec::paths(["bg/index.ts", "bg/a.ts"]));
        assert_eq!(
            entries.iter().collect::<Vec<_>>(),
            [("bg", "bg/index.ts"), ("a", "bg/a.ts")]
        );
    }

    #[test]
    fn page_and_scripts_wrappers_resolve_like_lists() {
        let page: BackgroundSpec = serde_json::from_value(json!({ "page": "w/index.ts" })).unwrap();
        assert_eq!(
            resolve_background_entries(&page),
            EntryMap::single("background", "w/index.ts")
        );

        let scripts: BackgroundSpec =
            serde_json::from_value(json!({ "scripts": ["w/index.ts"] })).unwrap();
        assert_eq!(
            resolve_background_entries(&scripts),
            EntryMap::single("w", "w/index.ts")
        );
    }

    #[test]
    fn collisions_keep_first_slot_and_last_path() {
        let entries = resolve_content_entries(&ContentSpec::paths([
            "a/foo.ts", "bar.ts", "b/foo.ts",
        ]));
        assert_eq!(
            entries.iter().collect::<Vec<_>>(),
            [("foo", "b/foo.ts"), ("bar", "bar.ts")]
        );
    }

    #[test]
    fn background_collision_is_last_wins() {
        let entries = resolve_background_entries(&BackgroundSpec::paths(["a/foo.ts", "b/foo.ts"]));
        assert_eq!(entries, EntryMap::single("foo", "b/foo.ts"));
    }

    #[test]
    fn index_files_in_different_directories_do_not_collide() {
        let entries =
            resolve_background_entries(&BackgroundSpec::paths(["x/index.ts", "y/index.ts"]));
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries.iter().collect::<Vec<_>>(),
            [("x", "x/index.ts"), ("y", "y/index.ts")]
        );
    }

    #[test]
    fn resolution_is_deterministic_and_idempotent() {
        let background = BackgroundSpec::paths(["./bg//index.ts", "bg\\a.ts", "c/a.ts"]);
        let first = resolve_background_entries(&background);
        assert_eq!(resolve_background_entries(&background), first);

        let again = resolve_background_entries(&BackgroundSpec::paths(first.paths()));
        assert_eq!(again, first);

        let content = ContentSpec::paths(["c/index.ts", "./d/e.ts"]);
        let first = resolve_content_entries(&content);
        assert_eq!(resolve_content_entries(&content), first);
        assert_eq!(
            resolve_content_entries(&ContentSpec::paths(first.paths())),
            first
        );
    }

    #[test]
    fn content_groups_flatten() {
        let spec = ContentSpec::Groups(vec![
            ContentScriptGroup::new(["<all_urls>"], ["c/index.ts"]),
            ContentScriptGroup {
                matches: vec!["https://x.dev/*".into()],
                js: None,
                extra: Default::default(),
            },
            ContentScriptGroup::new(["https://y.dev/*"], ["y.ts"]),
        ]);
        let entries = resolve_content_entries(&spec);
        assert_eq!(entries.names().collect::<Vec<_>>(), ["c", "y"]);
    }

    #[test]
    fn unrecognized_shapes_resolve_to_nothing() {
        let background = BackgroundSpec::Unrecognized(json!({ "worker": "x.ts" }));
        assert!(resolve_background_entries(&background).is_empty());

        let content = ContentSpec::Unrecognized(json!(7));
        assert!(resolve_content_entries(&content).is_empty());
    }

    #[test]
    fn paths_are_normalized() {
        let entries = resolve_content_entries(&ContentSpec::path(".\\c\\\\main.ts"));
        assert_eq!(entries.get("content"), Some("c/main.ts"));
    }
}
