//! Helpers shared by the commands.

use std::path::{Path, PathBuf};

use crx_bundler::{BACKGROUND_PAGE, Generated};
use crx_config::{ConfigDiscovery, ConfigOverrides, ExtensionOptions};

use crate::cli::ProjectArgs;
use crate::error::{Result, ResultExt};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const BUILDS_FILE: &str = "crx.builds.json";

/// Files crx itself writes into the output directory.
pub const GENERATED_FILES: &[&str] = &[MANIFEST_FILE, BACKGROUND_PAGE, BUILDS_FILE];

/// The project root: `--root` resolved against the working directory.
pub fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match root {
        Some(root) if root.is_absolute() => root.to_path_buf(),
        Some(root) => cwd.join(root),
        None => cwd,
    })
}

/// Load the extension options for `project`, applying `overrides` last.
pub fn load_options(
    project: &ProjectArgs,
    overrides: &ConfigOverrides,
) -> Result<ExtensionOptions> {
    let root = resolve_root(project.root.as_deref())?;
    if !root.is_dir() {
        return Err(crate::error::CliError::FileNotFound(root));
    }

    let discovery = ConfigDiscovery::new(&root);
    let options = discovery.load_with(project.config.as_deref(), overrides)?;
    tracing::debug!(root = %root.display(), name = %options.name, "config loaded");
    Ok(options)
}

/// Write the manifest, background page and build graph into the output directory.
///
/// The background page is only written when there are background entries.
/// Returns the written paths.
pub async fn write_artifacts(generated: &Generated) -> Result<Vec<PathBuf>> {
    let out_dir = &generated.out_dir;
    tokio::fs::create_dir_all(out_dir).await.with_path(out_dir)?;

    let mut files = vec![(out_dir.join(MANIFEST_FILE), generated.manifest_json()?)];
    if !generated.background_entries.is_empty() {
        files.push((
            out_dir.join(BACKGROUND_PAGE),
            generated.background_html.clone(),
        ));
    }
    files.push((out_dir.join(BUILDS_FILE), generated.builds_json()?));

    let mut written = Vec::with_capacity(files.len());
    for (path, contents) in files {
        tokio::fs::write(&path, contents).await.with_path(&path)?;
        tracing::debug!(path = %path.display(), "artifact written");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_root_is_kept() {
        let root = resolve_root(Some(Path::new("/work/ext"))).unwrap();
        assert_eq!(root, PathBuf::from("/work/ext"));
    }

    #[test]
    fn relative_root_joins_cwd() {
        let root = resolve_root(Some(Path::new("ext"))).unwrap();
        assert_eq!(root, std::env::current_dir().unwrap().join("ext"));
    }
}
