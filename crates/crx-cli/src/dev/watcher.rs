//! Output directory watcher.
//!
//! The host bundler writes its outputs into the same directory crx writes
//! the manifest to. Each write it makes is a finished build, so every
//! relevant change is forwarded as a build-end notification.

use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::error::{CliError, Result};

const CHANGE_BUFFER: usize = 100;

pub struct OutputWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl OutputWatcher {
    /// Watch `root` recursively, skipping files named in `ignored`.
    ///
    /// # Returns
    ///
    /// Tuple of (OutputWatcher, receiver for changed paths)
    ///
    /// # Errors
    ///
    /// Returns error if `root` doesn't exist or the watcher cannot start
    pub fn new(
        root: PathBuf,
        ignored: &[&str],
    ) -> Result<(Self, mpsc::Receiver<PathBuf>)> {
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::channel(CHANGE_BUFFER);
        let ignored: Vec<String> = ignored.iter().map(|name| name.to_string()).collect();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let Ok(event) = res else {
                return;
            };
            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                return;
            }
            for path in event.paths {
                if is_ignored(&path, &ignored) {
                    continue;
                }
                // A full buffer already guarantees a pending notification
                let _ = tx.try_send(path);
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn is_ignored(path: &Path, ignored: &[String]) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_none_or(|name| ignored.iter().any(|ignored| ignored == name))
}
