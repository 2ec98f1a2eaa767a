//! The dev reload plugin.

use std::borrow::Cow;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::path::normalize_path;
use crate::plugins::{CrxPlugin, PluginPhase};

use super::scheduler::UpdateScheduler;

pub const RELOAD_PLUGIN_NAME: &str = "crx:reload";

/// Appends the reload client to one designated module and schedules an
/// `update` push after each build.
///
/// Content builds get a plugin without an injection target: they only
/// schedule pushes.
#[derive(Debug, Clone)]
pub struct ReloadPlugin {
    target: Option<ReloadInjection>,
    scheduler: UpdateScheduler,
}

/// Where the reload client goes and what it is.
///
/// Serialized into the background build so bundlers that only read
/// `crx.builds.json` can append `snippet` to `entry` themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReloadInjection {
    /// Normalized path of the module that receives the client
    pub entry: String,
    pub snippet: String,
}

impl ReloadInjection {
    pub fn new(entry: impl AsRef<std::path::Path>, snippet: impl Into<String>) -> Self {
        Self {
            entry: normalize_path(entry),
            snippet: snippet.into(),
        }
    }
}

impl ReloadPlugin {
    /// Plugin for the background build, injecting `snippet` into `entry`.
    pub fn background(
        scheduler: UpdateScheduler,
        entry: impl AsRef<std::path::Path>,
        snippet: impl Into<String>,
    ) -> Self {
        Self::injecting(scheduler, ReloadInjection::new(entry, snippet))
    }

    pub fn injecting(scheduler: UpdateScheduler, injection: ReloadInjection) -> Self {
        Self {
            target: Some(injection),
            scheduler,
        }
    }

    /// Plugin for a content build.
    pub fn content(scheduler: UpdateScheduler) -> Self {
        Self {
            target: None,
            scheduler,
        }
    }

    /// The normalized path that receives the client, if any.
    pub fn target_entry(&self) -> Option<&str> {
        self.target.as_ref().map(|target| target.entry.as_str())
    }

    pub fn injection(&self) -> Option<&ReloadInjection> {
        self.target.as_ref()
    }
}

#[async_trait]
impl CrxPlugin for ReloadPlugin {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(RELOAD_PLUGIN_NAME)
    }

    fn phase(&self) -> PluginPhase {
        PluginPhase::PostProcess
    }

    async fn transform(&self, code: &str, id: &str) -> Result<Option<String>> {
        let Some(target) = &self.target else {
            return Ok(None);
        };
        if normalize_path(id) != target.entry {
            return Ok(None);
        }

        tracing::debug!(module = id, "injecting reload client");
        Ok(Some(format!("{code}\n{}", target.snippet)))
    }

    async fn build_end(&self) -> Result<()> {
        self.scheduler.schedule();
        Ok(())
    }
}
