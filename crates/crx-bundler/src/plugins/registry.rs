//! Plugin registry with execution phases.
//!
//! Plugins are ordered by phase when the registry is drained. Plugins sharing a
//! phase keep the order they were added in.

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Plugin execution phases
///
/// Plugins are executed in phase order (lower numbers first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum PluginPhase {
    /// Module resolution
    Resolve = 10,

    /// Content transformation (TypeScript, JSX, CSS...)
    #[default]
    Transform = 20,

    /// Post-processing
    ///
    /// Sees code after every transform has run. Dev reload injection lives here.
    PostProcess = 100,
}

/// A hook object carried by a build configuration.
///
/// The host bundler calls [`transform`](CrxPlugin::transform) once per emitted
/// module and [`build_end`](CrxPlugin::build_end) once per finished build.
#[async_trait]
pub trait CrxPlugin: Send + Sync {
    fn name(&self) -> Cow<'static, str>;

    /// Return the execution phase for this plugin
    ///
    /// Defaults to `Transform`.
    fn phase(&self) -> PluginPhase {
        PluginPhase::Transform
    }

    /// Rewrite `code` for the module `id`. `None` leaves it unchanged.
    async fn transform(&self, _code: &str, _id: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn build_end(&self) -> Result<()> {
        Ok(())
    }
}

pub type SharedPlugin = Arc<dyn CrxPlugin>;

/// Plugin registry that maintains plugins in phase order
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<(PluginPhase, SharedPlugin)>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<P: CrxPlugin + 'static>(&mut self, plugin: P) {
        self.add_shared(Arc::new(plugin));
    }

    pub fn add_shared(&mut self, plugin: SharedPlugin) {
        let phase = plugin.phase();
        self.plugins.push((phase, plugin));
    }

    /// Drain the registry in execution order.
    ///
    /// Sorting happens here (once) rather than on every add.
    pub fn into_plugins(mut self) -> Vec<SharedPlugin> {
        self.plugins.sort_by_key(|(phase, _)| *phase);
        self.plugins.into_iter().map(|(_, plugin)| plugin).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl FromIterator<SharedPlugin> for PluginRegistry {
    fn from_iter<I: IntoIterator<Item = SharedPlugin>>(iter: I) -> Self {
        let mut registry = Self::new();
        for plugin in iter {
            registry.add_shared(plugin);
        }
        registry
    }
}
