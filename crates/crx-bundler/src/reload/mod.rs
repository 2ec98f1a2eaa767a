//! Dev reload coordination.
//!
//! In development mode the coordinator owns a [`ReloadChannel`] and hands out
//! [`ReloadPlugin`]s for the background and content builds. In production it
//! does nothing.

mod channel;
mod client;
mod plugin;
mod scheduler;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crx_config::{ExtensionOptions, Mode};

use crate::plugins::SharedPlugin;

pub use channel::{ReloadChannel, ReloadMessage};
pub use client::reload_client_snippet;
pub use plugin::{RELOAD_PLUGIN_NAME, ReloadInjection, ReloadPlugin};
pub use scheduler::UpdateScheduler;

#[derive(Debug, Clone)]
pub enum ReloadCoordinator {
    Inactive,
    Active(ActiveReload),
}

#[derive(Debug, Clone)]
pub struct ActiveReload {
    channel: ReloadChannel,
    scheduler: UpdateScheduler,
    host: String,
    port: u16,
}

impl ReloadCoordinator {
    pub fn new(mode: Mode, options: &ExtensionOptions) -> Self {
        if !mode.is_dev() {
            return ReloadCoordinator::Inactive;
        }

        let channel = ReloadChannel::new();
        let scheduler = UpdateScheduler::new(
            channel.clone(),
            Duration::from_millis(options.reload.debounce_ms),
        );
        ReloadCoordinator::Active(ActiveReload {
            channel,
            scheduler,
            host: options.host.clone(),
            port: options.port,
        })
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ReloadCoordinator::Active(_))
    }

    pub fn channel(&self) -> Option<&ReloadChannel> {
        match self {
            ReloadCoordinator::Active(active) => Some(&active.channel),
            ReloadCoordinator::Inactive => None,
        }
    }

    /// The client snippet for this coordinator's host and port, bound to `entry`.
    pub fn injection(&self, entry: impl AsRef<Path>) -> Option<ReloadInjection> {
        let ReloadCoordinator::Active(active) = self else {
            return None;
        };
        let snippet = reload_client_snippet(&active.host, active.port);
        Some(ReloadInjection::new(entry, snippet))
    }

    /// Reload plugin for the background build, carrying `injection`.
    pub fn background_plugin(&self, injection: ReloadInjection) -> Option<SharedPlugin> {
        let ReloadCoordinator::Active(active) = self else {
            return None;
        };
        Some(Arc::new(ReloadPlugin::injecting(
            active.scheduler.clone(),
            injection,
        )))
    }

    pub fn content_plugin(&self) -> Option<SharedPlugin> {
        let ReloadCoordinator::Active(active) = self else {
            return None;
        };
        Some(Arc::new(ReloadPlugin::content(active.scheduler.clone())))
    }

    /// Schedule an `update` push as if a build had just finished.
    pub fn notify_build_end(&self) -> bool {
        match self {
            ReloadCoordinator::Active(active) => active.scheduler.schedule(),
            ReloadCoordinator::Inactive => false,
        }
    }

    /// Disconnect every client.
    pub fn shutdown(&self) {
        if let Some(channel) = self.channel() {
            channel.close();
        }
    }
}
