//! Plugin system for crx-bundler.
//!
//! Plugins travel inside each [`BuildConfig`](crate::BuildConfig) to the host
//! bundler, which calls their hooks while it builds.

pub mod registry;

pub use registry::{CrxPlugin, PluginPhase, PluginRegistry, SharedPlugin};
