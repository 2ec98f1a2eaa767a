//! Development mode plumbing.
//!
//! - [`ReloadServer`] carries the reload channel over WebSocket
//! - [`OutputWatcher`] notices when the host bundler rewrites outputs

pub mod server;
pub mod watcher;

pub use server::ReloadServer;
pub use watcher::OutputWatcher;
