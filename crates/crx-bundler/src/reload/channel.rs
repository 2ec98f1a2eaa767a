//! Reload channel: the set of connected extension instances.
//!
//! The channel only tracks clients and fans messages out to them. Whatever
//! transport accepts connections (the CLI's WebSocket server) registers each
//! client here and forwards what it receives.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Messages pushed to connected extensions.
///
/// Serialized as `{"type":"connected"}` and `{"type":"update"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReloadMessage {
    /// Sent once, right after a client connects
    Connected,
    /// A rebuild finished; the extension should reload itself
    Update,
}

impl ReloadMessage {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Per-client buffer. A client this far behind misses further messages.
const CLIENT_BUFFER: usize = 16;

/// Connected clients, keyed by id.
type ClientRegistry = Arc<RwLock<HashMap<usize, mpsc::Sender<String>>>>;

/// Cheaply cloneable handle to the connected clients.
#[derive(Debug, Clone, Default)]
pub struct ReloadChannel {
    clients: ClientRegistry,
    next_client_id: Arc<AtomicUsize>,
}

impl ReloadChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new client.
    ///
    /// # Returns
    ///
    /// Client ID and the receiver its serialized messages arrive on
    pub fn register(&self) -> (usize, mpsc::Receiver<String>) {
        let id = self.next_client_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(CLIENT_BUFFER);
        self.clients.write().insert(id, tx);
        tracing::debug!(client = id, "reload client registered");
        (id, rx)
    }

    pub fn unregister(&self, id: usize) {
        if self.clients.write().remove(&id).is_some() {
            tracing::debug!(client = id, "reload client unregistered");
        }
    }

    /// Send `message` to every connected client without waiting.
    ///
    /// A client whose buffer is full misses this message. Clients whose
    /// receiver is gone are dropped from the registry. Returns the number of
    /// clients the message reached.
    pub fn broadcast(&self, message: ReloadMessage) -> usize {
        let json = message.to_json();

        let mut delivered = 0;
        let mut closed_ids = Vec::new();
        for (id, tx) in self.clients.read().iter() {
            match tx.try_send(json.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::debug!(client = id, "reload client lagging, message dropped");
                }
                Err(TrySendError::Closed(_)) => closed_ids.push(*id),
            }
        }

        for id in closed_ids {
            self.unregister(id);
        }

        delivered
    }

    pub fn client_count(&self) -> usize {
        self.clients.read().len()
    }

    /// Drop every client. Their receivers close once drained.
    pub fn close(&self) {
        let dropped = {
            let mut clients = self.clients.write();
            let count = clients.len();
            clients.clear();
            count
        };
        tracing::debug!(clients = dropped, "reload channel closed");
    }
}
