//! WebSocket server for the reload channel.
//!
//! Every connection is registered on the [`ReloadChannel`], greeted with
//! `{"type":"connected"}`, and then receives whatever the channel broadcasts.

use std::future::Future;
use std::net::SocketAddr;

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
    routing::get,
};
use crx_bundler::{ReloadChannel, ReloadMessage};
use tokio::net::TcpListener;

use crate::error::{CliError, Result};

pub struct ReloadServer {
    listener: TcpListener,
    addr: SocketAddr,
    channel: ReloadChannel,
}

impl ReloadServer {
    /// Bind the server. Port 0 picks a free port.
    ///
    /// # Errors
    ///
    /// Returns error if the address cannot be bound
    pub async fn bind(host: &str, port: u16, channel: ReloadChannel) -> Result<Self> {
        let listener = TcpListener::bind((host, port))
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind to {host}:{port}: {e}")))?;
        let addr = listener.local_addr()?;

        Ok(Self {
            listener,
            addr,
            channel,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = router(self.channel);
        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| CliError::Server(format!("Server error: {}", e)))
    }
}

fn router(channel: ReloadChannel) -> Router {
    Router::new()
        .route("/", get(handle_upgrade))
        .with_state(channel)
}

async fn handle_upgrade(ws: WebSocketUpgrade, State(channel): State<ReloadChannel>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, channel))
}

async fn handle_socket(mut socket: WebSocket, channel: ReloadChannel) {
    let (id, mut rx) = channel.register();

    let greeting = Message::Text(ReloadMessage::Connected.to_json().into());
    if socket.send(greeting).await.is_err() {
        channel.unregister(id);
        return;
    }

    loop {
        tokio::select! {
            outgoing = rx.recv() => {
                let Some(text) = outgoing else {
                    // Channel closed
                    break;
                };
                if socket.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    channel.unregister(id);
    tracing::debug!(client = id, "reload client disconnected");
}
