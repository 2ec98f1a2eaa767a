//! The reload server speaks plain WebSocket.

use std::time::Duration;

use crx_bundler::{ReloadChannel, ReloadMessage};
use crx_cli::dev::ReloadServer;
use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(url: &str) -> Client {
    let (ws, _) = connect_async(url).await.unwrap();
    ws
}

/// Wait for the next text message from the server.
async fn next_text(ws: &mut Client) -> String {
    match timeout(Duration::from_secs(5), ws.next()).await {
        Ok(Some(Ok(Message::Text(text)))) => text.to_string(),
        Ok(Some(Ok(msg))) => panic!("unexpected message: {msg:?}"),
        Ok(Some(Err(e))) => panic!("websocket error: {e}"),
        Ok(None) => panic!("connection closed"),
        Err(_) => panic!("timed out waiting for a message"),
    }
}

async fn wait_for_clients(channel: &ReloadChannel, expected: usize) {
    for _ in 0..100 {
        if channel.client_count() == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!(
        "expected {expected} clients, have {}",
        channel.client_count()
    );
}

#[tokio::test]
async fn clients_are_greeted_and_receive_broadcasts() {
    let channel = ReloadChannel::new();
    let server = ReloadServer::bind("127.0.0.1", 0, channel.clone())
        .await
        .unwrap();
    let url = server.url();
    assert_eq!(url, format!("ws://{}", server.local_addr()));

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve(async move {
        let _ = shutdown_rx.await;
    }));

    let mut ws = connect(&url).await;
    assert_eq!(next_text(&mut ws).await, ReloadMessage::Connected.to_json());
    assert_eq!(channel.client_count(), 1);

    assert_eq!(channel.broadcast(ReloadMessage::Update), 1);
    assert_eq!(next_text(&mut ws).await, r#"{"type":"update"}"#);

    channel.close();
    drop(ws);
    let _ = shutdown_tx.send(());
    timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn every_connected_client_gets_the_update() {
    let channel = ReloadChannel::new();
    let server = ReloadServer::bind("127.0.0.1", 0, channel.clone())
        .await
        .unwrap();
    let url = server.url();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve(async move {
        let _ = shutdown_rx.await;
    }));

    let mut first = connect(&url).await;
    let mut second = connect(&url).await;
    next_text(&mut first).await;
    next_text(&mut second).await;
    wait_for_clients(&channel, 2).await;

    assert_eq!(channel.broadcast(ReloadMessage::Update), 2);
    assert_eq!(next_text(&mut first).await, r#"{"type":"update"}"#);
    assert_eq!(next_text(&mut second).await, r#"{"type":"update"}"#);

    drop(first);
    wait_for_clients(&channel, 1).await;

    channel.close();
    drop(second);
    let _ = shutdown_tx.send(());
    timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn binding_a_taken_port_fails() {
    let first = ReloadServer::bind("127.0.0.1", 0, ReloadChannel::new())
        .await
        .unwrap();
    let port = first.local_addr().port();

    let second = ReloadServer::bind("127.0.0.1", port, ReloadChannel::new()).await;
    assert!(matches!(second, Err(crx_cli::CliError::Server(_))));
}
