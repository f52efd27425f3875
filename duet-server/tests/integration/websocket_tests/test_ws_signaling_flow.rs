use anyhow::{Context, Result};
use duet_core::{Role, SignalMessage};
use duet_server::{RoomDirectory, RoomManager, ServerConfig, SignalingService, app};
use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::integration::init_tracing;
use crate::utils::{SIGNAL_TIMEOUT_MS, joined, offer};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start_server() -> Result<(SocketAddr, SignalingService)> {
    let config = ServerConfig {
        host: "127.0.0.1".parse()?,
        http_port: 0,
        stun_port: 0,
        ..Default::default()
    };
    let service = SignalingService::new(RoomManager::new());
    let router = app(service.clone(), &config);

    let listener = tokio::net::TcpListener::bind(config.http_addr()).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok((addr, service))
}

async fn connect(addr: SocketAddr) -> Result<Client> {
    let (client, _) = connect_async(format!("ws://{addr}/ws"))
        .await
        .context("Failed to connect")?;
    Ok(client)
}

async fn send(client: &mut Client, frame: Value) -> Result<()> {
    client.send(Message::text(frame.to_string())).await?;
    Ok(())
}

/// Next signaling message, or `None` once the server closed the socket.
async fn next_signal(client: &mut Client) -> Result<Option<SignalMessage>> {
    let timeout = std::time::Duration::from_millis(SIGNAL_TIMEOUT_MS);
    loop {
        let frame = tokio::time::timeout(timeout, client.next())
            .await
            .context("Timeout waiting for frame")?;
        match frame {
            Some(Ok(Message::Text(text))) => {
                return Ok(Some(SignalMessage::parse(text.as_str())?));
            }
            Some(Ok(Message::Close(_))) | None => return Ok(None),
            Some(Ok(_)) => continue,
            Some(Err(e)) => return Err(e.into()),
        }
    }
}

#[tokio::test]
async fn test_pairing_and_relay_over_websocket() -> Result<()> {
    init_tracing();

    let (addr, _service) = start_server().await?;
    let mut sender = connect(addr).await?;
    let mut viewer = connect(addr).await?;

    send(&mut sender, json!({ "type": "join", "role": "sender", "room": "demo" })).await?;
    assert_eq!(next_signal(&mut sender).await?, Some(joined(Role::Sender, "demo")));

    send(&mut viewer, json!({ "type": "join", "role": "viewer", "room": "demo" })).await?;
    assert_eq!(next_signal(&mut viewer).await?, Some(joined(Role::Viewer, "demo")));
    assert_eq!(next_signal(&mut sender).await?, Some(SignalMessage::ViewerReady));

    // Garbage is dropped silently; the offer after it still goes through.
    sender.send(Message::text("{not json")).await?;
    send(&mut sender, offer("v=0 over the wire")).await?;

    assert_eq!(
        next_signal(&mut viewer).await?,
        Some(SignalMessage::Offer {
            sdp: json!({ "type": "offer", "sdp": "v=0 over the wire" }),
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_duplicate_sender_over_websocket() -> Result<()> {
    init_tracing();

    let (addr, _service) = start_server().await?;
    let mut first = connect(addr).await?;
    let mut second = connect(addr).await?;

    send(&mut first, json!({ "type": "join", "role": "sender", "room": "demo" })).await?;
    next_signal(&mut first).await?;

    send(&mut second, json!({ "type": "join", "role": "sender", "room": "demo" })).await?;
    assert_eq!(
        next_signal(&mut second).await?,
        Some(SignalMessage::error("sender-already-exists"))
    );

    Ok(())
}

#[tokio::test]
async fn test_client_close_notifies_peer() -> Result<()> {
    init_tracing();

    let (addr, _service) = start_server().await?;
    let mut sender = connect(addr).await?;
    let mut viewer = connect(addr).await?;

    send(&mut sender, json!({ "type": "join", "role": "sender", "room": "demo" })).await?;
    next_signal(&mut sender).await?;
    send(&mut viewer, json!({ "type": "join", "role": "viewer", "room": "demo" })).await?;
    next_signal(&mut viewer).await?;

    sender.close(None).await?;

    assert_eq!(next_signal(&mut viewer).await?, Some(SignalMessage::SenderLeft));

    Ok(())
}

#[tokio::test]
async fn test_forced_disconnect_over_websocket() -> Result<()> {
    init_tracing();

    let (addr, service) = start_server().await?;
    let mut sender = connect(addr).await?;
    let mut viewer = connect(addr).await?;

    send(&mut sender, json!({ "type": "join", "role": "sender", "room": "demo" })).await?;
    next_signal(&mut sender).await?;
    send(&mut viewer, json!({ "type": "join", "role": "viewer", "room": "demo" })).await?;
    next_signal(&mut viewer).await?;
    next_signal(&mut sender).await?;

    let status = service.rooms_status().await;
    let sender_id = status[0]
        .sender
        .connection_id
        .context("sender should be registered")?;

    assert!(service.disconnect(&sender_id).await);

    assert_eq!(next_signal(&mut sender).await?, None);
    assert_eq!(next_signal(&mut viewer).await?, Some(SignalMessage::SenderLeft));

    let status = service.rooms_status().await;
    assert!(!status[0].sender.connected);
    assert!(status[0].viewer.online);

    Ok(())
}
