use crate::signaling::{ConnectionSession, SignalingService};
use crate::transport::WsTransport;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use duet_core::ConnectionId;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let connection_id = ConnectionId::new();
    info!("New WebSocket connection: {}", connection_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let transport = Arc::new(WsTransport::new(tx));
    service.add_connection(connection_id, transport.clone());

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sender.send(msg).await.is_err() || closing {
                break;
            }
        }
    });

    let mut session = ConnectionSession::new(connection_id, transport);

    loop {
        tokio::select! {
            _ = &mut send_task => break,
            frame = receiver.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        session.handle_text(service.rooms(), text.as_str()).await;
                    }
                    Some(Ok(Message::Binary(_))) => {
                        debug!("Ignoring binary frame from {}", connection_id);
                    }
                    Some(Ok(Message::Close(frame))) => {
                        debug!("{} closed the connection: {:?}", connection_id, frame);
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("WebSocket error on {}: {}", connection_id, e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    send_task.abort();
    service.remove_connection(&connection_id);
    session.close(service.rooms()).await;

    info!("WebSocket disconnected: {}", connection_id);
}
