use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::server::AppState;

use super::message::{OutboundMessage, ServerMessage};

/// WebSocket upgrade handler for queue observers (displays, admin
/// consoles). No authentication; the push channel is read-only.
#[tracing::instrument(name = "ws.upgrade", skip(ws, state))]
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established observer connection.
async fn handle_socket(socket: WebSocket, state: AppState) {
    // Channel for pushing queue updates to this connection
    let (tx, mut rx) = mpsc::channel::<OutboundMessage>(state.settings.websocket.channel_buffer);

    let handle = state.registry.register(tx);
    let observer_id = handle.id;

    tracing::info!(observer_id = %observer_id, "Observer connected");

    // Send the current queue status immediately so late joiners see state
    // without waiting for the next mutation
    let status = state.queue.status().await;
    if handle
        .send(OutboundMessage::Message(ServerMessage::queue_update(status)))
        .await
        .is_err()
    {
        tracing::warn!(observer_id = %observer_id, "Failed to deliver initial queue status");
        state.registry.unregister(observer_id);
        return;
    }

    // Split socket into sender and receiver
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Task for sending queued updates to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let text = match msg.to_json() {
                Ok(t) => t,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize message");
                    continue;
                }
            };

            if ws_sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Task for draining the client side of the socket
    let recv_task = tokio::spawn(async move {
        while let Some(result) = ws_receiver.next().await {
            match result {
                Ok(msg) => {
                    if !process_message(msg, observer_id) {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(observer_id = %observer_id, error = %e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = send_task => {
            tracing::debug!(observer_id = %observer_id, "Send task completed");
        }
        _ = recv_task => {
            tracing::debug!(observer_id = %observer_id, "Receive task completed");
        }
    }

    state.registry.unregister(observer_id);
    tracing::info!(observer_id = %observer_id, "Observer disconnected");
}

/// Process a frame received from the observer.
/// Returns false if the connection should be closed.
fn process_message(msg: Message, observer_id: uuid::Uuid) -> bool {
    match msg {
        Message::Text(text) => {
            // Observers are read-only; inbound text is logged and ignored
            tracing::debug!(observer_id = %observer_id, message = %text, "Ignoring client message");
            true
        }
        Message::Binary(_) => true,
        // Axum answers pings automatically
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            tracing::debug!(observer_id = %observer_id, "Received close frame");
            false
        }
    }
}
