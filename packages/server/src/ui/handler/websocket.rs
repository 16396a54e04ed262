//! WebSocket connection handlers.
//!
//! Each connection runs three tasks:
//!
//! - reader: decodes frames and dispatches them to the use cases, bounded by
//!   the pong wait
//! - pusher: owns the sink, writes queued frames and Pings, each bounded by
//!   the write wait
//! - heartbeat: asks the pusher for a Ping every ping period
//!
//! The first task to finish ends the connection. The handler then runs the
//! disconnect use case exactly once and lets the pusher flush what is queued.

use std::{fmt, sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{
    sync::mpsc,
    task::JoinError,
    time::{interval, timeout},
};

use crate::{
    domain::{ConnectionId, ParticipantId, RectProposal, TextDropProposal},
    infrastructure::dto::websocket::{MessageType, WsMessage},
    ui::state::AppState,
    usecase::ConnectError,
};

/// Why a connection ended.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CloseReason {
    ClientClosed,
    ReadTimeout,
    ReadFailed(String),
    Protocol(String),
    CapacityRejected,
    WriteFailed(String),
    WriteTimeout,
    /// The hub dropped the outbound channel
    OutboundClosed,
    PusherGone,
    TaskFailed(String),
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::ClientClosed => write!(f, "closed by client"),
            CloseReason::ReadTimeout => write!(f, "nothing read before timeout"),
            CloseReason::ReadFailed(e) => write!(f, "read failed: {}", e),
            CloseReason::Protocol(e) => write!(f, "malformed frame: {}", e),
            CloseReason::CapacityRejected => write!(f, "participant limit reached"),
            CloseReason::WriteFailed(e) => write!(f, "write failed: {}", e),
            CloseReason::WriteTimeout => write!(f, "write timed out"),
            CloseReason::OutboundClosed => write!(f, "closed by server"),
            CloseReason::PusherGone => write!(f, "pusher ended"),
            CloseReason::TaskFailed(e) => write!(f, "task failed: {}", e),
        }
    }
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let heartbeat = state.heartbeat;

    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = match state.connect_participant_usecase.register(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Refusing connection: {}", e);
            let _ = timeout(heartbeat.write_wait(), socket.send(Message::Close(None))).await;
            return;
        }
    };
    tracing::info!("Connection {} accepted", connection_id);

    let (sink, stream) = socket.split();
    let (ping_tx, ping_rx) = mpsc::channel(1);

    let mut send_task = tokio::spawn(pusher_loop(rx, ping_rx, sink, heartbeat.write_wait()));
    let mut heartbeat_task = tokio::spawn(heartbeat_loop(ping_tx, heartbeat.ping_period()));
    let mut recv_task = tokio::spawn(reader_loop(
        stream,
        state.clone(),
        connection_id,
        heartbeat.pong_wait(),
    ));

    // The first task to finish decides why the connection ends
    let mut send_finished = false;
    let reason = tokio::select! {
        res = &mut recv_task => task_reason(res),
        res = &mut send_task => {
            send_finished = true;
            task_reason(res)
        }
        res = &mut heartbeat_task => task_reason(res),
    };
    recv_task.abort();
    heartbeat_task.abort();

    // Drops the outbound channel; the pusher flushes and sends Close
    state
        .disconnect_participant_usecase
        .execute(connection_id)
        .await;

    if !send_finished && timeout(heartbeat.write_wait(), &mut send_task).await.is_err() {
        tracing::debug!("Connection {} did not flush in time", connection_id);
        send_task.abort();
    }

    tracing::info!("Connection {} closed: {}", connection_id, reason);
}

fn task_reason(res: Result<CloseReason, JoinError>) -> CloseReason {
    res.unwrap_or_else(|e| CloseReason::TaskFailed(e.to_string()))
}

/// Reads frames until the client goes away, the connection idles past
/// `pong_wait`, a frame is malformed, or the hub rejects the connection.
async fn reader_loop(
    mut stream: SplitStream<WebSocket>,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    pong_wait: Duration,
) -> CloseReason {
    loop {
        let frame = match timeout(pong_wait, stream.next()).await {
            Err(_) => return CloseReason::ReadTimeout,
            Ok(None) => return CloseReason::ClientClosed,
            Ok(Some(Err(e))) => return CloseReason::ReadFailed(e.to_string()),
            Ok(Some(Ok(frame))) => frame,
        };

        let decoded = match frame {
            Message::Text(text) => WsMessage::decode(text.as_str()),
            Message::Binary(bytes) => WsMessage::decode_slice(&bytes),
            Message::Close(_) => return CloseReason::ClientClosed,
            // Any frame counts as liveness; axum answers pings itself
            Message::Ping(_) | Message::Pong(_) => continue,
        };

        let message = match decoded {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Malformed frame from connection {}: {}", connection_id, e);
                return CloseReason::Protocol(e.to_string());
            }
        };

        if let Some(reason) = dispatch(&state, connection_id, message).await {
            return reason;
        }
    }
}

/// Route one decoded message to its use case. Returns a reason when the
/// connection has to close.
async fn dispatch(
    state: &AppState,
    connection_id: ConnectionId,
    message: WsMessage,
) -> Option<CloseReason> {
    match message.r#type {
        MessageType::Hello => {
            let Some(user_id) = message.user_id else {
                tracing::warn!("Ignoring hello without userId from {}", connection_id);
                return None;
            };
            let Ok(participant) = ParticipantId::new(user_id) else {
                tracing::warn!("Ignoring hello with empty userId from {}", connection_id);
                return None;
            };

            match state
                .connect_participant_usecase
                .execute(connection_id, participant)
                .await
            {
                Ok(_) => None,
                Err(ConnectError::CapacityExceeded) => Some(CloseReason::CapacityRejected),
                Err(e) => {
                    tracing::warn!("Ignoring hello from {}: {}", connection_id, e);
                    None
                }
            }
        }
        MessageType::Rect => {
            let Some(dto) = message.rect else {
                tracing::warn!("Ignoring rect without payload from {}", connection_id);
                return None;
            };
            // Domain Model への変換
            let proposal = match RectProposal::try_from(dto) {
                Ok(proposal) => proposal,
                Err(e) => {
                    tracing::warn!("Ignoring invalid rect from {}: {}", connection_id, e);
                    return None;
                }
            };

            if let Err(e) = state
                .place_rect_usecase
                .execute(connection_id, proposal)
                .await
            {
                tracing::warn!("Rejected rect from {}: {}", connection_id, e);
            }
            None
        }
        MessageType::Drop => {
            let Some(dto) = message.drop else {
                tracing::warn!("Ignoring drop without payload from {}", connection_id);
                return None;
            };
            // Domain Model への変換
            let proposal = match TextDropProposal::try_from(dto) {
                Ok(proposal) => proposal,
                Err(e) => {
                    tracing::warn!("Ignoring invalid drop from {}: {}", connection_id, e);
                    return None;
                }
            };

            if let Err(e) = state
                .send_drop_usecase
                .execute(connection_id, proposal)
                .await
            {
                tracing::warn!("Rejected drop from {}: {}", connection_id, e);
            }
            None
        }
        other => {
            tracing::debug!("Ignoring {:?} message from {}", other, connection_id);
            None
        }
    }
}

/// Writes queued frames and requested Pings to the socket.
///
/// When the hub drops the outbound channel, everything still queued is written,
/// then a Close frame, and the loop ends.
async fn pusher_loop(
    mut outbound: mpsc::UnboundedReceiver<String>,
    mut pings: mpsc::Receiver<()>,
    mut sink: SplitSink<WebSocket, Message>,
    write_wait: Duration,
) -> CloseReason {
    loop {
        tokio::select! {
            biased;
            frame = outbound.recv() => match frame {
                Some(text) => {
                    if let Err(reason) = write(&mut sink, Message::Text(text.into()), write_wait).await {
                        return reason;
                    }
                }
                None => {
                    let _ = write(&mut sink, Message::Close(None), write_wait).await;
                    return CloseReason::OutboundClosed;
                }
            },
            Some(()) = pings.recv() => {
                if let Err(reason) = write(&mut sink, Message::Ping(Bytes::new()), write_wait).await {
                    return reason;
                }
            }
        }
    }
}

async fn write(
    sink: &mut SplitSink<WebSocket, Message>,
    message: Message,
    write_wait: Duration,
) -> Result<(), CloseReason> {
    match timeout(write_wait, sink.send(message)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(CloseReason::WriteFailed(e.to_string())),
        Err(_) => Err(CloseReason::WriteTimeout),
    }
}

/// Requests a Ping every `ping_period` until the pusher is gone.
async fn heartbeat_loop(pings: mpsc::Sender<()>, ping_period: Duration) -> CloseReason {
    let mut ticker = interval(ping_period);
    // The first tick completes immediately
    ticker.tick().await;
    loop {
        ticker.tick().await;
        if pings.send(()).await.is_err() {
            return CloseReason::PusherGone;
        }
    }
}
