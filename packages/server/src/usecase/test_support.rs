//! Shared helpers for use case tests.

use std::sync::Arc;

use sumi_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::{
    domain::{Bounds, ConnectionId, MessagePusher, ParticipantId, RectId, RectProposal, Session},
    infrastructure::{dto::websocket::WsMessage, message_pusher::WebSocketMessagePusher},
};

use super::{CanvasHub, ConnectParticipantUseCase};

pub(crate) fn create_test_hub() -> Arc<CanvasHub> {
    create_test_hub_with(Box::new(WebSocketMessagePusher::new()))
}

pub(crate) fn pid(value: &str) -> ParticipantId {
    ParticipantId::new(value.to_string()).unwrap()
}

pub(crate) fn proposal(id: &str, x: f64, y: f64, w: f64, h: f64) -> RectProposal {
    RectProposal {
        id: RectId::new(id.to_string()).unwrap(),
        bounds: Bounds::new(x, y, w, h).unwrap(),
        text: None,
    }
}

/// Register a connection and return its handle with its outbound receiver.
pub(crate) async fn connect(
    hub: &Arc<CanvasHub>,
) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = ConnectParticipantUseCase::new(hub.clone())
        .register(tx)
        .await
        .unwrap();
    (connection_id, rx)
}

/// Register a connection and send hello as `name`.
pub(crate) async fn join(
    hub: &Arc<CanvasHub>,
    name: &str,
) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
    let (connection_id, rx) = connect(hub).await;
    ConnectParticipantUseCase::new(hub.clone())
        .execute(connection_id, pid(name))
        .await
        .unwrap();
    (connection_id, rx)
}

/// Decode every frame queued so far.
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<WsMessage> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(WsMessage::decode(&frame).unwrap());
    }
    frames
}

/// Hub with a custom pusher, for tests that count fan-out calls.
pub(crate) fn create_test_hub_with(pusher: Box<dyn MessagePusher>) -> Arc<CanvasHub> {
    let session = Session::new(Arc::new(FixedClock::new(1_700_000_000_000)));
    Arc::new(CanvasHub::new(session, pusher))
}
