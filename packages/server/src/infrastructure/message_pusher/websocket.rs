//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - ドメインイベントを JSON にエンコードして送信チャンネルに積む
//!
//! ## 設計ノート
//!
//! WebSocket への実際の書き込みは UI 層の writer タスク
//! （`src/ui/handler/websocket.rs`）が送信期限付きで行います。
//! この実装はハブのロック内で呼ばれるため、enqueue のみを行い I/O を待ちません。
//! 1 つの接続への送信失敗が他の接続への配信を妨げることはありません。

use std::collections::HashMap;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, ServerEvent},
    infrastructure::dto::conversion::encode_event,
};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャンネル
    clients: HashMap<ConnectionId, PusherChannel>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl MessagePusher for WebSocketMessagePusher {
    fn register_client(&mut self, connection_id: ConnectionId, sender: PusherChannel) {
        self.clients.insert(connection_id, sender);
        tracing::debug!("Connection {} registered to MessagePusher", connection_id);
    }

    fn unregister_client(&mut self, connection_id: &ConnectionId) -> bool {
        let removed = self.clients.remove(connection_id).is_some();
        if removed {
            tracing::debug!("Connection {} unregistered from MessagePusher", connection_id);
        }
        removed
    }

    fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let sender = self
            .clients
            .get(connection_id)
            .ok_or(MessagePushError::ClientNotFound(*connection_id))?;

        let frame = encode_event(event)?;
        sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed {} to connection {}", event.kind(), connection_id);
        Ok(())
    }

    fn broadcast(&self, event: &ServerEvent) -> Result<usize, MessagePushError> {
        // エンコードは 1 回だけ
        let frame = encode_event(event)?;

        let mut delivered = 0;
        for (connection_id, sender) in &self.clients {
            // ブロードキャストでは一部の送信失敗を許容
            match sender.send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(
                    "Failed to push {} to connection {}: {}",
                    event.kind(),
                    connection_id,
                    e
                ),
            }
        }
        tracing::debug!("Broadcasted {} to {} connection(s)", event.kind(), delivered);
        Ok(delivered)
    }

    fn close_all(&mut self) -> usize {
        let closed = self.clients.len();
        self.clients.clear();
        closed
    }
}
