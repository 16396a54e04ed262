//! ハブの唯一のクリティカルセクション

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{ConnectionId, MessagePusher, ServerEvent, Session};

/// ハブのロックで守られるもの全て
pub(crate) struct HubState {
    pub(crate) session: Session,
    pub(crate) pusher: Box<dyn MessagePusher>,
    /// shutdown で一度だけ立つ。以降の登録は拒否される
    pub(crate) closed: bool,
}

impl HubState {
    /// ベストエフォートの一斉配信。失敗はログに残し、呼び出し元は止めない
    pub(crate) fn broadcast(&self, event: &ServerEvent) {
        if let Err(e) = self.pusher.broadcast(event) {
            tracing::warn!("Failed to broadcast {}: {}", event.kind(), e);
        }
    }

    /// 1 つの接続へのベストエフォートの配信
    pub(crate) fn push_to(&self, connection_id: &ConnectionId, event: &ServerEvent) {
        if let Err(e) = self.pusher.push_to(connection_id, event) {
            tracing::warn!(
                "Failed to push {} to connection {}: {}",
                event.kind(),
                connection_id,
                e
            );
        }
    }
}

/// ロックの内側にあるセッション状態と送信チャンネル
///
/// 各 UseCase は 1 回の操作につき 1 度だけロックを取り、検証・変更・配信の間
/// 保持し続ける。そのため配信が並行する変更と入り混じることはない。配信は
/// 無制限チャンネルに積むだけなので、クリティカルセクションがネットワークを
/// 待つことはない。
pub struct CanvasHub {
    state: Mutex<HubState>,
}

impl CanvasHub {
    pub fn new(session: Session, pusher: Box<dyn MessagePusher>) -> Self {
        Self {
            state: Mutex::new(HubState {
                session,
                pusher,
                closed: false,
            }),
        }
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().await
    }
}
