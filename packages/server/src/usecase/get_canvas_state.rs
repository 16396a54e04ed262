//! UseCase: キャンバス状態の取得（デバッグ用）

use std::sync::Arc;

use crate::domain::CanvasSnapshot;

use super::hub::CanvasHub;

/// キャンバス状態取得のユースケース
pub struct GetCanvasStateUseCase {
    hub: Arc<CanvasHub>,
}

impl GetCanvasStateUseCase {
    pub fn new(hub: Arc<CanvasHub>) -> Self {
        Self { hub }
    }

    /// presence・矩形・接続数の一貫したスナップショットを返す
    pub async fn execute(&self) -> CanvasSnapshot {
        self.hub.lock().await.session.snapshot()
    }
}
