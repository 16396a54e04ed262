//! UseCase: ハブのシャットダウン

use std::sync::Arc;

use super::hub::CanvasHub;

/// シャットダウンのユースケース
pub struct ShutdownHubUseCase {
    hub: Arc<CanvasHub>,
}

impl ShutdownHubUseCase {
    pub fn new(hub: Arc<CanvasHub>) -> Self {
        Self { hub }
    }

    /// 新しい接続の受付を止め、全接続の送信チャンネルを閉じる
    ///
    /// 各接続の writer はキューに残ったフレームを送り切ってから Close を送る。
    /// 何度呼んでもよい。
    ///
    /// # Returns
    ///
    /// 閉じた接続の数
    pub async fn execute(&self) -> usize {
        let mut state = self.hub.lock().await;
        state.closed = true;
        let closed = state.pusher.close_all();
        tracing::info!("Hub closed; closing {} connection(s)", closed);
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::*;

    #[tokio::test]
    async fn test_shutdown_closes_every_channel() {
        // テスト項目: シャットダウンで全接続の送信チャンネルが閉じる
        // given (前提条件):
        let hub = create_test_hub();
        let (_a, mut rx_a) = join(&hub, "a").await;
        let (_b, mut rx_b) = connect(&hub).await;
        drain(&mut rx_a);

        // when (操作):
        let closed = ShutdownHubUseCase::new(hub.clone()).execute().await;

        // then (期待する結果):
        assert_eq!(closed, 2);
        assert_eq!(rx_a.recv().await, None);
        assert_eq!(rx_b.recv().await, None);
        assert!(hub.lock().await.closed);
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        // テスト項目: 2 回目のシャットダウンは何も閉じない
        // given (前提条件):
        let hub = create_test_hub();
        let usecase = ShutdownHubUseCase::new(hub.clone());
        usecase.execute().await;

        // when (操作):
        let closed = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(closed, 0);
    }
}
