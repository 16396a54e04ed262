//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 最後の接続が切れた参加者の矩形削除と色の解放
//!
//! ### なぜこのテストが必要か
//! - 切断した参加者の矩形が他の参加者の画面から消えることを保証する
//! - 同じ参加者の別接続が残っている間は何も消えないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：唯一の接続の切断、複数接続のうち 1 本の切断
//! - エッジケース：hello 前の接続の切断、二重の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, Departure, ServerEvent};

use super::hub::CanvasHub;

/// 切断処理のユースケース
pub struct DisconnectParticipantUseCase {
    hub: Arc<CanvasHub>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(hub: Arc<CanvasHub>) -> Self {
        Self { hub }
    }

    /// 接続を取り除く
    ///
    /// 1. 送信チャンネルを破棄
    /// 2. 接続レジストリから削除
    /// 3. 参加者の最後の接続だった場合、その参加者の矩形を削除して色を解放
    /// 4. 削除した矩形ごとに remove を残りの全接続にブロードキャスト
    ///
    /// # Returns
    ///
    /// * `Some(Departure)` - 取り除いた結果
    /// * `None` - 登録されていない接続（二重の切断など）
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<Departure> {
        let mut guard = self.hub.lock().await;
        let state = &mut *guard;

        state.pusher.unregister_client(&connection_id);
        let departure = state.session.disconnect(connection_id)?;

        for rect_id in &departure.removed_rects {
            state.broadcast(&ServerEvent::RectRemoved(rect_id.clone()));
        }

        match (&departure.participant, departure.released_color) {
            (Some(participant), Some(color)) => tracing::info!(
                "Participant '{}' left; released color {} and removed {} rect(s)",
                participant,
                color,
                departure.removed_rects.len()
            ),
            (Some(participant), None) => tracing::debug!(
                "Connection {} of '{}' closed; other connections remain",
                connection_id,
                participant
            ),
            (None, _) => tracing::debug!("Unbound connection {} closed", connection_id),
        }

        Some(departure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        infrastructure::dto::websocket::{MessageType, WsMessage},
        usecase::{PlaceRectUseCase, test_support::*},
    };

    #[tokio::test]
    async fn test_last_connection_removes_rects_and_releases_color() {
        // テスト項目: 唯一の接続が切れると、その参加者の矩形が remove で通知され色が解放される
        // given (前提条件):
        let hub = create_test_hub();
        let (conn_a, _rx_a) = join(&hub, "a").await;
        let (_conn_b, mut rx_b) = join(&hub, "b").await;
        let place = PlaceRectUseCase::new(hub.clone());
        place.execute(conn_a, proposal("r1", 0.0, 0.0, 10.0, 10.0)).await.unwrap();
        place.execute(conn_a, proposal("r2", 20.0, 0.0, 10.0, 10.0)).await.unwrap();
        drain(&mut rx_b);

        // when (操作):
        let departure = DisconnectParticipantUseCase::new(hub.clone())
            .execute(conn_a)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(departure.participant, Some(pid("a")));
        assert_eq!(departure.released_color.map(|c| c.value()), Some(0));
        assert_eq!(
            drain(&mut rx_b),
            vec![WsMessage::remove("r1"), WsMessage::remove("r2")]
        );
        let state = hub.lock().await;
        assert!(state.session.canvas().is_empty());
        assert_eq!(state.session.colors().len(), 1);
    }

    #[tokio::test]
    async fn test_released_color_is_reused_by_next_participant() {
        // テスト項目: 解放された色は次の参加者に割り当てられる
        // given (前提条件):
        let hub = create_test_hub();
        let (conn_a, _rx_a) = join(&hub, "a").await;
        let (_conn_b, _rx_b) = join(&hub, "b").await;
        DisconnectParticipantUseCase::new(hub.clone())
            .execute(conn_a)
            .await
            .unwrap();

        // when (操作):
        let (_conn_c, mut rx_c) = join(&hub, "c").await;

        // then (期待する結果):
        let welcome = drain(&mut rx_c)
            .into_iter()
            .find(|m| m.r#type == MessageType::Welcome)
            .unwrap();
        assert_eq!(welcome.color, Some(0));
    }

    #[tokio::test]
    async fn test_other_connection_keeps_rects_alive() {
        // テスト項目: 同じ参加者の別接続が残っている間は矩形も色も残る
        // given (前提条件):
        let hub = create_test_hub();
        let (first, _rx_first) = join(&hub, "a").await;
        let (_second, mut rx_second) = join(&hub, "a").await;
        PlaceRectUseCase::new(hub.clone())
            .execute(first, proposal("r1", 0.0, 0.0, 10.0, 10.0))
            .await
            .unwrap();
        drain(&mut rx_second);

        // when (操作):
        let departure = DisconnectParticipantUseCase::new(hub.clone())
            .execute(first)
            .await
            .unwrap();

        // then (期待する結果):
        assert!(departure.removed_rects.is_empty());
        assert_eq!(departure.released_color, None);
        assert!(drain(&mut rx_second).is_empty());
        assert_eq!(hub.lock().await.session.canvas().len(), 1);
    }

    #[tokio::test]
    async fn test_unbound_and_repeated_disconnects() {
        // テスト項目: hello 前の接続の切断は何も通知せず、二重の切断は None を返す
        // given (前提条件):
        let hub = create_test_hub();
        let (_joined, mut rx_joined) = join(&hub, "a").await;
        let (conn, _rx) = connect(&hub).await;
        drain(&mut rx_joined);
        let usecase = DisconnectParticipantUseCase::new(hub.clone());

        // when (操作):
        let first = usecase.execute(conn).await;
        let second = usecase.execute(conn).await;

        // then (期待する結果):
        assert_eq!(first, Some(Departure::default()));
        assert_eq!(second, None);
        assert!(drain(&mut rx_joined).is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_closes_outbound_channel() {
        // テスト項目: 切断すると接続の送信チャンネルが閉じる
        // given (前提条件):
        let hub = create_test_hub();
        let (conn, mut rx) = join(&hub, "a").await;
        drain(&mut rx);

        // when (操作):
        DisconnectParticipantUseCase::new(hub.clone()).execute(conn).await;

        // then (期待する結果):
        assert_eq!(rx.recv().await, None);
    }
}
