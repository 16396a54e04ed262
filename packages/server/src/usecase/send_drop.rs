//! UseCase: テキストドロップの配信
//!
//! ドロップは保存されず、受け取った時点の接続にだけ一度配信されます。

use std::sync::Arc;

use crate::domain::{ConnectionId, ServerEvent, TextDrop, TextDropProposal};

use super::{error::SendDropError, hub::CanvasHub};

/// テキストドロップ配信のユースケース
pub struct SendDropUseCase {
    hub: Arc<CanvasHub>,
}

impl SendDropUseCase {
    /// 新しい SendDropUseCase を作成
    pub fn new(hub: Arc<CanvasHub>) -> Self {
        Self { hub }
    }

    /// 送信者の id でスタンプしたドロップを全接続にブロードキャストする
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        proposal: TextDropProposal,
    ) -> Result<TextDrop, SendDropError> {
        let state = self.hub.lock().await;

        let text_drop = state
            .session
            .drop_text(connection_id, proposal)
            .map_err(|_| SendDropError::NotJoined(connection_id))?;

        state.broadcast(&ServerEvent::Dropped(text_drop.clone()));
        tracing::debug!("Drop '{}' sent by '{}'", text_drop.id, text_drop.owner);
        Ok(text_drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{CappedText, TEXT_MAX_CHARS},
        infrastructure::dto::websocket::MessageType,
        usecase::test_support::*,
    };

    fn drop_proposal(text: &str) -> TextDropProposal {
        TextDropProposal {
            id: "d1".to_string(),
            text: CappedText::new(text.to_string()),
            x: 12.0,
            y: 34.0,
            font_px: 16.0,
        }
    }

    #[tokio::test]
    async fn test_drop_is_broadcast_and_not_stored() {
        // テスト項目: ドロップは送信者の id でスタンプされて全接続に届き、保存されない
        // given (前提条件):
        let hub = create_test_hub();
        let (conn_a, mut rx_a) = join(&hub, "a").await;
        let (_conn_b, mut rx_b) = join(&hub, "b").await;
        drain(&mut rx_a);
        drain(&mut rx_b);

        // when (操作):
        SendDropUseCase::new(hub.clone())
            .execute(conn_a, drop_proposal("hello"))
            .await
            .unwrap();

        // then (期待する結果):
        for rx in [&mut rx_a, &mut rx_b] {
            let frames = drain(rx);
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0].r#type, MessageType::Drop);
            let dto = frames[0].drop.clone().unwrap();
            assert_eq!(dto.owner, "a");
            assert_eq!(dto.text, "hello");
            assert_eq!(dto.font_px, 16.0);
        }

        // 後から参加した接続には再送されない
        let (_conn_c, mut rx_c) = join(&hub, "c").await;
        assert!(
            drain(&mut rx_c)
                .iter()
                .all(|m| m.r#type != MessageType::Drop)
        );
    }

    #[tokio::test]
    async fn test_long_drop_text_is_capped() {
        // テスト項目: 200 文字を超えるドロップのテキストは切り詰められて配信される
        // given (前提条件):
        let hub = create_test_hub();
        let (conn, mut rx) = join(&hub, "a").await;
        drain(&mut rx);
        let long = "あ".repeat(TEXT_MAX_CHARS + 50);

        // when (操作):
        SendDropUseCase::new(hub.clone())
            .execute(conn, drop_proposal(&long))
            .await
            .unwrap();

        // then (期待する結果):
        let frames = drain(&mut rx);
        let text = frames[0].drop.clone().unwrap().text;
        assert_eq!(text.chars().count(), TEXT_MAX_CHARS);
    }

    #[tokio::test]
    async fn test_drop_before_hello_is_refused() {
        // テスト項目: hello 前の接続からのドロップは却下され、配信されない
        // given (前提条件):
        let hub = create_test_hub();
        let (_joined, mut rx_joined) = join(&hub, "a").await;
        let (conn, _rx) = connect(&hub).await;
        drain(&mut rx_joined);

        // when (操作):
        let result = SendDropUseCase::new(hub.clone())
            .execute(conn, drop_proposal("x"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(SendDropError::NotJoined(conn)));
        assert!(drain(&mut rx_joined).is_empty());
    }
}
