//! UseCase: 矩形の配置・移動
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PlaceRectUseCase::execute() メソッド
//! - 所有者・色のスタンプ、重なり判定、所有権の検証
//!
//! ### なぜこのテストが必要か
//! - キャンバス上の矩形が常に互いに重ならないことを保証する
//! - 却下された配置が誰にも配信されないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規配置、同じ id での移動
//! - 異常系：重なり、他人の id、hello 前の配置
//! - エッジケース：辺が接するだけの矩形

use std::sync::Arc;

use crate::domain::{ConnectionId, DomainError, Rect, RectProposal, ServerEvent};

use super::{error::PlaceRectError, hub::CanvasHub};

/// 矩形配置のユースケース
pub struct PlaceRectUseCase {
    hub: Arc<CanvasHub>,
}

impl PlaceRectUseCase {
    /// 新しい PlaceRectUseCase を作成
    pub fn new(hub: Arc<CanvasHub>) -> Self {
        Self { hub }
    }

    /// 矩形を配置し、受理されたら全接続にブロードキャストする
    ///
    /// クライアントが送ってきた owner / color は無視され、
    /// 接続に紐付いた参加者とその色がスタンプされる。
    ///
    /// # Returns
    ///
    /// * `Ok(Rect)` - 保存された矩形
    /// * `Err(PlaceRectError)` - 却下（送信者にも通知されない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        proposal: RectProposal,
    ) -> Result<Rect, PlaceRectError> {
        let mut guard = self.hub.lock().await;
        let state = &mut *guard;

        let rect = state
            .session
            .place(connection_id, proposal)
            .map_err(|e| match e {
                DomainError::Overlap {
                    candidate,
                    existing,
                } => PlaceRectError::Overlap {
                    candidate,
                    existing,
                },
                DomainError::NotOwner(id) => PlaceRectError::NotOwner(id),
                _ => PlaceRectError::NotJoined(connection_id),
            })?;

        state.broadcast(&ServerEvent::RectPlaced(rect.clone()));
        tracing::debug!(
            "Rect '{}' placed by '{}' with color {}",
            rect.id,
            rect.owner,
            rect.color
        );
        Ok(rect)
    }
}
