//! UseCase: 接続受付と参加（hello）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::register() / execute() メソッド
//! - 色の割り当て、presence のブロードキャスト、welcome とスナップショットの再送
//!
//! ### なぜこのテストが必要か
//! - 新しく参加した接続が他の参加者と同じ状態を再構築できることを保証する
//! - 8 人目の参加者が明示的に拒否され、接続が閉じられることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の hello、同じ参加者の再接続
//! - 異常系：定員超過、join 済み接続からの hello、シャットダウン後の接続
//! - エッジケース：既存の矩形があるキャンバスへの参加

use std::sync::Arc;

use crate::domain::{
    ColorIndex, ConnectionId, ConnectionIdFactory, DomainError, ParticipantId, PusherChannel,
    ServerEvent,
};

use super::{error::ConnectError, hub::CanvasHub};

/// 接続受付・参加のユースケース
pub struct ConnectParticipantUseCase {
    hub: Arc<CanvasHub>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(hub: Arc<CanvasHub>) -> Self {
        Self { hub }
    }

    /// 新しい接続を未参加の状態で登録する
    ///
    /// # Arguments
    ///
    /// * `sender` - 接続への送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionId)` - 登録された接続ハンドル
    /// * `Err(ConnectError::ShuttingDown)` - シャットダウン後の接続
    pub async fn register(&self, sender: PusherChannel) -> Result<ConnectionId, ConnectError> {
        let mut guard = self.hub.lock().await;
        let state = &mut *guard;
        if state.closed {
            return Err(ConnectError::ShuttingDown);
        }

        let connection_id = ConnectionIdFactory::generate();
        state
            .session
            .connect(connection_id)
            .map_err(|_| ConnectError::DuplicateConnection(connection_id))?;
        state.pusher.register_client(connection_id, sender);

        tracing::debug!(
            "Connection {} registered ({} live)",
            connection_id,
            state.session.registry().len()
        );
        Ok(connection_id)
    }

    /// hello を処理する
    ///
    /// 1. 色を割り当てる（既に持っていれば再利用）
    /// 2. 接続に参加者を紐付ける
    /// 3. 新規の参加者なら presence を全接続にブロードキャスト
    /// 4. 参加した接続に welcome、presence スナップショット、矩形スナップショットを送る
    ///
    /// 定員超過の場合は error イベントを送ってから接続の送信チャンネルを閉じる。
    ///
    /// # Returns
    ///
    /// * `Ok(ColorIndex)` - 参加者の色
    /// * `Err(ConnectError)` - 参加失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        participant: ParticipantId,
    ) -> Result<ColorIndex, ConnectError> {
        let mut guard = self.hub.lock().await;
        let state = &mut *guard;

        let outcome = match state.session.join(connection_id, participant) {
            Ok(outcome) => outcome,
            Err(DomainError::CapacityExceeded) => {
                let event = ServerEvent::Error {
                    message: DomainError::CapacityExceeded.to_string(),
                };
                state.push_to(&connection_id, &event);
                // キューに積んだ error を送り切ってから writer が接続を閉じる
                state.pusher.unregister_client(&connection_id);
                return Err(ConnectError::CapacityExceeded);
            }
            Err(DomainError::AlreadyBound(_)) => {
                return Err(ConnectError::AlreadyJoined(connection_id));
            }
            Err(_) => return Err(ConnectError::UnknownConnection(connection_id)),
        };

        if outcome.newly_assigned {
            state.broadcast(&ServerEvent::Presence {
                participant: outcome.participant.clone(),
                color: outcome.color,
            });
        }

        state.push_to(
            &connection_id,
            &ServerEvent::Welcome {
                participant: outcome.participant.clone(),
                color: outcome.color,
            },
        );
        for assignment in outcome.presence {
            state.push_to(
                &connection_id,
                &ServerEvent::Presence {
                    participant: assignment.participant,
                    color: assignment.color,
                },
            );
        }
        let replayed = outcome.rects.len();
        for rect in outcome.rects {
            state.push_to(&connection_id, &ServerEvent::RectPlaced(rect));
        }

        tracing::info!(
            "Participant '{}' joined with color {} on connection {} (replayed {} rect(s))",
            outcome.participant,
            outcome.color,
            connection_id,
            replayed
        );
        Ok(outcome.color)
    }
}
