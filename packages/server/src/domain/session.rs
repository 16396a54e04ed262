//! Session 集約: ハブが共有する状態
//!
//! 接続レジストリ、色テーブル、キャンバスは 1 つの整合性の単位をなす。
//! これらには [`Session`] を通してのみ触れる。UseCase 層は `Session` を 1 つの
//! ロックの内側に置くため、以下の各操作は常に確定した状態を見て、確定した
//! 状態を残す。

use std::sync::Arc;

use sumi_shared::time::{Clock, SystemClock};

use super::{
    canvas::Canvas,
    color::{ColorAssignment, ColorTable},
    entity::{Rect, RectProposal, TextDrop, TextDropProposal},
    error::DomainError,
    registry::{ConnectionRegistry, Unregistered},
    value_object::{ColorIndex, ConnectionId, ParticipantId, RectId},
};

/// hello 成功時の結果
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    pub participant: ParticipantId,
    pub color: ColorIndex,
    /// この hello の前には色を保持していなかった
    pub newly_assigned: bool,
    /// 紐付け直後の presence 状態（色スロット順）
    pub presence: Vec<ColorAssignment>,
    /// 紐付け直後のキャンバス状態（矩形 id 順）
    pub rects: Vec<Rect>,
}

/// 切断の結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Departure {
    /// 接続が紐付いていた参加者
    pub participant: Option<ParticipantId>,
    /// 参加者の最後の接続が切れたため削除された矩形
    pub removed_rects: Vec<RectId>,
    /// 参加者の最後の接続が切れたため解放された色
    pub released_color: Option<ColorIndex>,
}

/// presence とキャンバスの一貫したビュー
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSnapshot {
    pub presence: Vec<ColorAssignment>,
    pub rects: Vec<Rect>,
    pub connections: usize,
}

pub struct Session {
    registry: ConnectionRegistry,
    colors: ColorTable,
    canvas: Canvas,
    clock: Arc<dyn Clock>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl Session {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            colors: ColorTable::new(),
            canvas: Canvas::new(),
            clock,
        }
    }

    /// 受け付けたばかりの未紐付けの接続を登録する
    pub fn connect(&mut self, connection_id: ConnectionId) -> Result<(), DomainError> {
        self.registry.register(connection_id)
    }

    /// hello を処理する: 参加者の色を割り当てる（または再利用する）
    /// 接続をその参加者に紐付ける
    ///
    /// # Errors
    ///
    /// * [`DomainError::UnknownConnection`] - 接続が未登録
    /// * [`DomainError::AlreadyBound`] - 接続は参加済み
    /// * [`DomainError::CapacityExceeded`] - 全ての色が使用中
    pub fn join(
        &mut self,
        connection_id: ConnectionId,
        participant: ParticipantId,
    ) -> Result<JoinOutcome, DomainError> {
        if !self.registry.contains(connection_id) {
            return Err(DomainError::UnknownConnection(connection_id));
        }
        if self.registry.participant_of(connection_id).is_some() {
            return Err(DomainError::AlreadyBound(connection_id));
        }

        let grant = self
            .colors
            .assign_or_reuse(&participant, self.clock.now_millis())?;
        self.registry.bind(connection_id, participant.clone())?;

        Ok(JoinOutcome {
            participant,
            color: grant.color(),
            newly_assigned: grant.is_new(),
            presence: self.colors.snapshot(),
            rects: self.canvas.snapshot(),
        })
    }

    /// 接続に紐付いた参加者として矩形を配置する
    pub fn place(
        &mut self,
        connection_id: ConnectionId,
        proposal: RectProposal,
    ) -> Result<Rect, DomainError> {
        let (owner, color) = self.bound_participant(connection_id)?;
        self.canvas.place(proposal, &owner, color)
    }

    /// 紐付いた参加者をドロップに付ける。何も保存しない
    pub fn drop_text(
        &self,
        connection_id: ConnectionId,
        proposal: TextDropProposal,
    ) -> Result<TextDrop, DomainError> {
        let (owner, _) = self.bound_participant(connection_id)?;
        Ok(TextDrop::stamp(proposal, owner))
    }

    /// 接続を取り除く。参加者の最後の接続だった場合は、その参加者の
    /// 矩形を削除し、色を解放する。
    ///
    /// 接続が未登録なら `None` を返す。
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> Option<Departure> {
        let departure = match self.registry.unregister(connection_id)? {
            Unregistered::Unbound => Departure::default(),
            Unregistered::Bound {
                participant,
                last_connection: false,
            } => Departure {
                participant: Some(participant),
                ..Departure::default()
            },
            Unregistered::Bound {
                participant,
                last_connection: true,
            } => {
                let removed_rects = self.canvas.remove_owned_by(&participant);
                let released_color = self.colors.release(&participant);
                Departure {
                    participant: Some(participant),
                    removed_rects,
                    released_color,
                }
            }
        };
        Some(departure)
    }

    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            presence: self.colors.snapshot(),
            rects: self.canvas.snapshot(),
            connections: self.registry.len(),
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn bound_participant(
        &self,
        connection_id: ConnectionId,
    ) -> Result<(ParticipantId, ColorIndex), DomainError> {
        let participant = self
            .registry
            .participant_of(connection_id)
            .ok_or(DomainError::NotBound(connection_id))?;
        // 紐付いた参加者は必ず色を持っている
        let color = self
            .colors
            .color_of(participant)
            .ok_or(DomainError::NotBound(connection_id))?;
        Ok((participant.clone(), color))
    }
}
