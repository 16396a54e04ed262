//! 接続レジストリ: 生きている接続と、それぞれに紐付いた参加者

use std::collections::HashMap;

use super::{
    error::DomainError,
    value_object::{ConnectionId, ParticipantId},
};

/// [`ConnectionRegistry::unregister`] が取り除いたもの
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unregistered {
    /// hello を完了していない接続だった
    Unbound,
    /// `participant` に紐付いた接続だった
    Bound {
        participant: ParticipantId,
        /// この参加者に紐付いた接続がもう残っていない
        last_connection: bool,
    },
}

#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Option<ParticipantId>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未紐付けの接続を追加する
    pub fn register(&mut self, connection_id: ConnectionId) -> Result<(), DomainError> {
        if self.connections.contains_key(&connection_id) {
            return Err(DomainError::DuplicateConnection(connection_id));
        }
        self.connections.insert(connection_id, None);
        Ok(())
    }

    /// 接続がどの参加者を表すかを記録する
    ///
    /// 同じ参加者への再度の紐付けは何もしない。接続は最初の紐付けを保持し、
    /// 別の参加者への付け替えは拒否する。
    pub fn bind(
        &mut self,
        connection_id: ConnectionId,
        participant: ParticipantId,
    ) -> Result<(), DomainError> {
        let slot = self
            .connections
            .get_mut(&connection_id)
            .ok_or(DomainError::UnknownConnection(connection_id))?;

        match slot.as_ref() {
            Some(bound) if *bound == participant => Ok(()),
            Some(_) => Err(DomainError::AlreadyBound(connection_id)),
            None => {
                *slot = Some(participant);
                Ok(())
            }
        }
    }

    /// 接続を取り除く。未登録なら `None`
    pub fn unregister(&mut self, connection_id: ConnectionId) -> Option<Unregistered> {
        let participant = self.connections.remove(&connection_id)?;
        Some(match participant {
            None => Unregistered::Unbound,
            Some(participant) => {
                let last_connection = self.connection_count(&participant) == 0;
                Unregistered::Bound {
                    participant,
                    last_connection,
                }
            }
        })
    }

    pub fn contains(&self, connection_id: ConnectionId) -> bool {
        self.connections.contains_key(&connection_id)
    }

    /// 接続に紐付いた参加者（参加済みの場合）
    pub fn participant_of(&self, connection_id: ConnectionId) -> Option<&ParticipantId> {
        self.connections.get(&connection_id)?.as_ref()
    }

    /// 参加者に紐付いている接続の数
    pub fn connection_count(&self, participant: &ParticipantId) -> usize {
        self.connections
            .values()
            .filter(|bound| bound.as_ref() == Some(participant))
            .count()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
