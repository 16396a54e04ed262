//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{ConnectionId, RectId};

/// 接続・参加処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// ハブがシャットダウン中
    #[error("hub is shutting down")]
    ShuttingDown,

    /// 接続ハンドルが重複している
    #[error("connection {0} is already registered")]
    DuplicateConnection(ConnectionId),

    /// 接続ハンドルが登録されていない
    #[error("connection {0} is not registered")]
    UnknownConnection(ConnectionId),

    /// 既に hello 済みの接続
    #[error("connection {0} has already joined")]
    AlreadyJoined(ConnectionId),

    /// 参加者数の上限に達している
    #[error("participant limit reached")]
    CapacityExceeded,
}

/// 矩形配置のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceRectError {
    /// hello 前の接続からの配置
    #[error("connection {0} has not joined")]
    NotJoined(ConnectionId),

    /// 既存の矩形と重なる
    #[error("rect '{candidate}' overlaps rect '{existing}'")]
    Overlap { candidate: RectId, existing: RectId },

    /// 他の参加者の rect id
    #[error("rect '{0}' belongs to another participant")]
    NotOwner(RectId),
}

/// drop 送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendDropError {
    /// hello 前の接続からの drop
    #[error("connection {0} has not joined")]
    NotJoined(ConnectionId),
}
