//! ドメインのエラー型

use thiserror::Error;

use super::value_object::{ConnectionId, RectId};

/// キャンバスセッションに対するドメイン操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 参加者 ID が空
    #[error("participant id must not be empty")]
    InvalidParticipantId,

    /// 矩形 ID が空
    #[error("rect id must not be empty")]
    InvalidRectId,

    /// 色インデックスがパレットの範囲外
    #[error("color index {0} is out of range (0..{max})", max = super::value_object::COLOR_SLOTS)]
    InvalidColorIndex(i64),

    /// 座標に NaN または無限大が含まれる
    #[error("geometry must be finite")]
    NonFiniteGeometry,

    /// 全ての識別色が使用中
    #[error("participant limit reached: at most {max} participants can join", max = super::value_object::COLOR_SLOTS)]
    CapacityExceeded,

    /// 配置がキャンバス上の既存の矩形と重なる
    #[error("rect '{candidate}' overlaps rect '{existing}'")]
    Overlap { candidate: RectId, existing: RectId },

    /// 矩形 ID を他の参加者が保持している
    #[error("rect '{0}' belongs to another participant")]
    NotOwner(RectId),

    /// 接続ハンドルは登録済み
    #[error("connection {0} is already registered")]
    DuplicateConnection(ConnectionId),

    /// 接続ハンドルが未登録
    #[error("connection {0} is not registered")]
    UnknownConnection(ConnectionId),

    /// 接続がまだ hello を完了していない
    #[error("connection {0} has not joined")]
    NotBound(ConnectionId),

    /// 接続はすでに参加者として参加済み
    #[error("connection {0} has already joined")]
    AlreadyBound(ConnectionId),
}

/// 接続へのイベント送信時のエラー
#[derive(Debug, Error)]
pub enum MessagePushError {
    /// 接続の送信チャンネルが登録されていない
    #[error("connection {0} not found")]
    ClientNotFound(ConnectionId),

    /// 送信チャンネルが閉じている
    #[error("push failed: {0}")]
    PushFailed(String),

    /// イベントをシリアライズできなかった
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}
