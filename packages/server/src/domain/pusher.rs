//! MessagePusher trait 定義
//!
//! 接続ごとの送信チャンネルを管理し、イベントを届けるためのインターフェース。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します。
//!
//! ## ロックについて
//!
//! MessagePusher はハブの共有状態と同じロックの内側で使われます。
//! そのため各メソッドは同期的で、送信チャンネルへの enqueue だけを行い、
//! ネットワーク I/O を待ちません。

use tokio::sync::mpsc;

use super::{error::MessagePushError, event::ServerEvent, value_object::ConnectionId};

/// 接続 1 本分の送信チャンネル。要素 1 つがエンコード済みのフレーム 1 つ
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
pub trait MessagePusher: Send {
    /// 接続への配信を開始する
    fn register_client(&mut self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続への配信をやめてチャンネルを破棄する。接続の writer はキューに
    /// 残ったものを書き出してから閉じる。
    /// 接続が未登録なら `false` を返す。
    fn unregister_client(&mut self, connection_id: &ConnectionId) -> bool;

    /// 1 つの接続にイベントを配信する
    fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// 登録済みの全接続にイベントを配信する（ベストエフォート）
    /// キューに積めた接続の数を返す。
    fn broadcast(&self, event: &ServerEvent) -> Result<usize, MessagePushError>;

    /// 全チャンネルを破棄し、閉じた接続の数を返す
    fn close_all(&mut self) -> usize;
}
