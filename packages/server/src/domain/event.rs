//! ハブが接続に送るイベント

use super::{
    entity::{Rect, TextDrop},
    value_object::{ColorIndex, ParticipantId, RectId},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// 参加者が識別色を保持している
    Presence {
        participant: ParticipantId,
        color: ColorIndex,
    },
    /// 参加者本人に自分の色を伝える挨拶
    Welcome {
        participant: ParticipantId,
        color: ColorIndex,
    },
    /// 矩形が配置または置き換えられた
    RectPlaced(Rect),
    /// 矩形がキャンバスから取り除かれた
    RectRemoved(RectId),
    /// 一度だけ表示するドロップ
    Dropped(TextDrop),
    /// 接続を拒否する
    Error { message: String },
}

impl ServerEvent {
    /// ログ出力用の短い名前
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::Presence { .. } => "presence",
            ServerEvent::Welcome { .. } => "welcome",
            ServerEvent::RectPlaced(_) => "rect",
            ServerEvent::RectRemoved(_) => "remove",
            ServerEvent::Dropped(_) => "drop",
            ServerEvent::Error { .. } => "error",
        }
    }
}
