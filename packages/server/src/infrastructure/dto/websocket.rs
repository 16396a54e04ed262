//! WebSocket メッセージの DTO
//!
//! フレームは全て `type` フィールドを持つ JSON オブジェクト 1 つ。ペイロードの
//! フィールドは、その type で意味を持つときだけ含まれる。

use serde::{Deserialize, Serialize};

/// `type` フィールドの値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Hello,
    Rect,
    Remove,
    Drop,
    Presence,
    Welcome,
    Error,
    /// このハブが知らない type。無視される
    #[serde(other)]
    Unknown,
}

/// 通信上の矩形レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectDto {
    #[serde(default)]
    pub id: String,
    /// 受信時は無視し、ハブが所有者を付ける
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub w: f64,
    #[serde(default)]
    pub h: f64,
    /// 受信時は無視し、ハブが所有者の色を付ける
    #[serde(default)]
    pub color: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// 通信上のドロップレコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropDto {
    #[serde(default)]
    pub id: String,
    /// 受信時は無視し、ハブが所有者を付ける
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub font_px: f64,
}

/// WebSocket フレーム 1 つ（送受信共通）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsMessage {
    pub r#type: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<RectDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop: Option<DropDto>,
}

impl WsMessage {
    fn empty(r#type: MessageType) -> Self {
        Self {
            r#type,
            user_id: None,
            rect: None,
            rect_id: None,
            color: None,
            message: None,
            drop: None,
        }
    }

    pub fn hello(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::empty(MessageType::Hello)
        }
    }

    pub fn rect(rect: RectDto) -> Self {
        Self {
            rect: Some(rect),
            ..Self::empty(MessageType::Rect)
        }
    }

    pub fn remove(rect_id: impl Into<String>) -> Self {
        Self {
            rect_id: Some(rect_id.into()),
            ..Self::empty(MessageType::Remove)
        }
    }

    pub fn text_drop(drop: DropDto) -> Self {
        Self {
            drop: Some(drop),
            ..Self::empty(MessageType::Drop)
        }
    }

    pub fn presence(user_id: impl Into<String>, color: i64) -> Self {
        Self {
            user_id: Some(user_id.into()),
            color: Some(color),
            ..Self::empty(MessageType::Presence)
        }
    }

    pub fn welcome(user_id: impl Into<String>, color: i64) -> Self {
        Self {
            user_id: Some(user_id.into()),
            color: Some(color),
            ..Self::empty(MessageType::Welcome)
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::empty(MessageType::Error)
        }
    }

    /// テキストフレームをデコードする
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// JSON を含むバイナリフレームをデコードする
    pub fn decode_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
