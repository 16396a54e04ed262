//! HTTP API レスポンスの DTO

use serde::Serialize;

use super::websocket::RectDto;

/// 参加者 1 人分の色の割り当て
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceDto {
    pub user_id: String,
    pub color: i64,
    /// RFC 3339
    pub assigned_at: String,
}

/// `GET /debug/canvas` のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasStateDto {
    pub connections: usize,
    pub participants: Vec<PresenceDto>,
    pub rects: Vec<RectDto>,
}
