//! キャンバスハブの DTO（Data Transfer Object）
//!
//! プロトコルごとに分けている:
//! - `websocket`: WebSocket メッセージの DTO
//! - `http`: HTTP API レスポンスの DTO

pub mod conversion;
pub mod http;
pub mod websocket;
