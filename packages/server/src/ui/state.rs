//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetCanvasStateUseCase,
    PlaceRectUseCase, SendDropUseCase,
};

use super::config::HeartbeatConfig;

/// State handed to every handler
pub struct AppState {
    /// ConnectParticipantUseCase（接続受付・参加のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// PlaceRectUseCase（矩形配置のユースケース）
    pub place_rect_usecase: Arc<PlaceRectUseCase>,
    /// SendDropUseCase（テキストドロップ配信のユースケース）
    pub send_drop_usecase: Arc<SendDropUseCase>,
    /// DisconnectParticipantUseCase（切断処理のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// GetCanvasStateUseCase（キャンバス状態取得のユースケース）
    pub get_canvas_state_usecase: Arc<GetCanvasStateUseCase>,
    /// 接続ごとの heartbeat 設定
    pub heartbeat: HeartbeatConfig,
}
