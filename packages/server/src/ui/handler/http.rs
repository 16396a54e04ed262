//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::CanvasStateDto, ui::state::AppState};

/// Health check endpoint
pub async fn healthz() -> &'static str {
    "ok"
}

/// Debug endpoint dumping presence and rectangles
pub async fn debug_canvas(State(state): State<Arc<AppState>>) -> Json<CanvasStateDto> {
    let snapshot = state.get_canvas_state_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(CanvasStateDto::from(&snapshot))
}
