//! UseCase 層
//!
//! ハブの共有状態（[`CanvasHub`]）に対する操作をユースケースごとに定義します。
//! 全てのユースケースは同じ `Arc<CanvasHub>` を共有し、1 回の操作につき
//! 1 回だけロックを取って「検証 → 変更 → ファンアウト」を完了させます。

mod connect_participant;
mod disconnect_participant;
mod error;
mod get_canvas_state;
mod hub;
mod place_rect;
mod send_drop;
mod shutdown_hub;

#[cfg(test)]
mod test_support;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, PlaceRectError, SendDropError};
pub use get_canvas_state::GetCanvasStateUseCase;
pub use hub::CanvasHub;
pub use place_rect::PlaceRectUseCase;
pub use send_drop::SendDropUseCase;
pub use shutdown_hub::ShutdownHubUseCase;
