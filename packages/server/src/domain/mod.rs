//! ドメイン層: キャンバスセッションのモデル
//!
//! ここにあるものは全て同期的で I/O を持たない。UseCase 層は 1 つの [`Session`] を
//! 1 つのロックの内側に持ち、その結果を [`ServerEvent`] に変換して
//! [`MessagePusher`] で送信する。

pub mod canvas;
pub mod color;
pub mod entity;
pub mod error;
pub mod event;
pub mod pusher;
pub mod registry;
pub mod session;
pub mod value_object;

pub use canvas::Canvas;
pub use color::{ColorAssignment, ColorGrant, ColorTable};
pub use entity::{Bounds, Rect, RectProposal, TextDrop, TextDropProposal};
pub use error::{DomainError, MessagePushError};
pub use event::ServerEvent;
pub use pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use pusher::MockMessagePusher;
pub use registry::{ConnectionRegistry, Unregistered};
pub use session::{CanvasSnapshot, Departure, JoinOutcome, Session};
pub use value_object::{
    COLOR_SLOTS, CappedText, ColorIndex, ConnectionId, ConnectionIdFactory, ParticipantId, RectId,
    TEXT_MAX_CHARS,
};
