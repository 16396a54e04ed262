//! DTO とドメインエンティティの変換

use sumi_shared::time::millis_to_rfc3339;

use crate::domain::{
    Bounds, CanvasSnapshot, CappedText, ColorAssignment, DomainError, Rect, RectId,
    RectProposal, ServerEvent, TextDrop, TextDropProposal,
};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::RectDto> for RectProposal {
    type Error = DomainError;

    /// `owner` と `color` はここで捨てる。ハブが自分の値を付ける
    fn try_from(dto: dto::RectDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RectId::new(dto.id)?,
            bounds: Bounds::new(dto.x, dto.y, dto.w, dto.h)?,
            text: dto.text.filter(|t| !t.is_empty()).map(CappedText::new),
        })
    }
}

impl TryFrom<dto::DropDto> for TextDropProposal {
    type Error = DomainError;

    fn try_from(dto: dto::DropDto) -> Result<Self, Self::Error> {
        if ![dto.x, dto.y, dto.font_px].iter().all(|v| v.is_finite()) {
            return Err(DomainError::NonFiniteGeometry);
        }
        Ok(Self {
            id: dto.id,
            text: CappedText::new(dto.text),
            x: dto.x,
            y: dto.y,
            font_px: dto.font_px,
        })
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&Rect> for dto::RectDto {
    fn from(rect: &Rect) -> Self {
        Self {
            id: rect.id.as_str().to_string(),
            owner: rect.owner.as_str().to_string(),
            x: rect.bounds.x,
            y: rect.bounds.y,
            w: rect.bounds.w,
            h: rect.bounds.h,
            color: i64::from(rect.color.value()),
            text: rect.text.as_ref().map(|t| t.as_str().to_string()),
        }
    }
}

impl From<&TextDrop> for dto::DropDto {
    fn from(drop: &TextDrop) -> Self {
        Self {
            id: drop.id.clone(),
            owner: drop.owner.as_str().to_string(),
            text: drop.text.as_str().to_string(),
            x: drop.x,
            y: drop.y,
            font_px: drop.font_px,
        }
    }
}

impl From<&ServerEvent> for dto::WsMessage {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::Presence { participant, color } => {
                dto::WsMessage::presence(participant.as_str(), i64::from(color.value()))
            }
            ServerEvent::Welcome { participant, color } => {
                dto::WsMessage::welcome(participant.as_str(), i64::from(color.value()))
            }
            ServerEvent::RectPlaced(rect) => dto::WsMessage::rect(rect.into()),
            ServerEvent::RectRemoved(id) => dto::WsMessage::remove(id.as_str()),
            ServerEvent::Dropped(drop) => dto::WsMessage::text_drop(drop.into()),
            ServerEvent::Error { message } => dto::WsMessage::error(message.as_str()),
        }
    }
}

impl From<&ColorAssignment> for http::PresenceDto {
    fn from(assignment: &ColorAssignment) -> Self {
        Self {
            user_id: assignment.participant.as_str().to_string(),
            color: i64::from(assignment.color.value()),
            assigned_at: millis_to_rfc3339(assignment.assigned_at),
        }
    }
}

impl From<&CanvasSnapshot> for http::CanvasStateDto {
    fn from(snapshot: &CanvasSnapshot) -> Self {
        Self {
            connections: snapshot.connections,
            participants: snapshot.presence.iter().map(Into::into).collect(),
            rects: snapshot.rects.iter().map(Into::into).collect(),
        }
    }
}

/// ドメインイベントをテキストフレーム 1 つにエンコードする
pub fn encode_event(event: &ServerEvent) -> Result<String, serde_json::Error> {
    dto::WsMessage::from(event).encode()
}
