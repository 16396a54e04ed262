//! ドメインエンティティ: 矩形とドロップ

use super::{
    error::DomainError,
    value_object::{CappedText, ColorIndex, ParticipantId, RectId},
};

/// 軸に平行な矩形領域
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Result<Self, DomainError> {
        if [x, y, w, h].iter().all(|v| v.is_finite()) {
            Ok(Self { x, y, w, h })
        } else {
            Err(DomainError::NonFiniteGeometry)
        }
    }

    /// 辺が接しているだけなら重なりとはみなさない
    pub fn overlaps(&self, other: &Bounds) -> bool {
        !(self.x + self.w <= other.x
            || other.x + other.w <= self.x
            || self.y + self.h <= other.y
            || other.y + other.h <= self.y)
    }
}

/// クライアントが送ってきた矩形。所有者と色はまだサーバーが付けていない
#[derive(Debug, Clone, PartialEq)]
pub struct RectProposal {
    pub id: RectId,
    pub bounds: Bounds,
    pub text: Option<CappedText>,
}

/// キャンバスが保持する矩形
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub id: RectId,
    pub owner: ParticipantId,
    pub bounds: Bounds,
    pub color: ColorIndex,
    pub text: Option<CappedText>,
}

impl Rect {
    /// 提案から保存用のレコードを作る。所有者と色は常にサーバー側の値を使い、
    /// クライアントのペイロードの値は使わない
    pub fn stamp(proposal: RectProposal, owner: ParticipantId, color: ColorIndex) -> Self {
        Self {
            id: proposal.id,
            owner,
            bounds: proposal.bounds,
            color,
            text: proposal.text,
        }
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.bounds.overlaps(&other.bounds)
    }
}

/// クライアントが送ってきたドロップ
#[derive(Debug, Clone, PartialEq)]
pub struct TextDropProposal {
    pub id: String,
    pub text: CappedText,
    pub x: f64,
    pub y: f64,
    pub font_px: f64,
}

/// 一度だけブロードキャストされ、保存されないテキスト注釈
#[derive(Debug, Clone, PartialEq)]
pub struct TextDrop {
    pub id: String,
    pub owner: ParticipantId,
    pub text: CappedText,
    pub x: f64,
    pub y: f64,
    pub font_px: f64,
}

impl TextDrop {
    pub fn stamp(proposal: TextDropProposal, owner: ParticipantId) -> Self {
        Self {
            id: proposal.id,
            owner,
            text: proposal.text,
            x: proposal.x,
            y: proposal.y,
            font_px: proposal.font_px,
        }
    }
}
