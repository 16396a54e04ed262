//! キャンバスドメインの値オブジェクト

use std::fmt;

use uuid::Uuid;

use super::error::DomainError;

/// 識別色の数。参加者数の上限も兼ねる
pub const COLOR_SLOTS: usize = 7;

/// ドロップテキストと矩形ラベルの最大文字数
pub const TEXT_MAX_CHARS: usize = 200;

/// クライアントが名乗る参加者 ID
///
/// 接続とは 1 対 1 ではない。同じ参加者が複数の接続を同時に持つことも、
/// 切断後に再接続することもある。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::InvalidParticipantId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// クライアントが採番する矩形 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RectId(String);

impl RectId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::InvalidRectId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// [`COLOR_SLOTS`] 色のうちの 1 色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorIndex(u8);

impl ColorIndex {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        match u8::try_from(value) {
            Ok(index) if usize::from(index) < COLOR_SLOTS => Ok(Self(index)),
            _ => Err(DomainError::InvalidColorIndex(value)),
        }
    }

    /// 色テーブルのスロット番号から作成する
    pub(crate) fn from_slot(slot: usize) -> Self {
        debug_assert!(slot < COLOR_SLOTS);
        Self(slot as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ColorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 接続 1 本を指す不透明なハンドル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 接続ハンドルの Factory
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4())
    }
}

/// [`TEXT_MAX_CHARS`] 文字で切り詰めたテキスト
///
/// 上限はバイト数ではなく Unicode スカラー値の数で数えるため、
/// マルチバイト文字の途中で切れることはない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CappedText(String);

impl CappedText {
    pub fn new(value: String) -> Self {
        match value.char_indices().nth(TEXT_MAX_CHARS) {
            Some((cut, _)) => {
                let mut value = value;
                value.truncate(cut);
                Self(value)
            }
            None => Self(value),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
