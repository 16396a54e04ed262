//! 識別色の割り当て
//!
//! 参加者 1 人につき [`COLOR_SLOTS`] 色のうち最大 1 色を持つ。割り当ては先着順で、
//! 常に空いている最小のスロットを使う。結果は参加の順序だけで決まる。

use super::{
    error::DomainError,
    value_object::{COLOR_SLOTS, ColorIndex, ParticipantId},
};

/// 参加者が保持している識別色
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorAssignment {
    pub participant: ParticipantId,
    pub color: ColorIndex,
    /// 最初に色が割り当てられた時刻（Unix ミリ秒）
    pub assigned_at: i64,
}

/// [`ColorTable::assign_or_reuse`] の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorGrant {
    /// 参加者がすでに保持していた色
    Reused(ColorIndex),
    /// 新しい参加者に空きスロットを割り当てた
    Assigned(ColorIndex),
}

impl ColorGrant {
    pub fn color(self) -> ColorIndex {
        match self {
            ColorGrant::Reused(color) | ColorGrant::Assigned(color) => color,
        }
    }

    pub fn is_new(self) -> bool {
        matches!(self, ColorGrant::Assigned(_))
    }
}

/// [`ColorIndex`] で引く色スロットの表
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    slots: [Option<ColorAssignment>; COLOR_SLOTS],
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 参加者の既存の色を返す。未保持なら空いている最小のスロットを割り当てる
    ///
    /// # Errors
    ///
    /// 全スロットが他の参加者に使われていれば [`DomainError::CapacityExceeded`]
    pub fn assign_or_reuse(
        &mut self,
        participant: &ParticipantId,
        now_millis: i64,
    ) -> Result<ColorGrant, DomainError> {
        if let Some(color) = self.color_of(participant) {
            return Ok(ColorGrant::Reused(color));
        }

        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(DomainError::CapacityExceeded)?;
        let color = ColorIndex::from_slot(slot);
        self.slots[slot] = Some(ColorAssignment {
            participant: participant.clone(),
            color,
            assigned_at: now_millis,
        });

        Ok(ColorGrant::Assigned(color))
    }

    /// 参加者のスロットを解放し、解放した色を返す
    pub fn release(&mut self, participant: &ParticipantId) -> Option<ColorIndex> {
        let slot = self.slot_of(participant)?;
        self.slots[slot].take().map(|assignment| assignment.color)
    }

    pub fn color_of(&self, participant: &ParticipantId) -> Option<ColorIndex> {
        self.slot_of(participant).map(ColorIndex::from_slot)
    }

    /// 色を保持している参加者の数
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 全割り当てをスロット順で返す
    pub fn snapshot(&self) -> Vec<ColorAssignment> {
        self.slots.iter().flatten().cloned().collect()
    }

    fn slot_of(&self, participant: &ParticipantId) -> Option<usize> {
        self.slots.iter().position(|slot| {
            slot.as_ref()
                .is_some_and(|assignment| &assignment.participant == participant)
        })
    }
}
