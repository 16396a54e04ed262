//! 矩形の配置ストアと検証
//!
//! キャンバス上の全矩形を保持し、どの 2 つも重ならない状態を保つ。
//! 検証は線形走査で行う。参加者数の上限があるため、ストアは小さいままである。

use std::collections::HashMap;

use super::{
    entity::{Rect, RectProposal},
    error::DomainError,
    value_object::{ColorIndex, ParticipantId, RectId},
};

#[derive(Debug, Default)]
pub struct Canvas {
    rects: HashMap<RectId, Rect>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// `owner` として矩形を追加、または置き換える
    ///
    /// 提案と同じ id の矩形は重なり判定から除外されるため、所有者は同じ id で
    /// 再送することで矩形を移動・リサイズできる。
    ///
    /// # Errors
    ///
    /// * [`DomainError::NotOwner`] - id が他の参加者のもの
    /// * [`DomainError::Overlap`] - 他の矩形と重なる
    pub fn place(
        &mut self,
        proposal: RectProposal,
        owner: &ParticipantId,
        color: ColorIndex,
    ) -> Result<Rect, DomainError> {
        let rect = Rect::stamp(proposal, owner.clone(), color);

        if let Some(existing) = self.rects.get(&rect.id)
            && existing.owner != rect.owner
        {
            return Err(DomainError::NotOwner(rect.id));
        }

        if let Some(existing) = self.collision_with(&rect) {
            return Err(DomainError::Overlap {
                candidate: rect.id,
                existing: existing.clone(),
            });
        }

        self.rects.insert(rect.id.clone(), rect.clone());
        Ok(rect)
    }

    /// 候補と重なる最初の矩形（候補自身の id は除く）
    pub fn collision_with(&self, candidate: &Rect) -> Option<&RectId> {
        self.rects
            .iter()
            .find(|(id, rect)| **id != candidate.id && candidate.overlaps(rect))
            .map(|(id, _)| id)
    }

    /// `owner` が所有する矩形をすべて削除する
    /// 削除した id を id 順で返す。
    pub fn remove_owned_by(&mut self, owner: &ParticipantId) -> Vec<RectId> {
        let mut removed: Vec<RectId> = self
            .rects
            .iter()
            .filter(|(_, rect)| &rect.owner == owner)
            .map(|(id, _)| id.clone())
            .collect();
        removed.sort();

        for id in &removed {
            self.rects.remove(id);
        }
        removed
    }

    pub fn get(&self, id: &RectId) -> Option<&Rect> {
        self.rects.get(id)
    }

    /// 全矩形を id 順で返す
    pub fn snapshot(&self) -> Vec<Rect> {
        let mut rects: Vec<Rect> = self.rects.values().cloned().collect();
        rects.sort_by(|a, b| a.id.cmp(&b.id));
        rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{entity::Bounds, value_object::CappedText};

    fn pid(value: &str) -> ParticipantId {
        ParticipantId::new(value.to_string()).unwrap()
    }

    fn proposal(id: &str, x: f64, y: f64, w: f64, h: f64) -> RectProposal {
        RectProposal {
            id: RectId::new(id.to_string()).unwrap(),
            bounds: Bounds::new(x, y, w, h).unwrap(),
            text: None,
        }
    }

    fn color(value: i64) -> ColorIndex {
        ColorIndex::new(value).unwrap()
    }

    #[test]
    fn test_place_rejects_overlap_and_accepts_free_space() {
        // テスト項目: 重なる配置は拒否され、空いている場所への配置は受け付けられる
        // given (前提条件):
        let mut canvas = Canvas::new();
        canvas
            .place(proposal("r1", 0.0, 0.0, 10.0, 10.0), &pid("a"), color(0))
            .unwrap();

        // when (操作):
        let rejected = canvas.place(proposal("r2", 5.0, 5.0, 10.0, 10.0), &pid("b"), color(1));
        let accepted = canvas.place(proposal("r2", 20.0, 0.0, 10.0, 10.0), &pid("b"), color(1));

        // then (期待する結果):
        assert_eq!(
            rejected,
            Err(DomainError::Overlap {
                candidate: RectId::new("r2".to_string()).unwrap(),
                existing: RectId::new("r1".to_string()).unwrap(),
            })
        );
        assert!(accepted.is_ok());
        assert_eq!(canvas.len(), 2);
    }

    #[test]
    fn test_rejected_placement_leaves_store_unchanged() {
        // テスト項目: 拒否された配置はストアを変更しない
        // given (前提条件):
        let mut canvas = Canvas::new();
        canvas
            .place(proposal("r1", 0.0, 0.0, 10.0, 10.0), &pid("a"), color(0))
            .unwrap();
        canvas
            .place(proposal("r2", 20.0, 0.0, 10.0, 10.0), &pid("a"), color(0))
            .unwrap();
        let before = canvas.snapshot();

        // when (操作): r2 を r1 に重なる位置へ移動しようとする
        let result = canvas.place(proposal("r2", 5.0, 0.0, 10.0, 10.0), &pid("a"), color(0));

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(canvas.snapshot(), before);
    }

    #[test]
    fn test_resubmitting_same_rect_is_idempotent() {
        // テスト項目: 同じ id・同じ座標での再送は自己衝突せず、同じレコードになる
        // given (前提条件):
        let mut canvas = Canvas::new();
        let first = canvas
            .place(proposal("r1", 0.0, 0.0, 10.0, 10.0), &pid("a"), color(2))
            .unwrap();

        // when (操作):
        let second = canvas
            .place(proposal("r1", 0.0, 0.0, 10.0, 10.0), &pid("a"), color(2))
            .unwrap();

        // then (期待する結果):
        assert_eq!(first, second);
        assert_eq!(canvas.len(), 1);
    }

    #[test]
    fn test_owner_can_move_and_resize() {
        // テスト項目: 所有者は同じ id で移動・リサイズできる
        // given (前提条件):
        let mut canvas = Canvas::new();
        canvas
            .place(proposal("r1", 0.0, 0.0, 10.0, 10.0), &pid("a"), color(0))
            .unwrap();

        // when (操作): 元の位置と重なるように拡大する
        let result = canvas.place(proposal("r1", 5.0, 5.0, 30.0, 30.0), &pid("a"), color(0));

        // then (期待する結果):
        assert!(result.is_ok());
        let stored = canvas.get(&RectId::new("r1".to_string()).unwrap()).unwrap();
        assert_eq!(stored.bounds, Bounds::new(5.0, 5.0, 30.0, 30.0).unwrap());
    }

    #[test]
    fn test_other_participant_cannot_take_over_rect_id() {
        // テスト項目: 他人の rect id を使った配置は拒否される
        // given (前提条件):
        let mut canvas = Canvas::new();
        canvas
            .place(proposal("r1", 0.0, 0.0, 10.0, 10.0), &pid("a"), color(0))
            .unwrap();

        // when (操作):
        let result = canvas.place(proposal("r1", 100.0, 0.0, 10.0, 10.0), &pid("b"), color(1));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(DomainError::NotOwner(RectId::new("r1".to_string()).unwrap()))
        );
        let stored = canvas.get(&RectId::new("r1".to_string()).unwrap()).unwrap();
        assert_eq!(stored.owner, pid("a"));
    }

    #[test]
    fn test_remove_owned_by() {
        // テスト項目: 所有者の矩形だけがまとめて削除される
        // given (前提条件):
        let mut canvas = Canvas::new();
        canvas
            .place(proposal("b2", 0.0, 0.0, 1.0, 1.0), &pid("a"), color(0))
            .unwrap();
        canvas
            .place(proposal("b1", 2.0, 0.0, 1.0, 1.0), &pid("a"), color(0))
            .unwrap();
        canvas
            .place(proposal("c1", 4.0, 0.0, 1.0, 1.0), &pid("b"), color(1))
            .unwrap();

        // when (操作):
        let removed = canvas.remove_owned_by(&pid("a"));

        // then (期待する結果):
        let removed: Vec<&str> = removed.iter().map(RectId::as_str).collect();
        assert_eq!(removed, vec!["b1", "b2"]);
        assert_eq!(canvas.len(), 1);
        assert_eq!(canvas.snapshot()[0].owner, pid("b"));
    }

    #[test]
    fn test_snapshot_keeps_text_and_is_ordered() {
        // テスト項目: スナップショットは id 順でテキストを保持する
        // given (前提条件):
        let mut canvas = Canvas::new();
        let mut labelled = proposal("z", 0.0, 0.0, 1.0, 1.0);
        labelled.text = Some(CappedText::new("label".to_string()));
        canvas.place(labelled, &pid("a"), color(0)).unwrap();
        canvas
            .place(proposal("a", 5.0, 5.0, 1.0, 1.0), &pid("a"), color(0))
            .unwrap();

        // when (操作):
        let snapshot = canvas.snapshot();

        // then (期待する結果):
        assert_eq!(snapshot[0].id.as_str(), "a");
        assert_eq!(snapshot[1].text.as_ref().unwrap().as_str(), "label");
    }

    #[test]
    fn test_no_overlap_invariant_over_many_placements() {
        // テスト項目: 多数の配置の後でも、ストア内の矩形は互いに重ならない
        // given (前提条件):
        let mut canvas = Canvas::new();
        let owners = [pid("a"), pid("b"), pid("c")];

        // when (操作): 格子状に少しずつずらして配置を試みる
        for i in 0..30 {
            let x = (i % 6) as f64 * 7.0;
            let y = (i / 6) as f64 * 7.0;
            let owner = &owners[i % owners.len()];
            let _ = canvas.place(
                proposal(&format!("r{i}"), x, y, 10.0, 10.0),
                owner,
                color((i % owners.len()) as i64),
            );
        }

        // then (期待する結果):
        let rects = canvas.snapshot();
        assert!(!rects.is_empty());
        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                assert!(!a.overlaps(b), "{} overlaps {}", a.id, b.id);
            }
        }
    }
}
