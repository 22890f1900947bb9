//! Shared test fixture: an in-memory grid list with recorded side effects.

use egui::{Pos2, Rect, Vec2};

use super::host::{DragDropList, ItemLayout, Margins, SettleAnimation, Viewport};
use super::range::DraggableRange;

pub const ITEM_SIZE: f32 = 40.0;
pub const ITEM_MARGIN: f32 = 2.0;
/// Distance between the top-left corners of adjacent cells.
pub const CELL: f32 = ITEM_SIZE + 2.0 * ITEM_MARGIN;

/// A vertically scrolling grid of square items. Items carry a stable label
/// from which their id is derived, so tests can observe reorders by reading
/// back [`TestList::order`].
pub struct TestList {
    pub items: Vec<usize>,
    pub columns: usize,
    pub viewport_height: f32,
    pub scroll_offset: f32,
    pub range: Option<DraggableRange>,
    pub undraggable: Vec<usize>,

    pub moves: Vec<(usize, usize)>,
    pub scrolls: Vec<f32>,
    pub translations: ahash::HashMap<usize, Vec2>,
    pub settles: Vec<usize>,
    pub over_scroll_suppressed: Vec<bool>,
    pub drag_started: Vec<usize>,
    pub drag_finished: Vec<(usize, bool)>,
}

impl TestList {
    pub fn new(item_count: usize, columns: usize, viewport_height: f32) -> Self {
        Self {
            items: (0..item_count).collect(),
            columns,
            viewport_height,
            scroll_offset: 0.0,
            range: None,
            undraggable: Vec::new(),
            moves: Vec::new(),
            scrolls: Vec::new(),
            translations: ahash::HashMap::default(),
            settles: Vec::new(),
            over_scroll_suppressed: Vec::new(),
            drag_started: Vec::new(),
            drag_finished: Vec::new(),
        }
    }

    /// The current item order, as the items' original labels.
    pub fn order(&self) -> &[usize] {
        &self.items
    }

    /// Untranslated top-left of the cell at `position`.
    pub fn cell_origin(&self, position: usize) -> Pos2 {
        let row = position / self.columns;
        let col = position % self.columns;
        Pos2::new(
            col as f32 * CELL + ITEM_MARGIN,
            row as f32 * CELL + ITEM_MARGIN - self.scroll_offset,
        )
    }

    pub fn center_of(&self, position: usize) -> Pos2 {
        self.cell_origin(position) + Vec2::splat(ITEM_SIZE / 2.0)
    }

    fn content_height(&self) -> f32 {
        let rows = self.items.len().div_ceil(self.columns);
        rows as f32 * CELL
    }

    fn is_visible(&self, position: usize) -> bool {
        let origin = self.cell_origin(position);
        origin.y + ITEM_SIZE > 0.0 && origin.y < self.viewport_height
    }

    fn is_completely_visible(&self, position: usize) -> bool {
        let origin = self.cell_origin(position);
        origin.y >= 0.0 && origin.y + ITEM_SIZE <= self.viewport_height
    }
}

impl DragDropList for TestList {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_id(&self, position: usize) -> Option<egui::Id> {
        self.items.get(position).map(|&label| egui::Id::new(label))
    }

    fn item_layout(&self, position: usize) -> Option<ItemLayout> {
        if position >= self.items.len() {
            return None;
        }
        Some(ItemLayout {
            rect: Rect::from_min_size(self.cell_origin(position), Vec2::splat(ITEM_SIZE)),
            margins: Margins::same(ITEM_MARGIN),
            decoration: Margins::ZERO,
        })
    }

    fn item_under(&self, pos: Pos2) -> Option<usize> {
        let y = pos.y + self.scroll_offset;
        if pos.x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (pos.x / CELL) as usize;
        let row = (y / CELL) as usize;
        if col >= self.columns {
            return None;
        }
        let position = row * self.columns + col;
        (position < self.items.len()).then_some(position)
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            rect: Rect::from_min_size(
                Pos2::ZERO,
                Vec2::new(self.columns as f32 * CELL, self.viewport_height),
            ),
            padding: Margins::ZERO,
        }
    }

    fn first_visible_position(&self) -> Option<usize> {
        (0..self.items.len()).find(|&p| self.is_visible(p))
    }

    fn last_visible_position(&self) -> Option<usize> {
        (0..self.items.len()).rev().find(|&p| self.is_visible(p))
    }

    fn first_completely_visible_position(&self) -> Option<usize> {
        (0..self.items.len()).find(|&p| self.is_completely_visible(p))
    }

    fn last_completely_visible_position(&self) -> Option<usize> {
        (0..self.items.len()).rev().find(|&p| self.is_completely_visible(p))
    }

    fn scroll_by(&mut self, dy: f32) -> f32 {
        let max_offset = (self.content_height() - self.viewport_height).max(0.0);
        let new_offset = (self.scroll_offset + dy).clamp(0.0, max_offset);
        let actual = new_offset - self.scroll_offset;
        self.scroll_offset = new_offset;
        if actual != 0.0 {
            self.scrolls.push(actual);
        }
        actual
    }

    fn move_item(&mut self, from: usize, to: usize) {
        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.moves.push((from, to));
    }

    fn is_draggable(&self, position: usize) -> bool {
        !self.undraggable.contains(&position)
    }

    fn draggable_range(&self, _position: usize) -> Option<DraggableRange> {
        self.range
    }

    fn set_item_translation(&mut self, position: usize, translation: Vec2) {
        self.translations.insert(position, translation);
    }

    fn settle_item(&mut self, position: usize, _animation: SettleAnimation) {
        self.settles.push(position);
    }

    fn set_over_scroll_suppressed(&mut self, suppressed: bool) {
        self.over_scroll_suppressed.push(suppressed);
    }

    fn on_drag_started(&mut self, position: usize, _range: DraggableRange) {
        self.drag_started.push(position);
    }

    fn on_drag_finished(&mut self, position: usize, success: bool) {
        self.drag_finished.push((position, success));
    }
}
