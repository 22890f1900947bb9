use egui::{Pos2, Vec2};

use super::host::{DragDropList, SettleAnimation};
use super::range::DraggableRange;

/// Tracks the dragged item's on-screen position: the pointer position minus
/// the grab offset, clamped to the viewport's padded bounds and, while not
/// auto-scrolling, to the visible extent of the draggable range.
#[derive(Debug)]
pub(crate) struct DraggingItemDecorator {
    grab_offset: Vec2,
    grabbed_item_size: Vec2,
    range: DraggableRange,
    touch_position: Pos2,
    translation: Pos2,
    is_scrolling: bool,
    /// Whether the dragged item still has a live visual. Cleared when the
    /// host recycles the item's view mid-drag.
    item_bound: bool,
}

impl DraggingItemDecorator {
    pub fn new(grab_offset: Vec2, grabbed_item_size: Vec2, range: DraggableRange) -> Self {
        Self {
            grab_offset,
            grabbed_item_size,
            range,
            touch_position: Pos2::ZERO,
            translation: Pos2::ZERO,
            is_scrolling: false,
            item_bound: false,
        }
    }

    pub fn start(&mut self, list: &mut dyn DragDropList, touch: Pos2, dragged_position: usize) {
        self.item_bound = true;
        self.update(list, touch, dragged_position);
    }

    pub fn update(&mut self, list: &mut dyn DragDropList, touch: Pos2, dragged_position: usize) {
        self.touch_position = touch;
        self.refresh(list, dragged_position);
    }

    /// Recomputes the clamp limits from live geometry and pushes the
    /// resulting translation to the host.
    pub fn refresh(&mut self, list: &mut dyn DragDropList, dragged_position: usize) {
        let (start_limit, end_limit) = self.translation_limits(list);
        let unclamped = self.touch_position - self.grab_offset;
        self.translation = Pos2::new(
            unclamped.x.max(start_limit.x).min(end_limit.x),
            unclamped.y.max(start_limit.y).min(end_limit.y),
        );
        self.push_translation(list, dragged_position);
    }

    /// The dragged item's current clamped top-left, in list-local coordinates.
    pub fn translation(&self) -> Pos2 {
        self.translation
    }

    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        self.is_scrolling = is_scrolling;
    }

    #[cfg(test)]
    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    /// The dragged item's view was recycled by the host; stop driving it.
    pub fn invalidate_item(&mut self) {
        self.item_bound = false;
    }

    /// A fresh view was bound for the dragged item.
    ///
    /// # Panics
    /// Panics if the previous view was not invalidated first.
    pub fn bind_item(&mut self) {
        assert!(
            !self.item_bound,
            "a new item view is attempt to be assigned before invalidating the older one"
        );
        self.item_bound = true;
    }

    pub fn finish(
        &mut self,
        list: &mut dyn DragDropList,
        dragged_position: usize,
        settle: SettleAnimation,
    ) {
        self.refresh(list, dragged_position);
        if self.item_bound {
            list.settle_item(dragged_position, settle);
        }
        self.item_bound = false;
        self.is_scrolling = false;
    }

    fn translation_limits(&self, list: &dyn DragDropList) -> (Pos2, Pos2) {
        let viewport = list.viewport();
        let rect = viewport.rect;
        let padding = viewport.padding;

        let padded_min = Pos2::new(rect.left() + padding.left, rect.top() + padding.top);
        if list.item_count() == 0 {
            return (padded_min, padded_min);
        }

        let mut start_limit = padded_min;
        let mut end_limit = Pos2::new(
            rect.left() + (rect.width() - padding.right - self.grabbed_item_size.x).max(0.0),
            rect.top() + (rect.height() - padding.bottom - self.grabbed_item_size.y).max(0.0),
        );

        // While not auto-scrolling, keep the floating item inside the visible
        // extent of the draggable range.
        if !self.is_scrolling {
            if let (Some(first), Some(last)) =
                (list.first_visible_position(), list.last_visible_position())
            {
                let first_in_range = (first..=last)
                    .find(|&p| self.range.contains(p))
                    .and_then(|p| list.item_layout(p));
                if let Some(layout) = first_in_range {
                    start_limit.x = end_limit.x.min(layout.rect.left());
                    start_limit.y = end_limit.y.min(layout.rect.top());
                }

                let last_in_range = (first..=last)
                    .rev()
                    .find(|&p| self.range.contains(p))
                    .and_then(|p| list.item_layout(p));
                if let Some(layout) = last_in_range {
                    end_limit.x = end_limit.x.min(layout.rect.right());
                    end_limit.y = end_limit.y.min(layout.rect.bottom());
                }
            }
        }

        (start_limit, end_limit)
    }

    fn push_translation(&self, list: &mut dyn DragDropList, dragged_position: usize) {
        if !self.item_bound {
            return;
        }
        if let Some(layout) = list.item_layout(dragged_position) {
            list.set_item_translation(dragged_position, self.translation - layout.rect.min);
        }
    }
}
