use egui::{Pos2, Vec2};

use super::host::Margins;
use super::range::DraggableRange;

bitflags::bitflags! {
    /// Auto-scroll directions currently permitted by the drag's touch
    /// history. A direction becomes permitted once the pointer travels past
    /// the scroll touch slop in that direction (relative to the drag start
    /// point or to the opposite recorded extreme), and stays permitted for
    /// the rest of the session.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ScrollDirection: u8 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
    }
}

/// State of the drag interaction state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// A press was recorded and a long-press timer is pending.
    Armed,
    Dragging,
    /// Transient: tearing down a finished or cancelled drag.
    Finishing,
}

/// The single in-progress drag.
///
/// Owned exclusively by the manager; the geometry, swap, and scroll helpers
/// receive it by reference for the duration of one call and must not retain
/// it.
#[derive(Clone, Debug)]
pub(crate) struct DragSession {
    pub item_id: egui::Id,
    pub range: DraggableRange,
    pub initial_position: usize,
    /// Slot the dragged item currently occupies; updated on every committed
    /// swap.
    pub current_position: usize,
    /// Pointer position relative to the grabbed item's top-left at drag start.
    pub grab_offset: Vec2,
    /// Grabbed item's width, also used as its extent along the scroll axis
    /// (the direction table assumes square grid cells).
    pub grabbed_item_size: f32,
    pub grabbed_item_margins: Margins,
    pub last_touch: Pos2,
    pub drag_start_touch: Pos2,
    pub min_touch: Pos2,
    pub max_touch: Pos2,
    pub scroll_dir_mask: ScrollDirection,
}

impl DragSession {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        item_id: egui::Id,
        range: DraggableRange,
        position: usize,
        touch: Pos2,
        grab_offset: Vec2,
        grabbed_item_size: f32,
        grabbed_item_margins: Margins,
    ) -> Self {
        Self {
            item_id,
            range,
            initial_position: position,
            current_position: position,
            grab_offset,
            grabbed_item_size,
            grabbed_item_margins,
            last_touch: touch,
            // auto scrolling stays disabled until the user moves the item
            drag_start_touch: touch,
            min_touch: touch,
            max_touch: touch,
            scroll_dir_mask: ScrollDirection::empty(),
        }
    }

    pub fn record_touch(&mut self, pos: Pos2) {
        self.last_touch = pos;
        self.min_touch = self.min_touch.min(pos);
        self.max_touch = self.max_touch.max(pos);
    }

    /// Accumulates the direction-hysteresis mask from the running touch
    /// extrema. The mask only ever gains bits within one session, so a small
    /// back-and-forth motion cannot toggle a permitted direction off again.
    pub fn update_scroll_direction_mask(&mut self, scroll_touch_slop: f32) {
        if (self.drag_start_touch.y - self.min_touch.y) > scroll_touch_slop
            || (self.max_touch.y - self.last_touch.y) > scroll_touch_slop
        {
            self.scroll_dir_mask |= ScrollDirection::TOP;
        }
        if (self.max_touch.y - self.drag_start_touch.y) > scroll_touch_slop
            || (self.last_touch.y - self.min_touch.y) > scroll_touch_slop
        {
            self.scroll_dir_mask |= ScrollDirection::BOTTOM;
        }
    }

    /// Unclamped top-left the dragged item would occupy if it followed the
    /// pointer exactly.
    pub fn overlay_origin(&self) -> Pos2 {
        self.last_touch - self.grab_offset
    }
}
