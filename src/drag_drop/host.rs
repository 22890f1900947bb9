use egui::{Pos2, Rect, Vec2};

use super::range::DraggableRange;

/// Outer margins around an item, in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Margins {
    pub const ZERO: Self = Self {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    pub fn same(value: f32) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Live snapshot of one item's geometry: its untranslated bounds, layout
/// margins, and any extra decoration offsets applied by the host's layout.
///
/// This is queried from the host every time it is needed and must never be
/// cached across frames.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemLayout {
    /// Item bounds in list-local coordinates, excluding any drag translation.
    pub rect: Rect,
    pub margins: Margins,
    pub decoration: Margins,
}

impl ItemLayout {
    /// Item width plus horizontal margins and decoration offsets.
    pub fn horizontal_extent(&self) -> f32 {
        self.rect.width() + self.margins.horizontal() + self.decoration.horizontal()
    }

    /// Item height plus vertical margins and decoration offsets.
    pub fn vertical_extent(&self) -> f32 {
        self.rect.height() + self.margins.vertical() + self.decoration.vertical()
    }
}

/// The list's visible area, in the same list-local coordinate space as
/// [`ItemLayout`] bounds and touch positions.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub rect: Rect,
    pub padding: Margins,
}

bitflags::bitflags! {
    /// Per-item drag-state flags consumable by the host's rendering.
    ///
    /// Query these through [`super::DragDropManager::drag_state_flags`]. Hosts
    /// that cache flag values can use [`Self::UPDATED`] as their own
    /// "changed, needs re-apply" marker when diffing.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DragStateFlags: u32 {
        /// A drag is currently being performed somewhere in the list.
        const DRAGGING = 1 << 0;
        /// This item is the one being dragged.
        const ACTIVE = 1 << 1;
        /// This item is inside the drag-sortable range.
        const IN_RANGE = 1 << 2;
        /// Some other flags changed and need to be re-applied.
        const UPDATED = 1 << 31;
    }
}

/// A pointer event fed into [`super::DragDropManager::on_touch_event`].
///
/// Only a single active pointer is supported; hosts with multi-touch input
/// should forward the primary pointer only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchEvent {
    /// Pointer went down. `time` is the host clock in seconds, used as the
    /// long-press reference point.
    Down { pos: Pos2, time: f64 },
    Move { pos: Pos2 },
    Up { pos: Pos2 },
    /// The gesture was taken over or abandoned by the host.
    Cancel,
}

/// "Settle back into place" animation parameters handed to the host when a
/// drag finishes.
#[derive(Clone, Copy, Debug)]
pub struct SettleAnimation {
    /// Duration in seconds.
    pub duration: f64,
    /// Optional easing applied by the host; linear when `None`.
    pub interpolator: Option<fn(f32) -> f32>,
}

/// Drag lifecycle events, implemented by the host.
pub trait OnItemDragEventListener {
    /// Dragging started on the item at `position`.
    fn on_dragging_started(&mut self, position: usize);

    /// Dragging finished. `success` is `false` when the drag was cancelled;
    /// positions refer to the item's slot at drag start and at release.
    fn on_dragging_finished(&mut self, from_position: usize, to_position: usize, success: bool);
}

impl std::fmt::Debug for dyn OnItemDragEventListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OnItemDragEventListener")
    }
}

/// The scrollable list being reordered, as seen by the drag-drop manager.
///
/// The manager receives the list by reference for the duration of one call
/// and never retains it. Geometry methods are queried live each time they
/// are needed; implementations should report current values, not cached
/// ones. All required methods describe a vertically scrolling list laid out
/// in a fixed-column grid (a plain list is the single-column case).
pub trait DragDropList {
    fn item_count(&self) -> usize;

    /// Stable identity of the item currently at `position`, or `None` if the
    /// position is out of bounds.
    fn item_id(&self, position: usize) -> Option<egui::Id>;

    /// Live geometry of the item at `position`, or `None` if it is not
    /// currently laid out.
    fn item_layout(&self, position: usize) -> Option<ItemLayout>;

    /// Hit-test ignoring any drag translations currently applied.
    fn item_under(&self, pos: Pos2) -> Option<usize>;

    fn viewport(&self) -> Viewport;

    fn first_visible_position(&self) -> Option<usize>;
    fn last_visible_position(&self) -> Option<usize>;
    fn first_completely_visible_position(&self) -> Option<usize>;
    fn last_completely_visible_position(&self) -> Option<usize>;

    /// Scrolls the content by `dy` points (positive scrolls toward the end)
    /// and returns the amount actually scrolled. Returning `0.0` at a content
    /// edge is fine; the manager treats it as "no compensation possible".
    fn scroll_by(&mut self, dy: f32) -> f32;

    /// Relocates the item at `from` to `to` as a single move (not a sequence
    /// of adjacent swaps) and emits whatever structural-change notification
    /// the host's observation mechanism expects.
    fn move_item(&mut self, from: usize, to: usize);

    /// Whether the item at `position` participates in drag sorting at all.
    fn is_draggable(&self, _position: usize) -> bool {
        true
    }

    /// Whether a drag may start on the item at `position` from the given
    /// item-local grab point (e.g. only on a handle area).
    fn can_start_drag(&mut self, _position: usize, _grab: Vec2) -> bool {
        true
    }

    /// Range the item at `position` may be moved within. `None` means the
    /// full collection.
    fn draggable_range(&self, _position: usize) -> Option<DraggableRange> {
        None
    }

    /// Visual translation for the item at `position`, pushed by the manager
    /// for the dragged item and every displaced swap target.
    fn set_item_translation(&mut self, _position: usize, _translation: Vec2) {}

    /// Animate the item at `position` from its current translation back to
    /// rest. Called when a drag finishes.
    fn settle_item(&mut self, _position: usize, _animation: SettleAnimation) {}

    /// Suppress edge over-scroll effects for the duration of a drag. Called
    /// with `true` at drag start and `false` at finish.
    fn set_over_scroll_suppressed(&mut self, _suppressed: bool) {}

    /// A drag session started on the item at `position`. Hosts typically
    /// mark drag-state flags on their items here.
    fn on_drag_started(&mut self, _position: usize, _range: DraggableRange) {}

    /// The drag session ended with the dragged item at `position`.
    fn on_drag_finished(&mut self, _position: usize, _success: bool) {}
}
