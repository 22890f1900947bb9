#![forbid(unsafe_code)]

//! Touch-driven drag-and-drop reordering for scrollable lists and grids
//! built on [`egui`] types.
//!
//! The host owns layout, rendering, and scrolling, and exposes them through
//! the [`DragDropList`] trait. [`DragDropManager`] consumes the host's
//! pointer events and drives the whole interaction on top of that: gesture
//! recognition by touch slop or long press, a floating dragged item, swap
//! targets resolved from the drag direction over a fixed-column grid,
//! displaced items animating out of the way, and auto-scroll near the
//! viewport edges.

pub mod drag_drop;

pub use drag_drop::{
    DragDropList, DragDropManager, DragDropOptions, DragState, DragStateFlags, DraggableRange,
    ItemLayout, Margins, OnItemDragEventListener, RangeError, ScrollDirection, SettleAnimation,
    TouchEvent, Viewport,
};
pub use drag_drop::{basic_swap_target_translation_interpolator, decelerate_interpolator};
