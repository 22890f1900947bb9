//! Swap commit: the near-field midpoint hysteresis test and the scroll
//! compensation that keeps the list visually stationary across a structural
//! move.

use super::host::{DragDropList, ItemLayout};
use super::session::DragSession;

/// Moves over this many slots skip the midpoint test; they are deliberate
/// long-distance moves, not boundary jitter.
const LONG_DISTANCE_THRESHOLD: usize = 4;

/// Tries to commit the resolved swap chain. Returns `true` when a move was
/// executed, in which case `session.current_position` has been advanced to
/// the chain's target.
pub(crate) fn try_swap(
    list: &mut dyn DragDropList,
    session: &mut DragSession,
    chain: &[usize],
    dragged_layout: &ItemLayout,
) -> bool {
    let from = session.current_position;
    let Some(&to) = chain.first() else {
        return false;
    };

    if list.item_id(from) != Some(session.item_id) {
        log::trace!("list state has not been synced to data yet");
        return false;
    }
    let Some(target_layout) = list.item_layout(to) else {
        return false;
    };

    let diff = from.abs_diff(to);
    let perform = if diff == 0 {
        false
    } else if diff <= LONG_DISTANCE_THRESHOLD {
        midpoint_crossed(session, dragged_layout, &target_layout, from, to)
    } else {
        true
    };
    if !perform {
        return false;
    }

    log::debug!("item swap (from: {from}, to: {to})");

    let prev_first_visible = list.first_visible_position();
    // Captured before the move; the compensation wants the extent the slot
    // had while it was still first.
    let target_extent = target_layout.rect.height() + target_layout.margins.vertical();
    let grabbed_extent = session.grabbed_item_size + session.grabbed_item_margins.vertical();

    list.move_item(from, to);
    session.current_position = to;

    // If the first on-screen item is the one that moved away (or the one
    // that moved into the first slot), compensate the scroll offset by its
    // extent so the host's scroll anchoring does not produce a visible jump.
    // A host reporting zero actual scroll simply yields no compensation.
    if prev_first_visible == Some(from) {
        let _ = list.scroll_by(-target_extent);
    } else if prev_first_visible == Some(to) {
        let _ = list.scroll_by(-grabbed_extent);
    }

    true
}

/// Whether the dragged item's overlay midpoint has crossed the midpoint of
/// the combined extent of the two items, in the direction of travel. This is
/// the hysteresis band that prevents oscillating swaps right at the slot
/// boundary.
fn midpoint_crossed(
    session: &DragSession,
    dragged_layout: &ItemLayout,
    target_layout: &ItemLayout,
    from: usize,
    to: usize,
) -> bool {
    let v1 = dragged_layout.rect;
    let v2 = target_layout.rect;
    // The original measures both boxes with the dragged item's margins.
    let m = session.grabbed_item_margins;

    let left = (v1.left() - m.left).min(v2.left() - m.left);
    let right = (v1.right() + m.right).max(v2.right() + m.right);
    let delta_x = right - left;
    let top = (v1.top() - m.top).min(v2.top() - m.top);
    let bottom = (v1.bottom() + m.bottom).max(v2.bottom() + m.bottom);
    let delta_y = bottom - top;

    // Compare along whichever axis the combined extent spans further.
    let overlay_origin = session.overlay_origin();
    let mid_of_items = if delta_x > delta_y {
        left + delta_x * 0.5
    } else {
        top + delta_y * 0.5
    };
    let mid_of_overlay = if delta_x > delta_y {
        overlay_origin.x + session.grabbed_item_size * 0.5
    } else {
        overlay_origin.y + session.grabbed_item_size * 0.5
    };

    if to < from {
        mid_of_overlay < mid_of_items
    } else {
        mid_of_overlay > mid_of_items
    }
}
