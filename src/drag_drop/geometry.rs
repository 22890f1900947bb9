//! Swap-target resolution: maps the dragged item's displacement onto one of
//! 8 angular octants over a fixed-column grid and derives the chain of items
//! that must shift one slot to vacate the resolved target.

use egui::Pos2;
use itertools::Either;

use super::range::DraggableRange;

/// No target is resolved while the displacement on both axes stays below
/// this fraction of the item size, which keeps the item stable near its
/// origin.
const DEAD_ZONE_RATIO: f32 = 0.1;

// Reference tangents at the octant boundaries (22.5 deg and 67.5 deg).
const TAN_22_5: f32 = 0.414;
const TAN_67_5: f32 = 2.414;

/// Resolves the index the dragged item is heading toward, or `None` when the
/// displacement is ambiguous (inside the dead zone) or the resolved index
/// falls outside the collection or the draggable range.
///
/// `overlay_origin` is the unclamped top-left the dragged item would occupy
/// if it followed the pointer exactly; `top_left` is its undragged layout
/// position.
pub(crate) fn resolve_swap_target(
    dragged_position: usize,
    top_left: Pos2,
    overlay_origin: Pos2,
    item_size: f32,
    columns: usize,
    item_count: usize,
    range: &DraggableRange,
) -> Option<usize> {
    let columns = columns as isize;

    // Avoid a division by zero for purely vertical displacement.
    let delta_x = if overlay_origin.x == top_left.x {
        0.001
    } else {
        overlay_origin.x - top_left.x
    };
    let delta_y = top_left.y - overlay_origin.y;

    if delta_x.abs().max(delta_y.abs()) < DEAD_ZONE_RATIO * item_size {
        return None;
    }

    let slope = delta_y / delta_x;
    let moving_up = overlay_origin.y < top_left.y;
    let moving_left = overlay_origin.x < top_left.x;

    let delta = if moving_up {
        if moving_left {
            // up-left quadrant: octants up, left, up-left
            if slope < -TAN_67_5 {
                -columns
            } else if slope > -TAN_22_5 {
                -1
            } else {
                -columns - 1
            }
        } else {
            // up-right quadrant: octants right, up, up-right
            if slope < TAN_22_5 {
                1
            } else if slope > TAN_67_5 {
                -columns
            } else {
                -columns + 1
            }
        }
    } else if moving_left {
        // down-left quadrant: octants left, down, down-left
        if slope < TAN_22_5 {
            -1
        } else if slope > TAN_67_5 {
            columns
        } else {
            columns - 1
        }
    } else {
        // down-right quadrant: octants down, right, down-right
        if slope < -TAN_67_5 {
            columns
        } else if slope > -TAN_22_5 {
            1
        } else {
            columns + 1
        }
    };

    let target = dragged_position as isize + delta;
    if target < 0 || target >= item_count as isize {
        return None;
    }
    let target = target as usize;
    range.contains(target).then_some(target)
}

/// The ordered indices that must shift one slot so the dragged item can reach
/// `target`: every index strictly between `target` and `dragged_position`,
/// stepped toward the dragged item, with the target first. Empty when the two
/// coincide.
pub(crate) fn swap_chain(dragged_position: usize, target: usize) -> Vec<usize> {
    let iter = if target > dragged_position {
        Either::Left((dragged_position + 1..=target).rev())
    } else {
        Either::Right(target..dragged_position)
    };
    iter.collect()
}
