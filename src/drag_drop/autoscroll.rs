//! Edge-triggered auto-scroll: runs once per animation frame while a drag is
//! active, scrolling the list when the pointer nears an edge.

use super::decorator::DraggingItemDecorator;
use super::host::DragDropList;
use super::options::DragDropOptions;
use super::session::{DragSession, ScrollDirection};
use super::swap_operator::SwapTargetItemOperator;

/// One auto-scroll tick. Returns the amount actually scrolled.
///
/// The scroll direction is gated by the session's hysteresis mask, and by
/// the draggable range's limits: one position past the range boundary is a
/// hard limit that stops scrolling entirely, while the boundary itself is a
/// soft limit that only clears the decorator's "scrolling" flag.
pub(crate) fn handle_scroll_on_dragging(
    list: &mut dyn DragDropList,
    session: &DragSession,
    decorator: &mut DraggingItemDecorator,
    operator: &mut SwapTargetItemOperator,
    options: &DragDropOptions,
) -> f32 {
    let viewport = list.viewport();
    let height = viewport.rect.height();
    if height <= 0.0 {
        return 0.0;
    }

    let y = (session.last_touch.y - viewport.rect.top()) / height;
    let threshold = options.edge_scroll_threshold;
    let center_offset = y - 0.5;
    let acceleration = (threshold - (0.5 - center_offset.abs())).max(0.0) / threshold;
    let magnitude = (options.edge_scroll_amount_coeff * options.display_density * acceleration
        + 0.5)
        .floor();
    let mut amount = center_offset.signum() * magnitude;

    let range = &session.range;
    let first_visible = list.first_completely_visible_position();
    let last_visible = list.last_completely_visible_position();

    let mut reached_top_hard_limit = false;
    let mut reached_top_soft_limit = false;
    let mut reached_bottom_hard_limit = false;
    let mut reached_bottom_soft_limit = false;

    if let Some(first) = first_visible {
        if first <= range.start() {
            reached_top_soft_limit = true;
        }
        if first < range.start() {
            reached_top_hard_limit = true;
        }
    }
    if let Some(last) = last_visible {
        if last >= range.end() {
            reached_bottom_soft_limit = true;
        }
        if last > range.end() {
            reached_bottom_hard_limit = true;
        }
    }

    // apply the hysteresis mask
    if amount > 0.0 {
        if !session.scroll_dir_mask.contains(ScrollDirection::BOTTOM) {
            amount = 0.0;
        }
    } else if amount < 0.0 && !session.scroll_dir_mask.contains(ScrollDirection::TOP) {
        amount = 0.0;
    }

    let mut actual = 0.0;
    if (amount < 0.0 && !reached_top_hard_limit) || (amount > 0.0 && !reached_bottom_hard_limit) {
        decorator.set_is_scrolling(if amount < 0.0 {
            !reached_top_soft_limit
        } else {
            !reached_bottom_soft_limit
        });

        actual = list.scroll_by(amount);

        decorator.refresh(list, session.current_position);
        operator.update(decorator.translation());
        operator.apply(list, session.current_position, options);
    } else {
        decorator.set_is_scrolling(false);
    }

    actual
}
