use egui::{Pos2, Vec2};

use super::host::{DragDropList, Margins};
use super::range::DraggableRange;
use super::session::DragSession;
use super::swap::try_swap;
use super::test_list::{ITEM_SIZE, TestList};

fn session_for(list: &TestList, position: usize, overlay_origin: Pos2) -> DragSession {
    // zero grab offset makes the overlay origin equal the touch position
    DragSession::new(
        list.item_id(position).unwrap(),
        DraggableRange::full(list.item_count()),
        position,
        overlay_origin,
        Vec2::ZERO,
        ITEM_SIZE,
        Margins::same(2.0),
    )
}

#[test]
fn chain_targeting_the_dragged_slot_is_a_no_op() {
    let mut list = TestList::new(16, 4, 176.0);
    let layout = list.item_layout(5).unwrap();
    let mut session = session_for(&list, 5, list.cell_origin(5));

    assert!(!try_swap(&mut list, &mut session, &[5], &layout));
    assert!(list.moves.is_empty());
    assert_eq!(session.current_position, 5);
}

#[test]
fn adjacent_swap_waits_for_the_midpoint() {
    // items 5 and 6 span x = 44..132 with margins, midpoint at 88
    let mut list = TestList::new(16, 4, 176.0);
    let layout = list.item_layout(5).unwrap();

    let mut session = session_for(&list, 5, Pos2::new(66.0, 46.0));
    assert!(!try_swap(&mut list, &mut session, &[6], &layout));
    assert!(list.moves.is_empty());

    let mut session = session_for(&list, 5, Pos2::new(70.0, 46.0));
    assert!(try_swap(&mut list, &mut session, &[6], &layout));
    assert_eq!(list.moves, vec![(5, 6)]);
    assert_eq!(session.current_position, 6);
    assert_eq!(&list.order()[4..8], &[4, 6, 5, 7]);
}

#[test]
fn backward_swap_mirrors_the_midpoint_test() {
    // items 4 and 5 span x = 0..88 with margins, midpoint at 44
    let mut list = TestList::new(16, 4, 176.0);
    let layout = list.item_layout(5).unwrap();

    let mut session = session_for(&list, 5, Pos2::new(28.0, 46.0));
    assert!(!try_swap(&mut list, &mut session, &[4], &layout));

    let mut session = session_for(&list, 5, Pos2::new(20.0, 46.0));
    assert!(try_swap(&mut list, &mut session, &[4], &layout));
    assert_eq!(list.moves, vec![(5, 4)]);
    assert_eq!(&list.order()[..8], &[0, 1, 2, 3, 5, 4, 6, 7]);
}

#[test]
fn long_distance_moves_skip_the_midpoint_test() {
    let mut list = TestList::new(16, 4, 176.0);
    let layout = list.item_layout(5).unwrap();
    // overlay still sitting on the original slot
    let mut session = session_for(&list, 5, list.cell_origin(5));

    assert!(try_swap(&mut list, &mut session, &[10, 9, 8, 7, 6], &layout));
    assert_eq!(list.moves, vec![(5, 10)]);
    assert_eq!(session.current_position, 10);
}

#[test]
fn moving_the_first_visible_item_compensates_the_scroll() {
    // scrolled one row down, so position 4 is the first visible item
    let mut list = TestList::new(16, 4, 88.0);
    list.scroll_offset = 44.0;
    assert_eq!(list.first_visible_position(), Some(4));

    let layout = list.item_layout(4).unwrap();
    let mut session = session_for(&list, 4, Pos2::new(2.0, 30.0));

    assert!(try_swap(&mut list, &mut session, &[8, 7, 6, 5], &layout));
    assert_eq!(list.moves, vec![(4, 8)]);
    // compensated by the target slot's vertical extent
    assert_eq!(list.scrolls, vec![-44.0]);
    assert_eq!(list.scroll_offset, 0.0);
}

#[test]
fn moving_into_the_first_visible_slot_compensates_the_scroll() {
    let mut list = TestList::new(16, 4, 88.0);
    list.scroll_offset = 44.0;
    assert_eq!(list.first_visible_position(), Some(4));

    let layout = list.item_layout(8).unwrap();
    // overlay well above the combined midpoint
    let mut session = session_for(&list, 8, Pos2::new(2.0, -10.0));

    assert!(try_swap(&mut list, &mut session, &[4, 5, 6, 7], &layout));
    assert_eq!(list.moves, vec![(8, 4)]);
    // compensated by the grabbed item's vertical extent
    assert_eq!(list.scrolls, vec![-44.0]);
}

#[test]
fn stale_item_identity_skips_the_swap() {
    let mut list = TestList::new(16, 4, 176.0);
    let layout = list.item_layout(5).unwrap();
    let mut session = session_for(&list, 5, Pos2::new(70.0, 46.0));
    session.item_id = egui::Id::new("somewhere else");

    assert!(!try_swap(&mut list, &mut session, &[6], &layout));
    assert!(list.moves.is_empty());
    assert_eq!(session.current_position, 5);
}
