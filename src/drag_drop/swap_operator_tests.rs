use egui::Vec2;

use super::host::DragDropList;
use super::options::DragDropOptions;
use super::range::DraggableRange;
use super::swap_operator::{SwapTargetItemOperator, smooth_phase};
use super::test_list::TestList;

/// Options with the phase interpolator disabled so translations are linear
/// in the phase and assertable exactly.
fn linear_options() -> DragDropOptions {
    DragDropOptions {
        swap_target_translation_interpolator: None,
        ..Default::default()
    }
}

fn operator_for(list: &TestList, position: usize) -> SwapTargetItemOperator {
    SwapTargetItemOperator::new(
        list.item_id(position).unwrap(),
        &list.item_layout(position).unwrap(),
        DraggableRange::full(list.item_count()),
    )
}

#[test]
fn displaced_item_shifts_by_the_translation_phase() {
    let mut list = TestList::new(16, 4, 176.0);
    let mut operator = operator_for(&list, 5);

    // dragged halfway toward slot 6: phase 22 / 44 = 0.5
    operator.update(list.cell_origin(5) + Vec2::new(22.0, 0.0));
    operator.apply(&mut list, 5, &linear_options());

    assert_eq!(operator.translation_of(6), Some(Vec2::new(-22.0, 0.0)));
    assert_eq!(list.translations[&6], Vec2::new(-22.0, 0.0));
}

#[test]
fn translation_phase_is_clamped_to_one_full_slot() {
    let mut list = TestList::new(16, 4, 176.0);
    let mut operator = operator_for(&list, 5);

    // dragged well past slot 6; the displaced shift tops out at one extent
    operator.update(list.cell_origin(5) + Vec2::new(80.0, 0.0));
    operator.apply(&mut list, 5, &linear_options());

    assert_eq!(operator.translation_of(6), Some(Vec2::new(-44.0, 0.0)));
}

#[test]
fn stable_chain_phase_is_smoothed_between_frames() {
    let mut list = TestList::new(16, 4, 176.0);
    let mut operator = operator_for(&list, 5);

    operator.update(list.cell_origin(5) + Vec2::new(22.0, 0.0));
    operator.apply(&mut list, 5, &linear_options());

    // same chain, phase request jumps to 1.0; only one smoothing step lands
    operator.update(list.cell_origin(5) + Vec2::new(44.0, 0.0));
    operator.apply(&mut list, 5, &linear_options());

    let applied = operator.translation_of(6).unwrap();
    assert!((applied.x - (-0.65 * 44.0)).abs() < 1e-3);
    assert_eq!(applied.y, 0.0);
}

#[test]
fn items_leaving_the_chain_are_reset() {
    let mut list = TestList::new(16, 4, 176.0);
    let mut operator = operator_for(&list, 5);

    operator.update(list.cell_origin(5) + Vec2::new(22.0, 0.0));
    operator.apply(&mut list, 5, &linear_options());
    assert!(operator.translation_of(6).is_some());

    // back inside the dead zone: no target, the old chain settles to rest
    operator.update(list.cell_origin(5));
    operator.apply(&mut list, 5, &linear_options());

    assert_eq!(operator.translation_of(6), None);
    assert_eq!(list.translations[&6], Vec2::ZERO);
}

#[test]
fn displaced_item_wraps_across_the_row_boundary_moving_front() {
    let mut list = TestList::new(16, 4, 176.0);
    let mut operator = operator_for(&list, 4);

    // dragging item 4 halfway toward slot 3, the end of the previous row
    operator.update(list.cell_origin(4) + Vec2::new(-22.0, 0.0));
    operator.apply(&mut list, 4, &linear_options());

    // the displaced item shifts a whole row forward and one row down
    assert_eq!(operator.translation_of(3), Some(Vec2::new(-88.0, 22.0)));
}

#[test]
fn displaced_item_wraps_across_the_row_boundary_moving_back() {
    let mut list = TestList::new(16, 4, 176.0);
    let mut operator = operator_for(&list, 3);

    // dragging item 3 halfway toward slot 4, the start of the next row
    operator.update(list.cell_origin(3) + Vec2::new(22.0, 0.0));
    operator.apply(&mut list, 3, &linear_options());

    assert_eq!(operator.translation_of(4), Some(Vec2::new(88.0, -22.0)));
}

#[test]
fn mismatched_dragged_item_identity_is_a_no_op() {
    let mut list = TestList::new(16, 4, 176.0);
    let mut operator = SwapTargetItemOperator::new(
        egui::Id::new("stale"),
        &list.item_layout(5).unwrap(),
        DraggableRange::full(16),
    );

    operator.update(list.cell_origin(5) + Vec2::new(22.0, 0.0));
    operator.apply(&mut list, 5, &linear_options());

    assert!(list.translations.is_empty());
    assert_eq!(operator.translation_of(6), None);
}

#[test]
fn phase_smoothing_converges_and_snaps() {
    let mut cur = 0.0;
    for _ in 0..60 {
        cur = smooth_phase(cur, 1.0);
    }
    assert_eq!(cur, 1.0);

    // within the snap distance after one step
    assert_eq!(smooth_phase(0.995, 1.0), 1.0);
    // a single far step only covers the smoothing fraction
    let one = smooth_phase(0.5, 1.0);
    assert!((one - 0.65).abs() < 1e-6);
}
