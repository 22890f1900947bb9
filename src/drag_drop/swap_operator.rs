use egui::{Pos2, Vec2};

use super::geometry;
use super::host::{DragDropList, ItemLayout, Margins, SettleAnimation};
use super::options::DragDropOptions;
use super::range::DraggableRange;

/// Smoothing factor applied to the translation phase each frame.
const PHASE_SMOOTHING: f32 = 0.3;
/// Snap distance below which the smoothed phase locks onto the requested one,
/// guaranteeing convergence.
const PHASE_SNAP: f32 = 0.01;

/// Drives the displaced swap-target items: resolves the current swap chain
/// from the dragged item's (clamped) position each frame, computes a smoothed
/// translation phase, and pushes per-item translations to the host.
#[derive(Debug)]
pub(crate) struct SwapTargetItemOperator {
    dragging_item_id: egui::Id,
    dragging_item_size: f32,
    dragging_item_margins: Margins,
    dragging_item_decoration: Margins,
    range: DraggableRange,
    translation: Pos2,
    chain: Vec<usize>,
    req_phase: f32,
    cur_phase: f32,
    applied: ahash::HashMap<usize, Vec2>,
}

impl SwapTargetItemOperator {
    pub fn new(dragging_item_id: egui::Id, layout: &ItemLayout, range: DraggableRange) -> Self {
        Self {
            dragging_item_id,
            dragging_item_size: layout.rect.width(),
            dragging_item_margins: layout.margins,
            dragging_item_decoration: layout.decoration,
            range,
            translation: Pos2::ZERO,
            chain: Vec::new(),
            req_phase: 0.0,
            cur_phase: 0.0,
            applied: ahash::HashMap::default(),
        }
    }

    /// Records the dragged item's latest clamped position.
    pub fn update(&mut self, translation: Pos2) {
        self.translation = translation;
    }

    /// One frame of displaced-item animation.
    pub fn apply(
        &mut self,
        list: &mut dyn DragDropList,
        dragged_position: usize,
        options: &DragDropOptions,
    ) {
        if list.item_id(dragged_position) != Some(self.dragging_item_id) {
            // View state has not been synced to the data yet.
            return;
        }
        let Some(dragged_layout) = list.item_layout(dragged_position) else {
            return;
        };

        let chain = geometry::resolve_swap_target(
            dragged_position,
            dragged_layout.rect.min,
            self.translation,
            self.dragging_item_size,
            options.columns_per_row,
            list.item_count(),
            &self.range,
        )
        .map(|target| geometry::swap_chain(dragged_position, target))
        .unwrap_or_default();

        // Items that left the chain settle back before this frame's phase is
        // applied to the new targets.
        let stale: Vec<usize> = self
            .chain
            .iter()
            .copied()
            .filter(|p| !chain.contains(p))
            .collect();
        for position in stale {
            list.set_item_translation(position, Vec2::ZERO);
            self.applied.remove(&position);
        }

        if let Some(&target) = chain.first() {
            self.req_phase = self.calculate_translation_phase(list, &dragged_layout, target);
            self.cur_phase = if self.chain != chain {
                // A fresh chain snaps; only a stable one is interpolated.
                self.req_phase
            } else {
                smooth_phase(self.cur_phase, self.req_phase)
            };
            // One phase drives the whole chain; the displaced items shift in
            // lockstep.
            for &position in &chain {
                self.apply_translation(
                    list,
                    dragged_position,
                    position,
                    self.cur_phase,
                    options.columns_per_row,
                    options.swap_target_translation_interpolator,
                );
            }
        }

        self.chain = chain;
    }

    /// Translation currently applied to a displaced item, if any.
    pub fn translation_of(&self, position: usize) -> Option<Vec2> {
        self.applied.get(&position).copied()
    }

    pub fn finish(&mut self, list: &mut dyn DragDropList, settle: SettleAnimation) {
        for position in std::mem::take(&mut self.chain) {
            list.settle_item(position, settle);
        }
        self.applied.clear();
        self.cur_phase = 0.0;
        self.req_phase = 0.0;
    }

    /// Normalized progress of the displaced item's shift: the dragged item's
    /// displacement from its slot over the swap target's horizontal extent,
    /// clamped to `[0, 1]`.
    fn calculate_translation_phase(
        &self,
        list: &dyn DragDropList,
        dragged_layout: &ItemLayout,
        target: usize,
    ) -> f32 {
        let Some(target_layout) = list.item_layout(target) else {
            return 0.0;
        };
        let extent = target_layout.horizontal_extent();
        if extent == 0.0 {
            return 0.0;
        }
        let offset = (dragged_layout.rect.left() - self.translation.x)
            .abs()
            .max((dragged_layout.rect.top() - self.translation.y).abs());
        (offset / extent).clamp(0.0, 1.0)
    }

    fn apply_translation(
        &mut self,
        list: &mut dyn DragDropList,
        dragged_position: usize,
        target_position: usize,
        phase: f32,
        columns: usize,
        interpolator: Option<fn(f32) -> f32>,
    ) {
        let h1 = self.dragging_item_size
            + self.dragging_item_margins.horizontal()
            + self.dragging_item_decoration.horizontal();
        let h2 = self.dragging_item_size
            + self.dragging_item_margins.vertical()
            + self.dragging_item_decoration.vertical();
        let phase = interpolator.map_or(phase, |f| f(phase));

        let translation = if dragged_position > target_position {
            // dragged item moving toward the front
            if (target_position + 1) % columns != 0 {
                Vec2::new(phase * h1, 0.0)
            } else {
                // Row boundary: the displaced item wraps to the next row
                // instead of shifting partially.
                Vec2::new(-phase * h1 * columns as f32, phase * h2)
            }
        } else {
            // dragged item moving toward the back
            if target_position % columns != 0 {
                Vec2::new(-phase * h1, 0.0)
            } else {
                Vec2::new(phase * h1 * columns as f32, -phase * h2)
            }
        };

        list.set_item_translation(target_position, translation);
        self.applied.insert(target_position, translation);
    }
}

/// Frame-to-frame phase smoothing with a snap once close enough, so the
/// phase converges instead of micro-oscillating forever.
pub(crate) fn smooth_phase(cur: f32, req: f32) -> f32 {
    let next = cur * (1.0 - PHASE_SMOOTHING) + req * PHASE_SMOOTHING;
    if (next - req).abs() < PHASE_SNAP { req } else { next }
}
