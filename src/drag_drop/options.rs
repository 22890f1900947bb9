/// Options for [`super::DragDropManager`].
#[derive(Clone, Copy, Debug)]
pub struct DragDropOptions {
    /// Start dragging after a long press instead of (or in addition to) a
    /// move past the touch slop.
    pub initiate_on_long_press: bool,

    /// Start dragging once the pointer moves past the touch slop. (default: true)
    pub initiate_on_move: bool,

    /// Long-press timeout in seconds, measured from the down event.
    pub long_press_timeout: f64,

    /// Pointer travel (in points) required before a press is treated as a
    /// drag rather than a tap.
    pub touch_slop: f32,

    /// The auto-scroll hysteresis slop is `touch_slop` times this factor.
    pub scroll_touch_slop_multiplier: f32,

    /// Number of grid columns the swap-target direction table assumes.
    /// Use `1` for a plain vertical list. Must be at least 1; a zero value
    /// is rejected at drag start.
    pub columns_per_row: usize,

    /// Display scale factor applied to the auto-scroll speed.
    pub display_density: f32,

    /// Normalized distance from the viewport center past which auto-scroll
    /// engages. Must be within `0.0..0.5`.
    pub edge_scroll_threshold: f32,

    /// Base auto-scroll speed in points per frame at full acceleration.
    pub edge_scroll_amount_coeff: f32,

    /// Duration of the "settle back into place" animation, in seconds.
    pub settle_animation_duration: f64,

    /// Easing for the settle animation; linear when `None`.
    pub settle_animation_interpolator: Option<fn(f32) -> f32>,

    /// Reshapes the swap-target translation phase before it is applied;
    /// identity when `None`.
    pub swap_target_translation_interpolator: Option<fn(f32) -> f32>,
}

impl Default for DragDropOptions {
    fn default() -> Self {
        Self {
            initiate_on_long_press: false,
            initiate_on_move: true,
            long_press_timeout: 0.5,
            touch_slop: 8.0,
            scroll_touch_slop_multiplier: 1.5,
            columns_per_row: 4,
            display_density: 1.0,
            edge_scroll_threshold: 0.3,
            edge_scroll_amount_coeff: 25.0,
            settle_animation_duration: 0.2,
            settle_animation_interpolator: Some(decelerate_interpolator),
            swap_target_translation_interpolator: Some(basic_swap_target_translation_interpolator),
        }
    }
}

impl DragDropOptions {
    pub(crate) fn scroll_touch_slop(&self) -> f32 {
        self.touch_slop * self.scroll_touch_slop_multiplier
    }
}

/// Ease-out quadratic, the default settle easing.
pub fn decelerate_interpolator(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Default swap-target phase shaping: flat near 0 and 1 with a linear ramp
/// through the middle, so displaced items commit to a slot instead of
/// tracking every pointer wiggle.
pub fn basic_swap_target_translation_interpolator(t: f32) -> f32 {
    const THRESHOLD: f32 = 0.3;
    let low = 0.5 - THRESHOLD;
    let high = 0.5 + THRESHOLD;
    if t < low {
        0.0
    } else if t > high {
        1.0
    } else {
        (t - low) / (2.0 * THRESHOLD)
    }
}
