//! The drag-and-drop interaction controller.
//!
//! [`DragDropManager`] consumes the host's touch events, owns the drag
//! session lifetime, and orchestrates swap-target resolution, displaced-item
//! animation, and the edge auto-scroll loop. Everything runs on the host's
//! UI thread; the manager never blocks and never retains the list it is
//! given.

use egui::{Pos2, Vec2};

mod autoscroll;
mod decorator;
mod geometry;
mod host;
mod options;
mod range;
mod scheduler;
mod session;
mod swap;
mod swap_operator;

#[cfg(test)]
mod test_list;

#[cfg(test)]
mod swap_operator_tests;
#[cfg(test)]
mod swap_tests;

pub use host::{
    DragDropList, DragStateFlags, ItemLayout, Margins, OnItemDragEventListener, SettleAnimation,
    TouchEvent, Viewport,
};
pub use options::{
    DragDropOptions, basic_swap_target_translation_interpolator, decelerate_interpolator,
};
pub use range::{DraggableRange, RangeError};
pub use session::{DragState, ScrollDirection};

use decorator::DraggingItemDecorator;
use scheduler::PendingTasks;
use session::DragSession;
use swap_operator::SwapTargetItemOperator;

/// Provides touch-driven item reordering for a scrollable list or grid.
///
/// The manager is attached to one list at a time and fed that list's input
/// events via [`Self::on_touch_event`]. While it reports
/// [`Self::needs_animation_frame`], the host must call
/// [`Self::on_animation_frame`] once before each repaint; that drives the
/// auto-scroll loop, the long-press timer, and deferred cancellation.
#[derive(Debug, Default)]
pub struct DragDropManager {
    pub options: DragDropOptions,

    attached_list: Option<egui::Id>,
    state: DragState,

    // gesture bookkeeping, valid from the down event until drag start
    initial_touch: Pos2,
    initial_touch_item_id: Option<egui::Id>,

    // valid only while dragging
    session: Option<DragSession>,
    dragging_decorator: Option<DraggingItemDecorator>,
    swap_operator: Option<SwapTargetItemOperator>,
    autoscroll_active: bool,

    tasks: PendingTasks,
    listener: Option<Box<dyn OnItemDragEventListener>>,
}

impl DragDropManager {
    pub fn new(options: DragDropOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Attaches to the list identified by `list_id`.
    ///
    /// # Panics
    /// Panics if a list is already attached.
    pub fn attach(&mut self, list_id: egui::Id) {
        assert!(
            self.attached_list.is_none(),
            "a list has already been attached"
        );
        self.attached_list = Some(list_id);
        log::debug!("attached to list {list_id:?}");
    }

    /// Detaches from the current list, cancelling any in-progress drag
    /// immediately. Safe to call when already detached.
    pub fn detach(&mut self, list: &mut dyn DragDropList) {
        let Some(list_id) = self.attached_list else {
            return;
        };
        self.cancel_drag_immediate(list);
        self.tasks.clear();
        self.initial_touch_item_id = None;
        self.attached_list = None;
        log::debug!("detached from list {list_id:?}");
    }

    pub fn is_attached(&self) -> bool {
        self.attached_list.is_some()
    }

    /// Whether an item drag is currently being performed. A drag with a
    /// deferred cancel pending already counts as not dragging.
    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging && !self.tasks.deferred_cancel_pending()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn set_on_item_drag_event_listener(
        &mut self,
        listener: Option<Box<dyn OnItemDragEventListener>>,
    ) {
        self.listener = listener;
    }

    /// Cancels the current drag. The cancellation is deferred to the next
    /// event or animation frame so an in-flight touch dispatch can complete
    /// first; calling this again before then is a no-op, as is calling it
    /// when no drag is in progress.
    pub fn cancel_drag(&mut self) {
        if self.is_dragging() {
            self.tasks.post_deferred_cancel();
        }
    }

    /// Cancels the current drag synchronously.
    pub fn cancel_drag_immediate(&mut self, list: &mut dyn DragDropList) {
        self.finish_dragging(list, false);
    }

    /// Feeds one pointer event. Returns `true` when the event was consumed
    /// by an active drag and should not reach the host's other handlers.
    pub fn on_touch_event(&mut self, list: &mut dyn DragDropList, event: TouchEvent) -> bool {
        if self.attached_list.is_none() {
            return false;
        }
        self.process_deferred_cancel(list);

        match event {
            TouchEvent::Down { pos, time } => {
                if !self.is_dragging() {
                    self.handle_action_down(list, pos, time);
                }
                false
            }
            TouchEvent::Move { pos } => {
                if self.is_dragging() {
                    self.handle_action_move_while_dragging(list, pos);
                    true
                } else {
                    self.handle_action_move_while_not_dragging(list, pos)
                }
            }
            TouchEvent::Up { .. } => self.handle_action_up_or_cancel(list, false),
            TouchEvent::Cancel => self.handle_action_up_or_cancel(list, true),
        }
    }

    /// Runs the per-frame work: deferred cancellation, the long-press timer,
    /// and one auto-scroll tick followed by a swap re-check. The host calls
    /// this once before each repaint while [`Self::needs_animation_frame`]
    /// is `true`; `now` is the host clock in seconds.
    pub fn on_animation_frame(&mut self, list: &mut dyn DragDropList, now: f64) {
        if self.attached_list.is_none() {
            return;
        }
        self.process_deferred_cancel(list);

        if let Some(down_pos) = self.tasks.take_due_long_press(now) {
            if self.options.initiate_on_long_press {
                // Same path as move initiation, minus the touch-slop check.
                self.check_condition_and_start_dragging(list, down_pos, false);
            }
        }

        if self.autoscroll_active {
            if let (Some(session), Some(decorator), Some(operator)) = (
                self.session.as_ref(),
                self.dragging_decorator.as_mut(),
                self.swap_operator.as_mut(),
            ) {
                autoscroll::handle_scroll_on_dragging(
                    list,
                    session,
                    decorator,
                    operator,
                    &self.options,
                );
            }
            // Re-check swap candidates with the post-scroll geometry.
            self.check_item_swapping(list);
        }
    }

    /// Whether the host must schedule an animation frame for this manager.
    pub fn needs_animation_frame(&self) -> bool {
        self.autoscroll_active
            || self.tasks.long_press_pending()
            || self.tasks.deferred_cancel_pending()
    }

    /// The dragged item's current clamped top-left in list-local
    /// coordinates, for hosts that draw the floating item themselves.
    pub fn dragging_item_translation(&self) -> Option<Pos2> {
        self.dragging_decorator
            .as_ref()
            .filter(|_| self.session.is_some())
            .map(|d| d.translation())
    }

    /// The slot the dragged item currently occupies.
    pub fn dragging_item_position(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.current_position)
    }

    /// Translation currently applied to a displaced swap-target item.
    pub fn swap_target_translation(&self, position: usize) -> Option<Vec2> {
        self.swap_operator
            .as_ref()
            .and_then(|o| o.translation_of(position))
    }

    /// Drag-state flags for the item at `position`, for the host's
    /// rendering.
    pub fn drag_state_flags(&self, position: usize) -> DragStateFlags {
        let Some(session) = &self.session else {
            return DragStateFlags::empty();
        };
        let mut flags = DragStateFlags::DRAGGING;
        if position == session.current_position {
            flags |= DragStateFlags::ACTIVE;
        }
        if session.range.contains(position) {
            flags |= DragStateFlags::IN_RANGE;
        }
        flags
    }

    /// The host recycled the dragged item's view mid-drag. The drag keeps
    /// running; the manager just stops driving the stale view.
    pub fn notify_dragging_item_recycled(&mut self) {
        if let Some(decorator) = self.dragging_decorator.as_mut() {
            decorator.invalidate_item();
        }
    }

    /// The host bound a fresh view for the dragged item.
    ///
    /// # Panics
    /// Panics if the previous view was not invalidated first.
    pub fn notify_dragging_item_bound(&mut self) {
        if let Some(decorator) = self.dragging_decorator.as_mut() {
            decorator.bind_item();
        }
    }

    fn process_deferred_cancel(&mut self, list: &mut dyn DragDropList) {
        if self.tasks.take_deferred_cancel() {
            self.finish_dragging(list, false);
        }
    }

    fn handle_action_down(&mut self, list: &mut dyn DragDropList, pos: Pos2, time: f64) {
        let Some(position) = list.item_under(pos) else {
            return;
        };
        if !check_touched_item_state(list, position) {
            return;
        }

        self.initial_touch = pos;
        self.initial_touch_item_id = list.item_id(position);

        if self.options.initiate_on_long_press {
            self.tasks
                .schedule_long_press(time + self.options.long_press_timeout, pos);
            self.state = DragState::Armed;
        }
    }

    fn handle_action_move_while_not_dragging(
        &mut self,
        list: &mut dyn DragDropList,
        pos: Pos2,
    ) -> bool {
        if self.options.initiate_on_move {
            self.check_condition_and_start_dragging(list, pos, true)
        } else {
            false
        }
    }

    fn check_condition_and_start_dragging(
        &mut self,
        list: &mut dyn DragDropList,
        pos: Pos2,
        check_touch_slop: bool,
    ) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(initial_id) = self.initial_touch_item_id else {
            return false;
        };

        if check_touch_slop && (pos.y - self.initial_touch.y).abs() <= self.options.touch_slop {
            return false;
        }

        let Some(position) = list.item_under(pos) else {
            return false;
        };
        if !check_touched_item_state(list, position)
            || list.item_id(position) != Some(initial_id)
        {
            // The pressed item was recycled or rebound under the pointer.
            // Soft condition: silently reset the gesture.
            self.initial_touch_item_id = None;
            self.tasks.cancel_long_press();
            if self.state == DragState::Armed {
                self.state = DragState::Idle;
            }
            return false;
        }

        let Some(layout) = list.item_layout(position) else {
            return false;
        };
        let grab = pos - layout.rect.min;
        if !list.can_start_drag(position, grab) {
            return false;
        }

        // Configuration errors: fail fast, before any state mutation.
        assert!(
            self.options.columns_per_row >= 1,
            "columns_per_row must be at least 1"
        );
        let range = list
            .draggable_range(position)
            .unwrap_or_else(|| DraggableRange::full(list.item_count()));
        if let Err(err) = range.validate(list.item_count(), position) {
            panic!("{err}");
        }

        self.start_dragging(list, pos, position, initial_id, &layout, range);
        true
    }

    fn start_dragging(
        &mut self,
        list: &mut dyn DragDropList,
        touch: Pos2,
        position: usize,
        item_id: egui::Id,
        layout: &ItemLayout,
        range: DraggableRange,
    ) {
        self.tasks.cancel_long_press();

        let grab_offset = touch - layout.rect.min;
        self.session = Some(DragSession::new(
            item_id,
            range,
            position,
            touch,
            grab_offset,
            layout.rect.width(),
            layout.margins,
        ));
        self.state = DragState::Dragging;

        list.set_over_scroll_suppressed(true);
        list.on_drag_started(position, range);
        self.autoscroll_active = true;

        let mut decorator =
            DraggingItemDecorator::new(grab_offset, layout.rect.size(), range);
        decorator.start(list, touch, position);

        let mut operator = SwapTargetItemOperator::new(item_id, layout, range);
        operator.update(decorator.translation());
        operator.apply(list, position, &self.options);

        self.dragging_decorator = Some(decorator);
        self.swap_operator = Some(operator);

        log::debug!("dragging started (position: {position})");
        if let Some(listener) = &mut self.listener {
            listener.on_dragging_started(position);
        }
    }

    fn handle_action_move_while_dragging(&mut self, list: &mut dyn DragDropList, pos: Pos2) {
        let scroll_touch_slop = self.options.scroll_touch_slop();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.record_touch(pos);
        session.update_scroll_direction_mask(scroll_touch_slop);
        let current_position = session.current_position;

        if let Some(decorator) = self.dragging_decorator.as_mut() {
            decorator.update(list, pos, current_position);
            if let Some(operator) = self.swap_operator.as_mut() {
                operator.update(decorator.translation());
                operator.apply(list, current_position, &self.options);
            }
        }

        self.check_item_swapping(list);
    }

    fn check_item_swapping(&mut self, list: &mut dyn DragDropList) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(layout) = list.item_layout(session.current_position) else {
            return;
        };

        let Some(target) = geometry::resolve_swap_target(
            session.current_position,
            layout.rect.min,
            session.overlay_origin(),
            session.grabbed_item_size,
            self.options.columns_per_row,
            list.item_count(),
            &session.range,
        ) else {
            return;
        };
        let chain = geometry::swap_chain(session.current_position, target);
        if chain.is_empty() {
            return;
        }

        swap::try_swap(list, session, &chain, &layout);
    }

    fn handle_action_up_or_cancel(&mut self, list: &mut dyn DragDropList, cancelled: bool) -> bool {
        self.tasks.cancel_long_press();
        self.initial_touch = Pos2::ZERO;
        self.initial_touch_item_id = None;
        if self.state == DragState::Armed {
            self.state = DragState::Idle;
        }

        if self.is_dragging() {
            log::debug!("dragging finished --- cancelled = {cancelled}");
            self.finish_dragging(list, !cancelled);
            true
        } else {
            false
        }
    }

    fn finish_dragging(&mut self, list: &mut dyn DragDropList, success: bool) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.state = DragState::Finishing;
        self.tasks.clear();
        self.initial_touch_item_id = None;
        self.autoscroll_active = false;

        list.set_over_scroll_suppressed(false);

        let settle = SettleAnimation {
            duration: self.options.settle_animation_duration,
            interpolator: self.options.settle_animation_interpolator,
        };
        if let Some(mut decorator) = self.dragging_decorator.take() {
            decorator.finish(list, session.current_position, settle);
        }
        if let Some(mut operator) = self.swap_operator.take() {
            operator.finish(list, settle);
        }

        let from = session.initial_position;
        let to = session.current_position;
        list.on_drag_finished(to, success);
        self.state = DragState::Idle;

        log::debug!("drag session ended (from: {from}, to: {to}, success: {success})");
        if let Some(listener) = &mut self.listener {
            listener.on_dragging_finished(from, to, success);
        }
    }
}

/// The touched item is in a draggable, identity-consistent state.
fn check_touched_item_state(list: &dyn DragDropList, position: usize) -> bool {
    if !list.is_draggable(position) {
        return false;
    }
    position < list.item_count() && list.item_id(position).is_some()
}
