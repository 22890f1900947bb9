use egui::Pos2;

/// Cancellable scheduled work owned by the manager.
///
/// Everything runs on the host's single UI thread, so "scheduling" is just
/// bookkeeping polled from the next event or animation frame: a pending slot
/// acts as the cancel token, and a cleared slot makes any late poll a
/// guaranteed no-op.
#[derive(Debug, Default)]
pub(crate) struct PendingTasks {
    long_press: Option<LongPress>,
    deferred_cancel: bool,
}

#[derive(Clone, Copy, Debug)]
struct LongPress {
    deadline: f64,
    down_pos: Pos2,
}

impl PendingTasks {
    /// Arms the long-press timer, replacing any previous one.
    pub fn schedule_long_press(&mut self, deadline: f64, down_pos: Pos2) {
        self.long_press = Some(LongPress { deadline, down_pos });
    }

    /// Disarms the long-press timer and releases the saved down position.
    pub fn cancel_long_press(&mut self) {
        self.long_press = None;
    }

    pub fn long_press_pending(&self) -> bool {
        self.long_press.is_some()
    }

    /// Consumes the long-press timer if its deadline has passed, yielding the
    /// saved down position.
    pub fn take_due_long_press(&mut self, now: f64) -> Option<Pos2> {
        if self.long_press.is_some_and(|lp| now >= lp.deadline) {
            self.long_press.take().map(|lp| lp.down_pos)
        } else {
            None
        }
    }

    /// Posts a deferred cancel. Returns `false` (and does nothing) when one
    /// is already pending, which makes a second cancel a no-op.
    pub fn post_deferred_cancel(&mut self) -> bool {
        if self.deferred_cancel {
            return false;
        }
        self.deferred_cancel = true;
        true
    }

    pub fn deferred_cancel_pending(&self) -> bool {
        self.deferred_cancel
    }

    /// Consumes a pending deferred cancel.
    pub fn take_deferred_cancel(&mut self) -> bool {
        std::mem::take(&mut self.deferred_cancel)
    }

    pub fn clear(&mut self) {
        self.long_press = None;
        self.deferred_cancel = false;
    }
}
