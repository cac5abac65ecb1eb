use crate::timer::{Scheduler, TimerId};

/// Cancel-and-reschedule debounce around a single pending timer.
///
/// Every [`trigger`](Self::trigger) cancels the pending event, if any, and
/// schedules a fresh one `quiet_ms` from now. The owner calls
/// [`settle`](Self::settle) when the event is delivered.
#[derive(Debug)]
pub struct Debouncer {
    quiet_ms: u32,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(quiet_ms: u32) -> Self {
        Self {
            quiet_ms,
            pending: None,
        }
    }

    pub fn trigger<E, S: Scheduler<E>>(&mut self, timers: &mut S, event: E) {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
        self.pending = Some(timers.schedule(self.quiet_ms, event));
    }

    pub fn settle(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
