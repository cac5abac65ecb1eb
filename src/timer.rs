//! One-shot timer scheduling.
//!
//! Components never sleep. They hand an event and a delay to a [`Scheduler`]
//! and receive the event back once the delay elapses. Repeating intervals are
//! expressed as an event that schedules its own successor.
//!
//! [`ManualTimers`] is a virtual clock that delivers events in due order only
//! when asked, which makes whole animation sequences replayable in tests. The
//! browser implementation lives next to the DOM glue.

use std::collections::{BTreeMap, HashMap};

/// Handle for cancelling a scheduled event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

pub trait Scheduler<E> {
    /// Delivers `event` once `delay_ms` milliseconds have elapsed.
    fn schedule(&mut self, delay_ms: u32, event: E) -> TimerId;

    /// Drops a pending event. Unknown or already-delivered ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Virtual-time scheduler. Events due at the same instant come out in the
/// order they were scheduled.
#[derive(Debug)]
pub struct ManualTimers<E> {
    now: u64,
    next_seq: u64,
    queue: BTreeMap<(u64, u64), E>,
    due_at: HashMap<u64, u64>,
}

impl<E> Default for ManualTimers<E> {
    fn default() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
            due_at: HashMap::new(),
        }
    }
}

impl<E> ManualTimers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest pending event.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    /// Removes the earliest event due at or before `until`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<E> {
        let (&(due, seq), _) = self.queue.iter().next()?;
        if due > until {
            return None;
        }
        self.due_at.remove(&seq);
        self.now = self.now.max(due);
        self.queue.remove(&(due, seq))
    }

    /// Moves the clock forward without delivering anything.
    pub fn advance_to(&mut self, time: u64) {
        self.now = self.now.max(time);
    }
}

impl<E> Scheduler<E> for ManualTimers<E> {
    fn schedule(&mut self, delay_ms: u32, event: E) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = self.now + u64::from(delay_ms);
        self.queue.insert((due, seq), event);
        self.due_at.insert(seq, due);
        TimerId(seq)
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(due) = self.due_at.remove(&id.0) {
            self.queue.remove(&(due, id.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_in_due_order() {
        let mut timers = ManualTimers::new();
        timers.schedule(50, "b");
        timers.schedule(10, "a");
        timers.schedule(50, "c");

        assert_eq!(timers.pop_due(5), None);
        assert_eq!(timers.pop_due(100), Some("a"));
        assert_eq!(timers.now(), 10);
        assert_eq!(timers.pop_due(100), Some("b"));
        assert_eq!(timers.pop_due(100), Some("c"));
        assert_eq!(timers.now(), 50);
        assert_eq!(timers.pop_due(100), None);
    }

    #[test]
    fn delay_is_relative_to_current_time() {
        let mut timers = ManualTimers::new();
        timers.advance_to(1_000);
        timers.schedule(25, ());
        assert_eq!(timers.next_due(), Some(1_025));
    }

    #[test]
    fn cancelled_events_never_fire() {
        let mut timers = ManualTimers::new();
        let id = timers.schedule(10, 1);
        timers.schedule(20, 2);
        timers.cancel(id);
        timers.cancel(id);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.pop_due(u64::MAX), Some(2));
    }
}
