//! Single-slot deferred task holder
//!
//! Classic debounce: scheduling a task cancels and replaces any pending one,
//! and the task only runs once the quiet period has elapsed since the last
//! schedule. The holder is polled from the host's event loop rather than
//! owning a timer thread, so tests can drive it with synthetic instants.

use std::time::{Duration, Instant};

/// A debounced, single-slot deferred task.
///
/// Holds at most one pending task of type `T`. [`Debouncer::schedule`]
/// replaces the slot and restarts the quiet period; [`Debouncer::poll`]
/// yields the task once its deadline has passed.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Schedule a task to run after the quiet period, replacing any pending
    /// task. Only the final task of a burst survives.
    pub fn schedule(&mut self, now: Instant, task: T) {
        self.pending = Some((now + self.quiet_period, task));
    }

    /// Drop the pending task, if any, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, task)| task)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending task will fire.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Take the task if its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => self.pending.take().map(|(_, task)| task),
            _ => None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}
