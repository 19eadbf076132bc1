//! Trailing-edge debounce driven by caller-supplied instants.
//!
//! The plugin has no async runtime: a keystroke [`push`](Debouncer::push)es
//! the latest value and schedules a host timer for the returned delay; each
//! timer tick calls [`poll`](Debouncer::poll), which yields the value only
//! once the quiet period since the most recent push has elapsed. Earlier
//! pending values are replaced, never queued.

use std::time::{Duration, Instant};

/// Quiet period before a typed search query is applied.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Debouncer<V> {
    delay: Duration,
    pending: Option<(V, Instant)>,
}

impl<V> Default for Debouncer<V> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl<V> Debouncer<V> {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replaces any pending value and restarts the quiet period.
    ///
    /// Returns how long the caller should wait before polling.
    pub fn push(&mut self, value: V, now: Instant) -> Duration {
        self.pending = Some((value, now + self.delay));
        self.delay
    }

    /// Takes the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<V> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Time left until the pending value is due.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }

    /// Takes the pending value immediately, regardless of deadline.
    pub fn flush(&mut self) -> Option<V> {
        self.pending.take().map(|(v, _)| v)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_push_supersedes_pending_value() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.push("Mario", t0);
        debouncer.push("Mario R", t0 + Duration::from_millis(120));

        let applied: Vec<_> = [300, 419, 420, 700]
            .iter()
            .filter_map(|ms| debouncer.poll(t0 + Duration::from_millis(*ms)))
            .collect();
        assert_eq!(applied, vec!["Mario R"]);
    }

    #[test]
    fn poll_before_deadline_keeps_value() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.push(1, t0);
        assert_eq!(debouncer.poll(t0), None);
        assert_eq!(debouncer.remaining(t0), Some(DEFAULT_DEBOUNCE));
        assert_eq!(debouncer.flush(), Some(1));
        assert!(!debouncer.is_pending());
    }
}
