use std::time::{Duration, Instant};

/// Quiet period the explorer UI waits after the last filter keystroke.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Coalesces a burst of updates into the last one.
///
/// Each [`push`](Self::push) replaces the pending value and restarts the timer; [`poll`](Self::poll)
/// hands the value out once nothing new has arrived for `wait`. The clock is passed in, so the
/// caller decides where time comes from.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self { wait, pending: None }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Replace the pending value and restart the quiet period at `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Take the pending value if it has been quiet for at least `wait` as of `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = match &self.pending {
            Some((_, at)) => now.saturating_duration_since(*at) >= self.wait,
            None => false,
        };
        if ready {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// When the pending value becomes ready, if there is one.
    ///
    /// `None` also when that instant is not representable (an enormous `wait`).
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .and_then(|(_, at)| at.checked_add(self.wait))
    }

    /// Take the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
