//! Cancellable value polling.
//!
//! Some host widget values (a video filename selector, for example) offer no
//! change notification; the only option is to poll. [`ValueWatcher`] models
//! that poll as an explicit task object owned by the widget instance:
//! the host's scheduler calls [`poll`](ValueWatcher::poll) on a fixed
//! interval, and the owning widget cancels the watcher on teardown so no
//! recurring task outlives its node.

/// Poll interval the host scheduler should use, in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 500;

/// Detects changes of an externally owned value across poll ticks.
#[derive(Debug, Clone, Default)]
pub struct ValueWatcher<T: PartialEq + Clone> {
    last: Option<T>,
    cancelled: bool,
}

impl<T: PartialEq + Clone> ValueWatcher<T> {
    /// Create a watcher that has not yet observed a value.
    pub fn new() -> Self {
        Self {
            last: None,
            cancelled: false,
        }
    }

    /// Create a watcher primed with the value's current state, so the first
    /// poll only fires on an actual change.
    pub fn with_initial(value: T) -> Self {
        Self {
            last: Some(value),
            cancelled: false,
        }
    }

    /// One poll tick: returns `true` when the value differs from the last
    /// observed one. A cancelled watcher never fires.
    pub fn poll(&mut self, current: &T) -> bool {
        if self.cancelled {
            return false;
        }
        if self.last.as_ref() == Some(current) {
            return false;
        }
        self.last = Some(current.clone());
        true
    }

    /// Stop the watcher permanently. Called on widget teardown.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Whether the watcher has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_on_change_only() {
        let mut watcher = ValueWatcher::with_initial("a.mp4".to_string());

        assert!(!watcher.poll(&"a.mp4".to_string()));
        assert!(watcher.poll(&"b.mp4".to_string()));
        assert!(!watcher.poll(&"b.mp4".to_string()));
    }

    #[test]
    fn test_unprimed_watcher_fires_on_first_value() {
        let mut watcher = ValueWatcher::new();
        assert!(watcher.poll(&1));
        assert!(!watcher.poll(&1));
    }

    #[test]
    fn test_cancelled_watcher_never_fires() {
        let mut watcher = ValueWatcher::with_initial(1);
        watcher.cancel();

        assert!(watcher.is_cancelled());
        assert!(!watcher.poll(&2));
        assert!(!watcher.poll(&3));
    }
}
