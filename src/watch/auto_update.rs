// Auto-update state
//
// Two states: disabled (no watcher, no deadline) and enabled (exactly one
// watcher, at most one pending deadline). All transitions go through
// `set_enabled` and `shutdown`.

use std::time::Duration;
use tokio::time::Instant;

use super::{SourceWatcher, WatchError};

type Spawn<W> = Box<dyn FnMut() -> Result<W, WatchError>>;

/// Owns the file watcher and the debounce deadline.
///
/// Generic over the watcher type so the state machine can be driven
/// without touching the filesystem.
pub struct AutoUpdate<W = SourceWatcher> {
    spawn: Spawn<W>,
    watcher: Option<W>,
    deadline: Option<Instant>,
    debounce: Duration,
}

impl<W> AutoUpdate<W> {
    pub fn new(
        debounce: Duration,
        spawn: impl FnMut() -> Result<W, WatchError> + 'static,
    ) -> Self {
        Self {
            spawn: Box::new(spawn),
            watcher: None,
            deadline: None,
            debounce,
        }
    }

    /// Enable or disable watching. Repeating the current state is a no-op.
    ///
    /// When the watcher cannot be created the state stays disabled.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), WatchError> {
        match (enabled, self.is_watching()) {
            (true, false) => {
                self.watcher = Some((self.spawn)()?);
                tracing::info!("auto update enabled");
            }
            (false, true) => {
                self.watcher = None;
                self.deadline = None;
                tracing::info!("auto update disabled");
            }
            _ => {}
        }
        Ok(())
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Record a file change; (re)arms the deadline to `now + debounce`.
    ///
    /// Changes that arrive while disabled (already queued when the watcher
    /// was dropped) are ignored.
    pub fn on_change(&mut self, now: Instant) {
        if !self.is_watching() {
            return;
        }
        if self.has_pending() {
            tracing::trace!("debounce window restarted");
        }
        self.deadline = Some(now + self.debounce);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn has_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed. True means "generate now".
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the watcher and any pending deadline.
    pub fn shutdown(&mut self) {
        self.deadline = None;
        self.watcher = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const DEBOUNCE: Duration = Duration::from_millis(300);

    /// State driven by a counter instead of real watchers; returns the
    /// number of spawns so far.
    fn counting() -> (AutoUpdate<u32>, Rc<Cell<u32>>) {
        let spawned = Rc::new(Cell::new(0));
        let counter = spawned.clone();
        let auto = AutoUpdate::new(DEBOUNCE, move || {
            counter.set(counter.get() + 1);
            Ok(counter.get())
        });
        (auto, spawned)
    }

    #[test]
    fn toggling_leaves_no_watcher_or_deadline() {
        let (mut auto, _) = counting();
        auto.set_enabled(false).unwrap();
        auto.set_enabled(true).unwrap();
        auto.on_change(Instant::now());
        assert!(auto.is_watching());
        assert!(auto.has_pending());

        auto.set_enabled(false).unwrap();
        assert!(!auto.is_watching());
        assert!(!auto.has_pending());
    }

    #[test]
    fn enabling_twice_keeps_the_same_watcher() {
        let (mut auto, spawned) = counting();
        auto.set_enabled(true).unwrap();
        auto.set_enabled(true).unwrap();

        assert_eq!(spawned.get(), 1);
        assert!(auto.is_watching());
    }

    #[test]
    fn re_enabling_after_disable_creates_a_new_watcher() {
        let (mut auto, spawned) = counting();
        auto.set_enabled(true).unwrap();
        auto.set_enabled(false).unwrap();
        auto.set_enabled(true).unwrap();

        assert_eq!(spawned.get(), 2);
        assert!(auto.is_watching());
    }

    #[test]
    fn burst_of_changes_fires_once_after_the_last() {
        let (mut auto, _) = counting();
        auto.set_enabled(true).unwrap();

        let start = Instant::now();
        auto.on_change(start);
        auto.on_change(start + Duration::from_millis(100));
        auto.on_change(start + Duration::from_millis(200));

        assert_eq!(auto.deadline(), Some(start + Duration::from_millis(500)));
        // Still inside the window of the last change
        assert!(!auto.take_due(start + Duration::from_millis(400)));
        assert!(auto.take_due(start + Duration::from_millis(500)));
        // Consumed
        assert!(!auto.take_due(start + Duration::from_secs(5)));
        assert!(!auto.has_pending());
    }

    #[test]
    fn changes_while_disabled_are_ignored() {
        let (mut auto, _) = counting();
        auto.on_change(Instant::now());
        assert!(!auto.has_pending());
    }

    #[test]
    fn failed_spawn_stays_disabled() {
        let mut auto: AutoUpdate<u32> = AutoUpdate::new(DEBOUNCE, || {
            Err(WatchError::CreateDir {
                path: "/nope".into(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        });

        assert!(auto.set_enabled(true).is_err());
        assert!(!auto.is_watching());
    }

    #[test]
    fn shutdown_clears_everything() {
        let (mut auto, _) = counting();
        auto.set_enabled(true).unwrap();
        auto.on_change(Instant::now());

        auto.shutdown();
        assert!(!auto.is_watching());
        assert!(!auto.has_pending());
    }
}
