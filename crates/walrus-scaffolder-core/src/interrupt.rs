//! Interrupt-safe tracking of the target directory being generated
//!
//! The tracker holds the single piece of state shared between the main flow
//! and the signal handler: the path of the directory currently being
//! populated. [`GenerationTracker::begin`] sets it immediately before the
//! first write and the returned guard clears it as soon as generation ends,
//! whether it succeeded or failed. The handler only ever reads and clears it.
//!
//! Every write into the tracked directory happens under a [`WritePermit`];
//! cleanup first stops new permits, then waits for outstanding ones, so
//! nothing can be written back into a directory after it was removed.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard};

/// Result of an interrupt-triggered cleanup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cleanup {
    /// No generation was in progress
    Nothing,
    /// The partially-populated directory was removed
    Removed(PathBuf),
    /// Removal failed; the user has to delete the directory by hand
    Failed { path: PathBuf, error: String },
}

#[derive(Debug)]
struct Slot {
    path: Option<PathBuf>,
    writers: usize,
}

#[derive(Debug)]
pub struct GenerationTracker {
    slot: Mutex<Slot>,
    idle: Condvar,
    cancelled: AtomicBool,
}

impl Default for GenerationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationTracker {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                path: None,
                writers: 0,
            }),
            idle: Condvar::new(),
            cancelled: AtomicBool::new(false),
        }
    }

    /// The process-wide tracker the signal handler consults
    pub fn global() -> &'static GenerationTracker {
        static GLOBAL: GenerationTracker = GenerationTracker::new();
        &GLOBAL
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        // A panic while holding the lock cannot leave the slot half-written
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mark `path` as in progress until the guard is dropped
    ///
    /// Cancellation is sticky: once requested, later generations get no
    /// write permits either.
    pub fn begin(&self, path: &Path) -> TrackingGuard<'_> {
        let mut slot = self.slot();
        slot.path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "generation tracking started");
        TrackingGuard { tracker: self }
    }

    pub fn current(&self) -> Option<PathBuf> {
        self.slot().path.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Permission to write into the tracked directory, held for one write
    ///
    /// `None` once cancellation has started. Cleanup waits for every
    /// outstanding permit before it removes anything, so a write is either
    /// finished before removal or never started.
    pub fn write_permit(&self) -> Option<WritePermit<'_>> {
        let mut slot = self.slot();
        if self.is_cancelled() {
            return None;
        }
        slot.writers += 1;
        Some(WritePermit { tracker: self })
    }

    /// Stop the running generation and remove its target directory
    ///
    /// Blocks until in-flight writes have finished. Must not be called by a
    /// thread that holds a [`WritePermit`].
    pub fn cancel_and_cleanup(&self) -> Cleanup {
        let slot = self.slot();
        self.cancelled.store(true, Ordering::SeqCst);
        let mut slot = self
            .idle
            .wait_while(slot, |slot| slot.writers > 0)
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let Some(path) = slot.path.take() else {
            return Cleanup::Nothing;
        };

        // The lock stays held so no permit can be handed out mid-removal
        match std::fs::remove_dir_all(&path) {
            Ok(()) => Cleanup::Removed(path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Cleanup::Removed(path),
            Err(e) => Cleanup::Failed {
                path,
                error: e.to_string(),
            },
        }
    }
}

/// Clears the in-progress path when generation finishes
#[derive(Debug)]
pub struct TrackingGuard<'a> {
    tracker: &'a GenerationTracker,
}

impl Drop for TrackingGuard<'_> {
    fn drop(&mut self) {
        self.tracker.slot().path = None;
    }
}

/// An outstanding write into the tracked directory
#[derive(Debug)]
pub struct WritePermit<'a> {
    tracker: &'a GenerationTracker,
}

impl Drop for WritePermit<'_> {
    fn drop(&mut self) {
        let mut slot = self.tracker.slot();
        slot.writers -= 1;
        if slot.writers == 0 {
            self.tracker.idle.notify_all();
        }
    }
}

/// Install the Ctrl+C handler: clean up any in-progress generation, let the
/// caller report the outcome, then exit with status 0
pub fn install_handler<F>(report: F) -> Result<(), ctrlc::Error>
where
    F: Fn(&Cleanup) + Send + 'static,
{
    ctrlc::set_handler(move || {
        let cleanup = GenerationTracker::global().cancel_and_cleanup();
        report(&cleanup);
        std::process::exit(0);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_to_clean_when_idle() {
        let tracker = GenerationTracker::new();
        assert_eq!(tracker.cancel_and_cleanup(), Cleanup::Nothing);
        assert!(tracker.is_cancelled());
    }

    #[test]
    fn test_guard_clears_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = GenerationTracker::new();
        {
            let _guard = tracker.begin(dir.path());
            assert_eq!(tracker.current().as_deref(), Some(dir.path()));
        }
        assert_eq!(tracker.current(), None);
        // Once generation finished the directory belongs to the user
        assert_eq!(tracker.cancel_and_cleanup(), Cleanup::Nothing);
        assert!(dir.path().exists());
    }

    #[test]
    fn test_cleanup_removes_in_progress_directory() {
        let parent = tempfile::tempdir().unwrap();
        let target = parent.path().join("half-done");
        std::fs::create_dir_all(target.join("src")).unwrap();
        std::fs::write(target.join("src/main.tsx"), "partial").unwrap();

        let tracker = GenerationTracker::new();
        let _guard = tracker.begin(&target);

        assert_eq!(tracker.cancel_and_cleanup(), Cleanup::Removed(target.clone()));
        assert!(!target.exists());
        assert_eq!(tracker.current(), None);
    }

    #[test]
    fn test_cleanup_of_missing_directory_counts_as_removed() {
        let parent = tempfile::tempdir().unwrap();
        let target = parent.path().join("never-created");
        let tracker = GenerationTracker::new();
        let _guard = tracker.begin(&target);
        assert_eq!(tracker.cancel_and_cleanup(), Cleanup::Removed(target));
    }

    #[test]
    fn test_cancellation_before_begin_blocks_writes() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = GenerationTracker::new();
        assert_eq!(tracker.cancel_and_cleanup(), Cleanup::Nothing);
        let _guard = tracker.begin(dir.path());
        assert!(tracker.is_cancelled());
        assert!(tracker.write_permit().is_none());
    }

    #[test]
    fn test_no_permit_after_cancel() {
        let tracker = GenerationTracker::new();
        assert!(tracker.write_permit().is_some());
        tracker.cancel_and_cleanup();
        assert!(tracker.write_permit().is_none());
    }

    #[test]
    fn test_cleanup_waits_for_in_flight_write() {
        let parent = tempfile::tempdir().unwrap();
        let target = parent.path().join("app");
        std::fs::create_dir_all(&target).unwrap();

        let tracker = GenerationTracker::new();
        let _guard = tracker.begin(&target);
        let permit = tracker.write_permit().unwrap();

        std::thread::scope(|scope| {
            let cleanup = scope.spawn(|| tracker.cancel_and_cleanup());
            std::thread::sleep(std::time::Duration::from_millis(20));
            // The write lands after the signal but before removal
            std::fs::write(target.join("index.html"), "<html>").unwrap();
            drop(permit);
            assert_eq!(cleanup.join().unwrap(), Cleanup::Removed(target.clone()));
        });
        assert!(!target.exists());
    }
}
