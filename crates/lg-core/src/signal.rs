//! One-way shutdown signal with progress notification.
//!
//! `Shutdown` carries two kinds of wake-up on a single mutex:
//!
//! - **stop** - set once by the completion monitor; every actor observes it at
//!   the top of its loop, and interruptible sleeps return early.
//! - **progress** - a generation counter bumped whenever a package reaches its
//!   destination, so the monitor re-counts on change instead of spinning.
//!
//! Both flags are flipped while holding the mutex, so a waiter that checked
//! the condition under the lock cannot miss the notification.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Default)]
pub struct Shutdown {
    stopped:     AtomicBool,
    generation:  Mutex<u64>,
    stop_cv:     Condvar,
    progress_cv: Condvar,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once [`trigger`](Self::trigger) has been called.
    #[inline]
    pub fn is_triggered(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Raise the signal.  Returns `true` only for the call that flipped it;
    /// later calls are no-ops.
    pub fn trigger(&self) -> bool {
        let _guard = self.generation.lock();
        let first = !self.stopped.swap(true, Ordering::AcqRel);
        if first {
            self.stop_cv.notify_all();
            self.progress_cv.notify_all();
        }
        first
    }

    /// Current progress generation.  Read it *before* inspecting the state
    /// you are waiting on, then pass it to [`wait_progress`](Self::wait_progress).
    #[inline]
    pub fn generation(&self) -> u64 {
        *self.generation.lock()
    }

    /// Record that observable progress happened and wake the monitor.
    pub fn notify_progress(&self) {
        let mut generation = self.generation.lock();
        *generation = generation.wrapping_add(1);
        self.progress_cv.notify_all();
    }

    /// Block until the generation moves past `seen`, the signal is raised, or
    /// `timeout` elapses.  Returns the generation observed on wake-up.
    pub fn wait_progress(&self, seen: u64, timeout: Duration) -> u64 {
        let deadline = Instant::now() + timeout;
        let mut generation = self.generation.lock();
        while *generation == seen && !self.is_triggered() {
            if self.progress_cv.wait_until(&mut generation, deadline).timed_out() {
                break;
            }
        }
        *generation
    }

    /// Sleep for `duration` unless the signal is raised first.
    ///
    /// Returns `true` if the full duration elapsed, `false` if interrupted.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        let mut generation = self.generation.lock();
        while !self.is_triggered() {
            if self.stop_cv.wait_until(&mut generation, deadline).timed_out() {
                break;
            }
        }
        !self.is_triggered()
    }
}
