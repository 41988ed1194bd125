// SPDX-License-Identifier: GPL-3.0-only

//! Single-shot deadline timers.
//!
//! The widget is single-threaded and event-driven: the shell delivers a
//! periodic tick, and everything time-based (auto-collapse, the press-hold
//! release, chord pacing) is a deadline checked against the tick's `Instant`.
//! Passing `now` explicitly keeps the timers deterministic under test.

use std::time::{Duration, Instant};

/// A timer that fires at most once after being armed.
///
/// The timer holds a deadline rather than spawning anything; the owner calls
/// [`SingleShotTimer::fire`] from its tick handler and reacts when it returns
/// `true`. Arming while already armed is a caller bug: debug builds assert,
/// release builds let the new deadline win.
#[derive(Debug, Clone, Default)]
pub struct SingleShotTimer {
    deadline: Option<Instant>,
}

impl SingleShotTimer {
    /// Creates a stopped timer.
    #[must_use]
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Arms the timer to fire `duration` after `now`.
    pub fn arm(&mut self, now: Instant, duration: Duration) {
        debug_assert!(
            self.deadline.is_none(),
            "SingleShotTimer re-armed while armed"
        );
        self.deadline = Some(now + duration);
    }

    /// Disarms the timer. Safe to call when already stopped.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` while a deadline is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fires the timer if its deadline has passed.
    ///
    /// Returns `true` exactly once per arming: the deadline is cleared on
    /// fire, so subsequent ticks return `false` until the timer is re-armed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that a stopped timer never fires
    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = SingleShotTimer::new();
        assert!(!timer.is_armed());
        assert!(!timer.fire(Instant::now()));
    }

    /// Test that the timer fires exactly once at its deadline
    #[test]
    fn test_fires_once_at_deadline() {
        let start = Instant::now();
        let mut timer = SingleShotTimer::new();
        timer.arm(start, Duration::from_secs(2));

        // Not yet due
        assert!(!timer.fire(start + Duration::from_millis(1999)));
        assert!(timer.is_armed());

        // Due exactly at the deadline
        assert!(timer.fire(start + Duration::from_secs(2)));
        assert!(!timer.is_armed());

        // Never again without re-arming
        assert!(!timer.fire(start + Duration::from_secs(10)));
    }

    /// Test that cancel disarms a pending deadline
    #[test]
    fn test_cancel_disarms() {
        let start = Instant::now();
        let mut timer = SingleShotTimer::new();
        timer.arm(start, Duration::from_secs(5));
        timer.cancel();

        assert!(!timer.is_armed());
        assert!(!timer.fire(start + Duration::from_secs(6)));
    }

    /// Test that cancel is safe on a stopped timer
    #[test]
    fn test_cancel_idempotent() {
        let mut timer = SingleShotTimer::new();
        timer.cancel();
        timer.cancel();
        assert!(!timer.is_armed());
    }

    /// Test that a timer can be re-armed after firing
    #[test]
    fn test_rearm_after_fire() {
        let start = Instant::now();
        let mut timer = SingleShotTimer::new();

        timer.arm(start, Duration::from_millis(100));
        assert!(timer.fire(start + Duration::from_millis(100)));

        timer.arm(start + Duration::from_millis(200), Duration::from_millis(100));
        assert!(!timer.fire(start + Duration::from_millis(250)));
        assert!(timer.fire(start + Duration::from_millis(300)));
    }
}
