//! # TimerController: single-pending-timer ownership.
//!
//! The session owns exactly one pending timer at any instant. Arming a new
//! delay **supersedes** the previous one (the old sleep is dropped, which
//! cancels it); there is no code path that leaves two timers outstanding.
//! Violating this invariant is how duplicate concurrent polling loops are
//! born, so the controller is the only place timers are created.
//!
//! ## Contract
//! - [`TimerController::arm`] — cancel any pending timer, schedule a new one.
//! - [`TimerController::cancel_pending`] — clear the pending timer; no-op
//!   when nothing is armed.
//! - [`TimerController::fired`] — wait for the armed timer and clear it.

use std::pin::Pin;
use std::time::Duration;

use tokio::time::{self, Instant, Sleep};

/// Owns the session's one pending timer.
///
/// A stale, already-superseded timer is simply replaced — never
/// double-fired — because only one sleep is tracked at a time.
#[derive(Debug, Default)]
pub struct TimerController {
    pending: Option<Pin<Box<Sleep>>>,
}

impl TimerController {
    /// Creates a controller with nothing armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any pending timer and arms a new one for `delay`.
    pub fn arm(&mut self, delay: Duration) {
        self.pending = Some(Box::pin(time::sleep(delay)));
    }

    /// Cancels the pending timer, if any.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Returns `true` while a timer is pending.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the pending timer's deadline, if armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|s| s.deadline())
    }

    /// Waits for the pending timer to elapse, then clears it.
    ///
    /// Resolves immediately when nothing is armed: an unarmed controller is
    /// treated as already elapsed. The run loop always arms before waiting.
    pub async fn fired(&mut self) {
        if let Some(sleep) = self.pending.as_mut() {
            sleep.as_mut().await;
        }
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_the_armed_delay() {
        let mut timer = TimerController::new();
        let start = Instant::now();

        timer.arm(Duration::from_secs(3));
        timer.fired().await;

        assert_eq!(start.elapsed(), Duration::from_secs(3));
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn arming_supersedes_the_pending_timer() {
        let mut timer = TimerController::new();
        let start = Instant::now();

        timer.arm(Duration::from_secs(60));
        timer.arm(Duration::from_secs(1));
        timer.fired().await;

        // The 60s timer is gone; only the 1s one fires.
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn at_most_one_deadline_is_tracked() {
        let mut timer = TimerController::new();
        timer.arm(Duration::from_secs(10));
        let first = timer.deadline();

        timer.arm(Duration::from_secs(20));
        let second = timer.deadline();

        assert!(first.is_some() && second.is_some());
        assert_ne!(first, second, "re-arming must replace the deadline");
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_clears_the_pending_timer() {
        let mut timer = TimerController::new();
        timer.arm(Duration::from_secs(5));
        timer.cancel_pending();
        assert!(!timer.is_armed());

        // Unarmed controller resolves immediately.
        let start = Instant::now();
        timer.fired().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_a_noop_when_nothing_is_armed() {
        let mut timer = TimerController::new();
        timer.cancel_pending();
        assert!(!timer.is_armed());
    }
}
