//! # Per-run session state and the scheduling decision step.
//!
//! [`PollSession`] holds the counters of one polling run. [`decide`] is the
//! pure transition step: given the outcome of an attempt it updates the
//! counters and answers *schedule next or stop* — without touching timers,
//! so the state machine's decisions are assertable in plain unit tests.
//!
//! ## Counter rules
//! - `failures` is reset to 0 exactly when an attempt succeeds, and only
//!   then; each failed attempt increments it.
//! - `loops` advances **only** when a loop bound is configured, and only on
//!   the success path. A bounded session that keeps failing is stopped by
//!   the failure ceiling, never by the loop ceiling.
//! - `attempts` is a monotonic lifetime counter used for event numbering.

use std::time::Duration;

use crate::core::options::PollOptions;
use crate::error::StopReason;
use crate::events::ScheduleSource;
use crate::policies::SchedulePolicy;

/// Live counters of one polling run.
///
/// Owned by the run loop; never shared across sessions.
#[derive(Debug, Default)]
pub(crate) struct PollSession {
    attempts: u32,
    loops: u32,
    failures: u32,
}

impl PollSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Advances the lifetime attempt counter and returns the 1-based number
    /// of the attempt about to be issued.
    pub(crate) fn begin_attempt(&mut self) -> u32 {
        self.attempts = self.attempts.saturating_add(1);
        self.attempts
    }

    /// Total attempts issued so far.
    pub(crate) fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Consecutive failures since the last success (or since start).
    pub(crate) fn failures(&self) -> u32 {
        self.failures
    }

    /// Loop slots consumed (bounded sessions only).
    #[cfg(test)]
    pub(crate) fn loops(&self) -> u32 {
        self.loops
    }

    fn record_success(&mut self) {
        self.failures = 0;
    }

    /// Increments and returns the post-increment consecutive failure count.
    fn record_failure(&mut self) -> u32 {
        self.failures = self.failures.saturating_add(1);
        self.failures
    }

    /// Consumes one loop slot when bounded; returns `true` when the quota
    /// is now exhausted.
    fn consume_loop(&mut self, max_loops: Option<u32>) -> bool {
        match max_loops {
            Some(max) => {
                self.loops = self.loops.saturating_add(1);
                self.loops >= max
            }
            None => false,
        }
    }
}

/// What the session does after a completed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    /// Arm the timer for the next decision point.
    Next {
        delay: Duration,
        source: ScheduleSource,
    },
    /// Stop; no further timer is armed.
    Stop(StopReason),
}

/// Applies one attempt outcome to the session and picks the next move.
///
/// Success path: reset failures, consume a loop slot (bounded sessions
/// terminate here once the quota is reached), otherwise schedule the fixed
/// cadence. Failure path: increment failures, terminate once the count
/// exceeds the ceiling, otherwise schedule jittered backoff using the
/// post-increment count as the exponent.
pub(crate) fn decide(
    session: &mut PollSession,
    options: &PollOptions,
    policy: &SchedulePolicy,
    succeeded: bool,
) -> Decision {
    if succeeded {
        session.record_success();
        if session.consume_loop(options.max_loops) {
            return Decision::Stop(StopReason::LoopLimitReached);
        }
        Decision::Next {
            delay: policy.next_after_success(),
            source: ScheduleSource::Success,
        }
    } else {
        let failures = session.record_failure();
        if failures > options.max_failures {
            return Decision::Stop(StopReason::FailureThresholdExceeded);
        }
        Decision::Next {
            delay: policy.next_after_failure(failures),
            source: ScheduleSource::Failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> PollOptions {
        PollOptions::default().normalized()
    }

    fn policy() -> SchedulePolicy {
        SchedulePolicy::with_fixed(Duration::from_secs(1))
    }

    #[test]
    fn successes_keep_failures_at_zero() {
        let mut s = PollSession::new();
        for _ in 0..20 {
            let d = decide(&mut s, &opts(), &policy(), true);
            assert_eq!(s.failures(), 0);
            assert_eq!(
                d,
                Decision::Next {
                    delay: Duration::from_secs(1),
                    source: ScheduleSource::Success,
                }
            );
        }
    }

    #[test]
    fn failures_count_since_last_success() {
        let mut s = PollSession::new();
        let o = opts();
        let p = policy();

        decide(&mut s, &o, &p, false);
        decide(&mut s, &o, &p, false);
        assert_eq!(s.failures(), 2);

        decide(&mut s, &o, &p, true);
        assert_eq!(s.failures(), 0);

        decide(&mut s, &o, &p, false);
        assert_eq!(s.failures(), 1);
    }

    #[test]
    fn exceeding_failure_ceiling_stops() {
        let mut s = PollSession::new();
        let o = PollOptions::default().with_max_failures(2).normalized();
        let p = policy();

        assert!(matches!(decide(&mut s, &o, &p, false), Decision::Next { .. }));
        assert!(matches!(decide(&mut s, &o, &p, false), Decision::Next { .. }));
        // Third consecutive failure: 3 > 2.
        assert_eq!(
            decide(&mut s, &o, &p, false),
            Decision::Stop(StopReason::FailureThresholdExceeded)
        );
    }

    #[test]
    fn bounded_session_stops_at_loop_quota() {
        let mut s = PollSession::new();
        let o = PollOptions::default().with_max_loops(3).normalized();
        let p = policy();

        assert!(matches!(decide(&mut s, &o, &p, true), Decision::Next { .. }));
        assert!(matches!(decide(&mut s, &o, &p, true), Decision::Next { .. }));
        assert_eq!(
            decide(&mut s, &o, &p, true),
            Decision::Stop(StopReason::LoopLimitReached)
        );
        assert_eq!(s.loops(), 3);
    }

    #[test]
    fn unbounded_session_never_consumes_loops() {
        let mut s = PollSession::new();
        let o = opts();
        let p = policy();
        for _ in 0..100 {
            assert!(matches!(decide(&mut s, &o, &p, true), Decision::Next { .. }));
        }
        assert_eq!(s.loops(), 0);
    }

    // Deliberate quirk carried over from the observed behavior: failures do
    // not consume loop slots, so a bounded session that only fails is
    // stopped by the failure ceiling, not the loop ceiling.
    #[test]
    fn failing_bounded_session_is_stopped_by_failure_ceiling() {
        let mut s = PollSession::new();
        let o = PollOptions::default()
            .with_max_loops(1)
            .with_max_failures(3)
            .normalized();
        let p = policy();

        for _ in 0..3 {
            assert!(matches!(decide(&mut s, &o, &p, false), Decision::Next { .. }));
        }
        assert_eq!(s.loops(), 0, "failures must not consume loop slots");
        assert_eq!(
            decide(&mut s, &o, &p, false),
            Decision::Stop(StopReason::FailureThresholdExceeded)
        );
    }

    #[test]
    fn failure_delay_uses_post_increment_exponent() {
        let mut s = PollSession::new();
        let o = opts();
        let p = SchedulePolicy::default();

        for expected in 1..=5u32 {
            match decide(&mut s, &o, &p, false) {
                Decision::Next { delay, source } => {
                    assert_eq!(source, ScheduleSource::Failure);
                    assert_eq!(s.failures(), expected);
                    let bound = Duration::from_millis(500u64 << expected);
                    assert!(delay <= bound, "{delay:?} > {bound:?} at k={expected}");
                }
                other => panic!("unexpected decision: {other:?}"),
            }
        }
    }

    #[test]
    fn attempt_counter_is_monotonic() {
        let mut s = PollSession::new();
        assert_eq!(s.begin_attempt(), 1);
        assert_eq!(s.begin_attempt(), 2);
        assert_eq!(s.attempts(), 2);
    }
}
