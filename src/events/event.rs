//! # Events emitted by a polling session.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Attempt events**: request lifecycle (starting, succeeded, failed)
//! - **Scheduling events**: timer decisions (next poll, suspension, resume)
//! - **Terminal events**: session end
//!
//! The [`Event`] struct carries additional metadata such as timestamps,
//! session name, attempt/failure counters, delays and reasons.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use repoll::{Event, EventKind, ScheduleSource};
//!
//! let ev = Event::now(EventKind::PollScheduled)
//!     .with_session("status-poll")
//!     .with_delay(Duration::from_secs(60))
//!     .with_source(ScheduleSource::Success);
//!
//! assert_eq!(ev.kind, EventKind::PollScheduled);
//! assert_eq!(ev.session.as_deref(), Some("status-poll"));
//! assert_eq!(ev.delay_ms, Some(60_000));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of session events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Attempt lifecycle events ===
    /// An attempt is about to be issued to the transport.
    ///
    /// Sets:
    /// - `session`: session name
    /// - `attempt`: attempt number (1-based)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    AttemptStarting,

    /// An attempt completed successfully.
    ///
    /// Sets:
    /// - `session`: session name
    /// - `attempt`: attempt number
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    AttemptSucceeded,

    /// An attempt completed with a transport failure.
    ///
    /// Sets:
    /// - `session`: session name
    /// - `attempt`: attempt number
    /// - `failures`: consecutive failure count after this attempt
    /// - `reason`: failure message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    AttemptFailed,

    // === Scheduling events ===
    /// The next poll timer was armed.
    ///
    /// Sets:
    /// - `session`: session name
    /// - `delay_ms`: delay before the next decision point (ms)
    /// - `source`: `Success`, `Failure`, or `Recheck`
    /// - `failures`: consecutive failure count (failure-driven backoff only)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    PollScheduled,

    /// The host reported itself hidden; a re-check timer replaces the
    /// real attempt. Counters are untouched.
    ///
    /// Sets:
    /// - `session`: session name
    /// - `delay_ms`: re-check delay (ms)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    PollerSuspended,

    /// Visibility returned; the next decision point performs a real attempt.
    ///
    /// Sets:
    /// - `session`: session name
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    PollerResumed,

    // === Terminal events ===
    /// The session stopped; no further timers will be armed.
    ///
    /// Sets:
    /// - `session`: session name
    /// - `reason`: stop reason label
    /// - `attempt`: last attempt number
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    PollerTerminated,
}

/// What triggered a scheduling decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSource {
    /// Fixed cadence after a successful attempt.
    Success,
    /// Jittered exponential backoff after a failed attempt.
    Failure,
    /// Lightweight visibility re-check while the host is hidden.
    Recheck,
}

/// Session event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,

    /// Event classification.
    pub kind: EventKind,
    /// Name of the session, if applicable.
    pub session: Option<Arc<str>>,
    /// Attempt count (starting from 1).
    pub attempt: Option<u32>,
    /// Consecutive failure count after the attempt.
    pub failures: Option<u32>,
    /// Delay before the next decision point in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable reason (failure messages, stop labels).
    pub reason: Option<Arc<str>>,
    /// Source of a scheduling decision.
    pub source: Option<ScheduleSource>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and
    /// next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            session: None,
            attempt: None,
            failures: None,
            delay_ms: None,
            reason: None,
            source: None,
        }
    }

    /// Attaches a session name.
    #[inline]
    pub fn with_session(mut self, session: impl Into<Arc<str>>) -> Self {
        self.session = Some(session.into());
        self
    }

    /// Attaches an attempt count.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a consecutive failure count.
    #[inline]
    pub fn with_failures(mut self, n: u32) -> Self {
        self.failures = Some(n);
        self
    }

    /// Attaches a delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the source of a scheduling decision.
    #[inline]
    pub fn with_source(mut self, source: ScheduleSource) -> Self {
        self.source = Some(source);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_is_monotonic() {
        let a = Event::now(EventKind::AttemptStarting);
        let b = Event::now(EventKind::AttemptStarting);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn delay_is_stored_as_millis() {
        let ev = Event::now(EventKind::PollScheduled).with_delay(Duration::from_secs(2));
        assert_eq!(ev.delay_ms, Some(2000));
    }

    #[test]
    fn oversized_delay_saturates() {
        let ev = Event::now(EventKind::PollScheduled)
            .with_delay(Duration::from_millis(u64::from(u32::MAX) + 1));
        assert_eq!(ev.delay_ms, Some(u32::MAX));
    }
}
