//! # Visibility gate: suspension decision for the session.
//!
//! [`VisibilityGate`] wraps an optional [`ProbeRef`] and the fixed re-check
//! delay armed while the host is hidden. Keeping a short re-check (rather
//! than stopping outright) guarantees the session resumes promptly once
//! visibility returns, without losing accumulated counters.

use std::time::Duration;

use super::probe::ProbeRef;

/// Default delay between visibility re-checks while suspended.
const RECHECK_DELAY: Duration = Duration::from_millis(1000);

/// Decides whether a decision point fires a real attempt or defers.
///
/// ### Rules
/// - No probe configured → never suspended (absence of the signal defaults
///   to "not hidden").
/// - Suspended → the session arms [`VisibilityGate::recheck_delay`] and
///   re-evaluates; re-checks never count as loops or failures.
#[derive(Clone)]
pub struct VisibilityGate {
    probe: Option<ProbeRef>,
    recheck: Duration,
}

impl Default for VisibilityGate {
    /// Returns a gate with no probe (never suspended) and a 1000 ms
    /// re-check delay.
    fn default() -> Self {
        Self {
            probe: None,
            recheck: RECHECK_DELAY,
        }
    }
}

impl VisibilityGate {
    /// Creates a gate backed by the given probe.
    pub fn new(probe: ProbeRef) -> Self {
        Self {
            probe: Some(probe),
            ..Self::default()
        }
    }

    /// Returns `true` when the next action should be a re-check instead of
    /// a real attempt.
    pub fn is_suspended(&self) -> bool {
        self.probe.as_ref().is_some_and(|p| p.is_hidden())
    }

    /// Returns the delay to arm while suspended.
    pub fn recheck_delay(&self) -> Duration {
        self.recheck
    }
}
