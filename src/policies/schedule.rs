//! # Schedule policy for polling sessions.
//!
//! [`SchedulePolicy`] decides the delay before the next attempt, given the
//! outcome of the previous one:
//! - **success** → [`SchedulePolicy::fixed`], unchanged every time (fixed
//!   cadence);
//! - **failure** → `round(random × unit × 2^failures)`, with `random`
//!   uniform in [0, 1).
//!
//! The failure path is randomized exponential backoff: the upper bound
//! doubles per consecutive failure while uniform jitter over
//! `[0, upper_bound]` desynchronizes concurrent sessions retrying against
//! the same struggling endpoint.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use repoll::SchedulePolicy;
//!
//! let policy = SchedulePolicy {
//!     fixed: Duration::from_secs(5),
//!     unit: Duration::from_millis(500),
//! };
//!
//! assert_eq!(policy.next_after_success(), Duration::from_secs(5));
//!
//! // First failure: anywhere in [0, 1s]; third failure: [0, 4s].
//! assert!(policy.next_after_failure(1) <= Duration::from_secs(1));
//! assert!(policy.next_after_failure(3) <= Duration::from_secs(4));
//! ```

use std::time::Duration;

use rand::Rng;

/// Exponents past this would saturate any practical delay anyway.
const MAX_BACKOFF_EXPONENT: u32 = 32;

/// Delay policy for polling sessions.
///
/// Encapsulates the two scheduling decisions:
/// - [`SchedulePolicy::fixed`] — cadence between successful attempts;
/// - [`SchedulePolicy::unit`] — base unit of the failure backoff bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulePolicy {
    /// Delay between successful attempts.
    pub fixed: Duration,
    /// Base unit of the backoff upper bound (`unit × 2^failures`).
    pub unit: Duration,
}

impl Default for SchedulePolicy {
    /// Returns a policy with:
    /// - `fixed = 60s`;
    /// - `unit = 500ms`.
    fn default() -> Self {
        Self {
            fixed: Duration::from_secs(60),
            unit: Duration::from_millis(500),
        }
    }
}

impl SchedulePolicy {
    /// Creates a policy with the given success cadence and the default
    /// backoff unit.
    pub fn with_fixed(fixed: Duration) -> Self {
        Self {
            fixed,
            ..Self::default()
        }
    }

    /// Returns the delay before the next attempt after a success.
    #[inline]
    pub fn next_after_success(&self) -> Duration {
        self.fixed
    }

    /// Returns the jittered backoff delay after a failure.
    ///
    /// `failures` is the **post-increment** consecutive failure count, so
    /// it is at least 1 when called from the session's failure path. The
    /// result is uniform in `[0, unit × 2^failures]`; the bound saturates
    /// instead of overflowing for large counts.
    pub fn next_after_failure(&self, failures: u32) -> Duration {
        let upper_ms = self.failure_bound_ms(failures);

        let mut rng = rand::rng();
        let jittered = (rng.random::<f64>() * upper_ms as f64).round() as u64;
        Duration::from_millis(jittered.min(upper_ms))
    }

    /// Upper bound of the failure backoff in milliseconds, saturating at
    /// `u64::MAX` for large units or counts.
    fn failure_bound_ms(&self, failures: u32) -> u64 {
        let exp = failures.min(MAX_BACKOFF_EXPONENT);
        let unit_ms = self.unit.as_millis().min(u128::from(u64::MAX)) as u64;
        unit_ms.checked_mul(1u64 << exp).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_delay_is_fixed() {
        let policy = SchedulePolicy::with_fixed(Duration::from_millis(1234));
        for _ in 0..10 {
            assert_eq!(policy.next_after_success(), Duration::from_millis(1234));
        }
    }

    #[test]
    fn failure_delay_never_exceeds_bound() {
        let policy = SchedulePolicy::default();
        for failures in 1..=10u32 {
            let bound = Duration::from_millis(500u64 << failures);
            for _ in 0..100 {
                let d = policy.next_after_failure(failures);
                assert!(
                    d <= bound,
                    "failures={failures}: {d:?} exceeds bound {bound:?}"
                );
            }
        }
    }

    #[test]
    fn failure_delay_jitters() {
        // With a 256s upper bound, 50 draws landing on the same value
        // would mean the jitter is broken.
        let policy = SchedulePolicy::default();
        let first = policy.next_after_failure(9);
        let varied = (0..50).any(|_| policy.next_after_failure(9) != first);
        assert!(varied, "expected varying jittered delays");
    }

    #[test]
    fn huge_failure_count_saturates() {
        let policy = SchedulePolicy::default();
        // Must not panic or overflow; result still a valid duration.
        let _ = policy.next_after_failure(u32::MAX);
    }

    #[test]
    fn oversized_unit_saturates_instead_of_wrapping() {
        // A unit above 2^32 ms shifted by the max exponent exceeds u64;
        // the bound must pin to u64::MAX, not wrap toward zero.
        let policy = SchedulePolicy {
            fixed: Duration::from_secs(60),
            unit: Duration::from_millis(1u64 << 33),
        };
        assert_eq!(policy.failure_bound_ms(MAX_BACKOFF_EXPONENT), u64::MAX);
        assert_eq!(policy.failure_bound_ms(u32::MAX), u64::MAX);
        // Small counts stay exact.
        assert_eq!(policy.failure_bound_ms(1), (1u64 << 33) * 2);
    }
}
