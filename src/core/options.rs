//! # Caller configuration for a polling session.
//!
//! Provides [`PollOptions`] — the per-session knobs plus optional completion
//! callbacks.
//!
//! ## Sentinel values
//! Zero-valued knobs normalize to their defaults, matching the "absent or
//! zero means default" convention callers expect from config objects:
//! - `delay = 0` → 60 s
//! - `max_failures = 0` → 10
//! - `max_loops = Some(0)` → `None` (unbounded)
//!
//! Normalization happens once, when the options are handed to
//! [`Poller::new`](crate::Poller::new).

use std::sync::Arc;
use std::time::Duration;

use crate::error::TransportError;
use crate::transport::Payload;

/// Default interval between successful attempts.
pub(crate) const DEFAULT_DELAY: Duration = Duration::from_secs(60);

/// Default consecutive-failure ceiling.
pub(crate) const DEFAULT_MAX_FAILURES: u32 = 10;

/// Default event bus capacity.
pub(crate) const DEFAULT_BUS_CAPACITY: usize = 256;

/// Callback invoked with the raw payload of every successful attempt.
pub type SuccessCallback = Arc<dyn Fn(&Payload) + Send + Sync>;

/// Callback invoked with the error of every failed attempt.
pub type FailureCallback = Arc<dyn Fn(&TransportError) + Send + Sync>;

/// Per-session configuration.
///
/// Callbacks fire for **every** completed attempt, independent of the
/// scheduling decision that follows; they observe outcomes, they do not
/// steer the session.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use repoll::PollOptions;
///
/// let opts = PollOptions::default()
///     .with_delay(Duration::from_secs(5))
///     .with_max_loops(15)
///     .on_success(|payload| println!("got: {}", payload.body()));
/// ```
#[derive(Clone, Default)]
pub struct PollOptions {
    /// Interval after a successful attempt. `Duration::ZERO` → default.
    pub delay: Duration,
    /// Total attempts before stopping; `None` = unbounded.
    pub max_loops: Option<u32>,
    /// Consecutive-failure ceiling before hard stop. `0` → default.
    pub max_failures: u32,
    /// Event bus ring buffer capacity. `0` → default.
    pub bus_capacity: usize,
    /// Invoked on every successful completion.
    pub on_success: Option<SuccessCallback>,
    /// Invoked on every failed completion.
    pub on_failure: Option<FailureCallback>,
}

impl PollOptions {
    /// Sets the interval between successful attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Bounds the session to `max_loops` total attempts.
    pub fn with_max_loops(mut self, max_loops: u32) -> Self {
        self.max_loops = Some(max_loops);
        self
    }

    /// Sets the consecutive-failure ceiling.
    pub fn with_max_failures(mut self, max_failures: u32) -> Self {
        self.max_failures = max_failures;
        self
    }

    /// Sets the event bus capacity.
    pub fn with_bus_capacity(mut self, capacity: usize) -> Self {
        self.bus_capacity = capacity;
        self
    }

    /// Registers the success callback.
    pub fn on_success(mut self, f: impl Fn(&Payload) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(f));
        self
    }

    /// Registers the failure callback.
    pub fn on_failure(mut self, f: impl Fn(&TransportError) + Send + Sync + 'static) -> Self {
        self.on_failure = Some(Arc::new(f));
        self
    }

    /// Applies the sentinel rules, returning ready-to-use options.
    pub(crate) fn normalized(mut self) -> Self {
        if self.delay == Duration::ZERO {
            self.delay = DEFAULT_DELAY;
        }
        if self.max_failures == 0 {
            self.max_failures = DEFAULT_MAX_FAILURES;
        }
        if self.max_loops == Some(0) {
            self.max_loops = None;
        }
        if self.bus_capacity == 0 {
            self.bus_capacity = DEFAULT_BUS_CAPACITY;
        }
        self
    }
}
