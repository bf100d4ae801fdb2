//! Error types used by the repoll session and transports.
//!
//! This module defines:
//!
//! - [`TransportError`] — failures raised by a single request attempt.
//! - [`StopReason`] — why a polling session stopped producing attempts.
//!
//! Per-attempt failures are absorbed by the session: they are counted,
//! reported through callbacks and events, and retried per the backoff
//! policy. They are never propagated to the caller as hard errors. The
//! caller observes the session's end through the [`StopReason`] returned
//! by [`Poller::run`](crate::Poller::run).

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by a single transport attempt.
///
/// These describe why one request/response cycle did not succeed. The
/// session treats every variant the same way: increment the consecutive
/// failure counter and go through the backoff schedule. Mapping specific
/// protocol conditions (status codes, etc.) onto variants is up to the
/// transport implementation.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    /// The request completed with a failure signaled by the endpoint or stack.
    #[error("request failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// The transport gave up waiting for a response.
    #[error("timed out after {timeout:?}")]
    Timeout {
        /// The timeout duration that was exceeded.
        timeout: Duration,
    },

    /// The attempt was cancelled by session shutdown.
    #[error("attempt cancelled")]
    Canceled,
}

impl TransportError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use repoll::TransportError;
    ///
    /// let err = TransportError::Failed { error: "boom".into() };
    /// assert_eq!(err.as_label(), "transport_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TransportError::Failed { .. } => "transport_failed",
            TransportError::Timeout { .. } => "transport_timeout",
            TransportError::Canceled => "transport_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TransportError::Failed { error } => format!("error: {error}"),
            TransportError::Timeout { timeout } => format!("timeout: {timeout:?}"),
            TransportError::Canceled => "attempt cancelled".to_string(),
        }
    }
}

/// # Terminal outcome of a polling session.
///
/// Returned by [`Poller::run`](crate::Poller::run) once the session stops
/// arming timers. Reaching the loop limit is a normal end-of-life, not an
/// error; exceeding the failure ceiling is reported but also not raised as
/// a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Consecutive failures passed the configured ceiling.
    FailureThresholdExceeded,
    /// A bounded session completed its attempt quota.
    LoopLimitReached,
    /// The session's cancellation token was triggered.
    Canceled,
}

impl StopReason {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use repoll::StopReason;
    ///
    /// assert_eq!(StopReason::LoopLimitReached.as_label(), "loop_limit_reached");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            StopReason::FailureThresholdExceeded => "failure_threshold_exceeded",
            StopReason::LoopLimitReached => "loop_limit_reached",
            StopReason::Canceled => "canceled",
        }
    }
}
