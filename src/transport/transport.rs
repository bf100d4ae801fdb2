//! # Transport abstraction.
//!
//! This module defines the [`Transport`] trait (async, cancelable) and the
//! [`Payload`] type carrying a successful response.
//!
//! A transport receives the session's [`Request`] and a
//! [`CancellationToken`] and completes with exactly one of two outcomes:
//! `Ok(Payload)` or `Err(TransportError)`. The session consumes that result
//! to drive its state machine; it never retries inside an attempt and never
//! interprets the payload.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TransportError;
use crate::transport::Request;

/// Raw successful response of one attempt.
///
/// Opaque to the session; handed as-is to the `on_success` callback. What
/// the body contains is a contract between caller and transport.
#[derive(Clone, Debug)]
pub struct Payload {
    body: Arc<str>,
}

impl Payload {
    /// Creates a payload from a response body.
    pub fn new(body: impl Into<Arc<str>>) -> Self {
        Self { body: body.into() }
    }

    /// Creates an empty payload (transports with nothing to report).
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Returns the raw body.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// # Asynchronous, cancelable request capability.
///
/// One call to [`invoke`](Transport::invoke) performs one attempt and
/// resolves at most once. Implementations should observe the token and
/// bail out promptly with [`TransportError::Canceled`] during shutdown;
/// attempt-level timeouts are the transport's own responsibility.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use repoll::{Payload, Request, Transport, TransportError};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Transport for Echo {
///     fn name(&self) -> &str { "echo" }
///
///     async fn invoke(
///         &self,
///         request: &Request,
///         ctx: CancellationToken,
///     ) -> Result<Payload, TransportError> {
///         if ctx.is_cancelled() {
///             return Err(TransportError::Canceled);
///         }
///         Ok(Payload::new(request.url().to_owned()))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Returns a stable, human-readable transport name (used in events).
    fn name(&self) -> &str;

    /// Performs one request attempt.
    ///
    /// Completes with the raw payload on success or a [`TransportError`]
    /// on failure. Must resolve at most once per invocation.
    async fn invoke(
        &self,
        request: &Request,
        ctx: CancellationToken,
    ) -> Result<Payload, TransportError>;
}
