//! # Function-backed transport (`TransportFn`)
//!
//! [`TransportFn`] wraps a closure `F: Fn(Request, CancellationToken) -> Fut`,
//! producing a fresh future per attempt. This avoids shared mutable state in
//! the common case; if attempts need to share state, capture an `Arc<...>`
//! explicitly inside the closure.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use repoll::{Payload, Request, Transport, TransportError, TransportFn, TransportRef};
//!
//! let t: TransportRef = TransportFn::arc("status", |req: Request, _ctx: CancellationToken| async move {
//!     // issue the real request here...
//!     Ok::<_, TransportError>(Payload::new(req.url().to_owned()))
//! });
//!
//! assert_eq!(t.name(), "status");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TransportError;
use crate::transport::transport::{Payload, Transport};
use crate::transport::Request;

/// Shared handle to a transport (`Arc<dyn Transport>`).
pub type TransportRef = Arc<dyn Transport>;

/// Function-backed transport implementation.
///
/// Wraps a closure that *creates* a new future per attempt. The request is
/// cloned per invocation so the future can own it.
pub struct TransportFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> TransportFn<F> {
    /// Creates a new function-backed transport.
    ///
    /// Prefer [`TransportFn::arc`] when you immediately need a
    /// [`TransportRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the transport and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Transport for TransportFn<F>
where
    F: Fn(Request, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Payload, TransportError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(
        &self,
        request: &Request,
        ctx: CancellationToken,
    ) -> Result<Payload, TransportError> {
        (self.f)(request.clone(), ctx).await
    }
}
