//! Transport abstractions.
//!
//! This module provides the injectable request capability:
//! - [`Transport`] - trait for implementing async cancelable transports
//! - [`TransportFn`] - function-backed transport implementation
//! - [`TransportRef`] - shared reference to a transport (`Arc<dyn Transport>`)
//! - [`Request`] - opaque request descriptor passed through on every attempt
//! - [`Payload`] - raw successful response handed to callbacks
//!
//! The session never interprets the request or the payload: what they mean
//! is a contract between the caller and the transport implementation. The
//! session only consumes the two-variant completion result
//! (`Result<Payload, TransportError>`).

mod request;
mod transport;
mod transport_fn;

pub use request::Request;
pub use transport::{Payload, Transport};
pub use transport_fn::{TransportFn, TransportRef};
