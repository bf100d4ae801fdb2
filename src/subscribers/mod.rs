//! Event subscribers for polling sessions.
//!
//! This module provides the [`Subscribe`] trait and the [`SubscriberSet`]
//! fan-out used to deliver session events to user-defined handlers
//! (logging, metrics, alerting).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Poller ── publish(Event) ──► Bus ──► listener ──► SubscriberSet::emit
//!                                                  ┌─────────┼─────────┐
//!                                                  ▼         ▼         ▼
//!                                             [queue S1] [queue S2] [queue SN]
//!                                                  │         │         │
//!                                             worker S1  worker S2  worker SN
//!                                                  │         │         │
//!                                          sub.on_event(&Event) (per subscriber)
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** - observe and react to events (logging,
//!   metrics, alerts).
//! - Tests usually skip this layer and subscribe to the
//!   [`Bus`](crate::events::Bus) directly.

mod set;
mod subscriber;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscriber::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
