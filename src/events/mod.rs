//! Session events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by a polling session (attempt
//! lifecycle, scheduling decisions, suspension, termination).
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`ScheduleSource`] what triggered a scheduling decision
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publisher**: `Poller` (attempts, scheduling, suspension, termination).
//! - **Consumers**: the poller's subscriber listener (fans out to
//!   `SubscriberSet`) and any receiver obtained via [`Bus::subscribe`]
//!   (tests typically subscribe directly).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind, ScheduleSource};
