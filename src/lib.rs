//! # repoll
//!
//! **repoll** is a lightweight client-side polling library for Rust.
//!
//! It repeatedly issues a request to a remote endpoint on a schedule,
//! adapts its retry timing to failures (jittered exponential backoff), and
//! suspends activity while the consuming application is hidden. The actual
//! request transport and the host's visibility signal are injected
//! capabilities; the crate owns only the polling state machine.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐        ┌──────────────────┐
//!     │   Request    │        │  VisibilityProbe │
//!     │ (descriptor) │        │  (host signal)   │
//!     └──────┬───────┘        └────────┬─────────┘
//!            ▼                         ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Poller (session orchestrator)                            │
//! │  - SchedulePolicy (fixed cadence / jittered backoff)      │
//! │  - VisibilityGate (attempt now vs. 1000 ms re-check)      │
//! │  - PollSession (loop + consecutive-failure counters)      │
//! │  - TimerController (single pending timer, arming          │
//! │    supersedes)                                            │
//! └──────┬──────────────────────────────────────┬─────────────┘
//!        │ invoke(request) per attempt          │ publish(Event)
//!        ▼                                      ▼
//! ┌──────────────┐                     ┌──────────────────────┐
//! │  Transport   │                     │ Bus (broadcast chan) │
//! │ (injected)   │                     └──────────┬───────────┘
//! └──────────────┘                                ▼
//!                                       ┌────────────────────┐
//!                                       │ SubscriberSet      │
//!                                       │ (per-sub queues)   │
//!                                       └──┬──────────┬──────┘
//!                                          ▼          ▼
//!                                      sub1.on    subN.on
//!                                      _event()   _event()
//! ```
//!
//! ### Lifecycle
//! ```text
//! Poller::run(token)
//!
//! Idle ──► Attempting:
//!   ├─► attempt += 1, publish AttemptStarting
//!   ├─► transport.invoke(request)
//!   │       ├─ Ok  ──► on_success callback, failures = 0
//!   │       │          ├─ loop quota reached  ─► Terminated(LoopLimitReached)
//!   │       │          └─ else schedule fixed delay
//!   │       └─ Err ──► on_failure callback, failures += 1
//!   │                  ├─ failures > ceiling  ─► Terminated(FailureThresholdExceeded)
//!   │                  └─ else schedule round(random × 500ms × 2^failures)
//!   └─► Scheduled: timer fires ─► visibility gate
//!         ├─ hidden  ─► Suspended: 1000 ms re-checks (uncounted) until visible
//!         └─ visible ─► next attempt
//!
//! Exit conditions:
//!   - failure ceiling exceeded ─► StopReason::FailureThresholdExceeded
//!   - bounded loop quota done  ─► StopReason::LoopLimitReached
//!   - token cancelled          ─► StopReason::Canceled
//! ```
//!
//! ## Features
//! | Area              | Description                                                      | Key types / traits                  |
//! |-------------------|------------------------------------------------------------------|-------------------------------------|
//! | **Transports**    | Inject the request capability as a trait or a closure.           | [`Transport`], [`TransportFn`]      |
//! | **Scheduling**    | Fixed cadence after success, jittered backoff after failure.     | [`SchedulePolicy`]                  |
//! | **Visibility**    | Suspend polling while the host is hidden; resume promptly.       | [`VisibilityProbe`], [`ProbeFn`]    |
//! | **Observability** | Hook into session events (logging, metrics, custom subscribers). | [`Subscribe`], [`Bus`], [`Event`]   |
//! | **Errors**        | Typed attempt errors and an explicit terminal outcome.           | [`TransportError`], [`StopReason`]  |
//! | **Configuration** | Per-session knobs with zero-means-default normalization.         | [`PollOptions`]                     |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use repoll::{Payload, PollOptions, Poller, Request, StopReason, TransportError, TransportFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     // The transport is whatever issues the real request.
//!     let transport = TransportFn::arc("status", |req: Request, _ctx: CancellationToken| async move {
//!         Ok::<_, TransportError>(Payload::new(req.url().to_owned()))
//!     });
//!
//!     let options = PollOptions::default()
//!         .with_delay(Duration::from_millis(10))
//!         .with_max_loops(3)
//!         .on_success(|payload| println!("got: {}", payload.body()));
//!
//!     let poller = Poller::new(
//!         transport,
//!         Request::new("https://example.com/api/status.json"),
//!         options,
//!     );
//!     let reason = poller.run(CancellationToken::new()).await;
//!     assert_eq!(reason, StopReason::LoopLimitReached);
//! }
//! ```

mod core;
mod error;
mod events;
mod policies;
mod subscribers;
mod transport;
mod visibility;

// ---- Public re-exports ----

pub use crate::core::{
    FailureCallback, PollOptions, PollState, Poller, SuccessCallback, TimerController,
};
pub use error::{StopReason, TransportError};
pub use events::{Bus, Event, EventKind, ScheduleSource};
pub use policies::SchedulePolicy;
pub use subscribers::{Subscribe, SubscriberSet};
pub use transport::{Payload, Request, Transport, TransportFn, TransportRef};
pub use visibility::{ProbeFn, ProbeRef, VisibilityGate, VisibilityProbe};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
