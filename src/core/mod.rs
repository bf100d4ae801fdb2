//! Session core: orchestration and lifecycle.
//!
//! This module contains the polling state machine. The public API from this
//! module is [`Poller`] (the orchestrator), [`PollOptions`] (caller
//! configuration), [`PollState`] (the named states) and [`TimerController`]
//! (single-pending-timer ownership).
//!
//! Internal modules:
//! - [`options`]: caller configuration with default/sentinel normalization;
//! - [`session`]: per-run counters and the scheduling decision step;
//! - [`timer`]: owns the one pending timer, arming supersedes;
//! - [`poller`]: the explicit state machine run loop.

mod options;
mod poller;
mod session;
mod timer;

pub use options::{FailureCallback, PollOptions, SuccessCallback};
pub use poller::{PollState, Poller};
pub use timer::TimerController;
