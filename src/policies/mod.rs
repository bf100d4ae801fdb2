//! Scheduling policy.
//!
//! This module groups the knobs that control **how long** to wait between
//! polling attempts.
//!
//! ## Contents
//! - [`SchedulePolicy`] delay after success (fixed cadence) and after
//!   failure (jittered exponential backoff)
//!
//! ## Quick wiring
//! ```text
//! PollOptions { delay, .. }
//!      └─► core::poller::Poller uses:
//!           - policy.next_after_success() on the success path
//!           - policy.next_after_failure(failures) on the failure path,
//!             with the post-increment consecutive failure count
//! ```
//!
//! ## Defaults
//! - `fixed = 60s` (one poll per minute after success).
//! - `unit = 500ms` (backoff upper bound doubles per consecutive failure).

mod schedule;

pub use schedule::SchedulePolicy;
