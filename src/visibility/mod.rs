//! Visibility gating.
//!
//! This module answers one question for the session: *should the next
//! decision point perform a real attempt, or defer?* The host environment
//! supplies the signal via a [`VisibilityProbe`]; the [`VisibilityGate`]
//! turns it into a scheduling decision.
//!
//! ## Contents
//! - [`VisibilityProbe`] trait for the host's hidden/visible signal
//! - [`ProbeFn`] function-backed probe implementation
//! - [`ProbeRef`] shared probe handle (`Arc<dyn VisibilityProbe>`)
//! - [`VisibilityGate`] suspension decision + re-check delay
//!
//! ## Rules
//! - A missing probe means "never hidden" (the signal may be unavailable).
//! - While suspended, the session arms lightweight re-checks instead of
//!   attempts; counters are untouched, so resuming continues exactly where
//!   the session left off.

mod gate;
mod probe;

pub use gate::VisibilityGate;
pub use probe::{ProbeFn, ProbeRef, VisibilityProbe};
