//! # Visibility probe: the host's hidden/visible signal.
//!
//! This module defines the [`VisibilityProbe`] trait and a convenient
//! function-backed implementation [`ProbeFn`]. The common handle type is
//! [`ProbeRef`], an `Arc<dyn VisibilityProbe>` suitable for sharing with
//! the session.
//!
//! A probe must be **side-effect free** and cheap: the session calls it at
//! every decision point, including once per second while suspended.

use std::sync::Arc;

/// # Host visibility signal.
///
/// Reports whether the consuming application is currently hidden or
/// backgrounded in its host environment. The session consults the probe
/// each time a timer fires to decide between a real attempt and a
/// lightweight re-check.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use repoll::VisibilityProbe;
///
/// struct WindowState(AtomicBool);
///
/// impl VisibilityProbe for WindowState {
///     fn is_hidden(&self) -> bool {
///         self.0.load(Ordering::Relaxed)
///     }
/// }
/// ```
pub trait VisibilityProbe: Send + Sync + 'static {
    /// Returns `true` when the host reports itself hidden.
    ///
    /// Must be side-effect free and callable any number of times.
    fn is_hidden(&self) -> bool;
}

/// Shared handle to a visibility probe.
pub type ProbeRef = Arc<dyn VisibilityProbe>;

/// Function-backed probe implementation.
///
/// Wraps a closure returning the current hidden state.
///
/// ## Example
/// ```rust
/// use repoll::{ProbeFn, ProbeRef, VisibilityProbe};
///
/// let probe: ProbeRef = ProbeFn::arc(|| false);
/// assert!(!probe.is_hidden());
/// ```
pub struct ProbeFn<F> {
    f: F,
}

impl<F> ProbeFn<F>
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    /// Creates a new function-backed probe.
    ///
    /// Prefer [`ProbeFn::arc`] when you immediately need a [`ProbeRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the probe and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

impl<F> VisibilityProbe for ProbeFn<F>
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    fn is_hidden(&self) -> bool {
        (self.f)()
    }
}
