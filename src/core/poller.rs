//! # Poller: the polling state machine.
//!
//! Drives one session through its named states:
//!
//! ```text
//! Idle ──► Attempting ──► (success | failure) ──► Scheduled ──► Attempting ──► … ──► Terminated
//!                                                    │
//!                                                    ▼ (host hidden at timer fire)
//!                                                Suspended ──► (1000 ms re-checks) ──► Attempting
//! ```
//!
//! ## Transition rules
//! - **Idle → Attempting**: the first attempt is issued immediately on
//!   `run`, without consulting the visibility gate.
//! - **Attempting**: one request via the injected [`Transport`]; the
//!   two-variant completion result drives the [`decide`] step. Callbacks
//!   fire for every completed attempt, independent of what is decided.
//! - **Scheduled → Attempting / Suspended**: when the timer fires the
//!   visibility gate is re-evaluated; hidden means a 1000 ms re-check
//!   (uncounted), visible means the next real attempt.
//! - **Suspended**: re-checks repeat until visibility returns; counters are
//!   preserved throughout.
//! - **Terminated**: absorbing. Reached by the failure ceiling, the loop
//!   quota, or cancellation.
//!
//! ## Rules
//! - Attempts are strictly sequential; a new attempt is never issued while
//!   completion handling of the previous one is in flight.
//! - Every retry goes through the [`TimerController`], never immediate
//!   recursion.
//! - At most one timer is pending at any instant (arming supersedes).
//! - A `TransportError::Canceled` completion is a graceful session stop,
//!   not a counted failure.

use std::sync::Arc;

use tokio::{select, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::core::options::PollOptions;
use crate::core::session::{decide, Decision, PollSession};
use crate::core::timer::TimerController;
use crate::error::{StopReason, TransportError};
use crate::events::{Bus, Event, EventKind, ScheduleSource};
use crate::policies::SchedulePolicy;
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::transport::{Request, TransportRef};
use crate::visibility::{ProbeRef, VisibilityGate};

/// Named states of a polling session.
///
/// The run loop is an explicit transition table over these states, so tests
/// can reason about transitions without relying on timer mechanics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// No attempt issued yet.
    Idle,
    /// A request is in flight.
    Attempting,
    /// A real attempt is scheduled on the timer.
    Scheduled,
    /// The host is hidden; only re-check timers are armed.
    Suspended,
    /// Absorbing; no further timers are armed.
    Terminated(StopReason),
}

/// Orchestrates one polling session.
///
/// Composes the injected capabilities (transport, visibility probe) with
/// the schedule policy, counters, and timer ownership. Construction is
/// builder-style; [`Poller::run`] consumes the poller and returns the
/// session's [`StopReason`].
///
/// ## Example
/// ```no_run
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use repoll::{Payload, PollOptions, Poller, Request, TransportError, TransportFn};
///
/// # async fn demo() {
/// let transport = TransportFn::arc("status", |req: Request, _ctx: CancellationToken| async move {
///     // issue the real request here...
///     Ok::<_, TransportError>(Payload::empty())
/// });
///
/// let options = PollOptions::default()
///     .with_delay(Duration::from_secs(5))
///     .with_max_loops(15);
///
/// let poller = Poller::new(transport, Request::new("https://example.com/api"), options);
/// let reason = poller.run(CancellationToken::new()).await;
/// println!("session ended: {}", reason.as_label());
/// # }
/// ```
pub struct Poller {
    transport: TransportRef,
    request: Request,
    options: PollOptions,
    policy: SchedulePolicy,
    gate: VisibilityGate,
    bus: Bus,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl Poller {
    /// Creates a poller for the given transport, request descriptor, and
    /// options.
    ///
    /// Options are normalized here (zero values become defaults); the
    /// schedule policy's fixed cadence is taken from the normalized delay.
    pub fn new(transport: TransportRef, request: Request, options: PollOptions) -> Self {
        let options = options.normalized();
        let policy = SchedulePolicy::with_fixed(options.delay);
        let bus = Bus::new(options.bus_capacity);
        Self {
            transport,
            request,
            options,
            policy,
            gate: VisibilityGate::default(),
            bus,
            subscribers: Vec::new(),
        }
    }

    /// Attaches the host's visibility probe.
    ///
    /// Without a probe the session is never suspended.
    pub fn with_probe(mut self, probe: ProbeRef) -> Self {
        self.gate = VisibilityGate::new(probe);
        self
    }

    /// Replaces the schedule policy (cadence **and** backoff unit).
    pub fn with_policy(mut self, policy: SchedulePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive session events through dedicated workers with
    /// bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Returns a handle to the event bus (e.g. to `subscribe()` directly).
    pub fn bus(&self) -> Bus {
        self.bus.clone()
    }

    /// Returns the normalized session options.
    pub fn options(&self) -> &PollOptions {
        &self.options
    }

    /// Runs the session until termination or cancellation.
    ///
    /// ### Exit conditions
    /// - consecutive failures exceed the configured ceiling,
    /// - a bounded session reaches its loop quota,
    /// - `token` is cancelled.
    ///
    /// ### Cancellation semantics
    /// `token` is checked before each attempt and while waiting on the
    /// timer. The transport receives a child token per attempt and should
    /// bail out promptly during shutdown; an in-flight attempt that
    /// completes with [`TransportError::Canceled`] ends the session without
    /// counting as a failure.
    pub async fn run(mut self, token: CancellationToken) -> StopReason {
        let listener = self.spawn_listener();
        let name: Arc<str> = Arc::from(self.transport.name());
        let mut session = PollSession::new();
        let mut timer = TimerController::new();
        let mut state = PollState::Idle;

        let reason = loop {
            state = match state {
                PollState::Idle => PollState::Attempting,
                PollState::Attempting => self.attempt(&mut session, &mut timer, &name, &token).await,
                PollState::Scheduled => match self.await_timer(&mut timer, &token).await {
                    false => PollState::Terminated(StopReason::Canceled),
                    true if self.gate.is_suspended() => {
                        self.bus.publish(
                            Event::now(EventKind::PollerSuspended)
                                .with_session(Arc::clone(&name))
                                .with_delay(self.gate.recheck_delay()),
                        );
                        self.schedule_recheck(&mut timer, &name);
                        PollState::Suspended
                    }
                    true => PollState::Attempting,
                },
                PollState::Suspended => match self.await_timer(&mut timer, &token).await {
                    false => PollState::Terminated(StopReason::Canceled),
                    true if self.gate.is_suspended() => {
                        self.schedule_recheck(&mut timer, &name);
                        PollState::Suspended
                    }
                    true => {
                        self.bus.publish(
                            Event::now(EventKind::PollerResumed).with_session(Arc::clone(&name)),
                        );
                        PollState::Attempting
                    }
                },
                PollState::Terminated(reason) => break reason,
            };
        };

        timer.cancel_pending();
        self.bus.publish(
            Event::now(EventKind::PollerTerminated)
                .with_session(name)
                .with_attempt(session.attempts())
                .with_reason(reason.as_label()),
        );

        if let Some((stop, handle)) = listener {
            stop.cancel();
            let _ = handle.await;
        }
        reason
    }

    /// Issues one attempt and applies the scheduling decision.
    async fn attempt(
        &self,
        session: &mut PollSession,
        timer: &mut TimerController,
        name: &Arc<str>,
        token: &CancellationToken,
    ) -> PollState {
        if token.is_cancelled() {
            return PollState::Terminated(StopReason::Canceled);
        }

        let attempt = session.begin_attempt();
        self.bus.publish(
            Event::now(EventKind::AttemptStarting)
                .with_session(Arc::clone(name))
                .with_attempt(attempt),
        );

        let res = self.transport.invoke(&self.request, token.child_token()).await;
        if matches!(res, Err(TransportError::Canceled)) {
            return PollState::Terminated(StopReason::Canceled);
        }

        // Callbacks observe every completed attempt, before any scheduling
        // decision is applied.
        match &res {
            Ok(payload) => {
                if let Some(cb) = &self.options.on_success {
                    cb(payload);
                }
            }
            Err(err) => {
                if let Some(cb) = &self.options.on_failure {
                    cb(err);
                }
            }
        }

        let decision = decide(session, &self.options, &self.policy, res.is_ok());
        match &res {
            Ok(_) => self.bus.publish(
                Event::now(EventKind::AttemptSucceeded)
                    .with_session(Arc::clone(name))
                    .with_attempt(attempt),
            ),
            Err(err) => self.bus.publish(
                Event::now(EventKind::AttemptFailed)
                    .with_session(Arc::clone(name))
                    .with_attempt(attempt)
                    .with_failures(session.failures())
                    .with_reason(err.as_message()),
            ),
        }

        match decision {
            Decision::Next { delay, source } => {
                let mut ev = Event::now(EventKind::PollScheduled)
                    .with_session(Arc::clone(name))
                    .with_delay(delay)
                    .with_source(source);
                if source == ScheduleSource::Failure {
                    ev = ev.with_failures(session.failures());
                }
                self.bus.publish(ev);
                timer.arm(delay);
                PollState::Scheduled
            }
            Decision::Stop(reason) => PollState::Terminated(reason),
        }
    }

    /// Arms a visibility re-check timer and publishes the scheduling event.
    ///
    /// Re-checks are announced as `PollScheduled` with a `Recheck` source so
    /// subscribers can distinguish them from real attempt scheduling.
    fn schedule_recheck(&self, timer: &mut TimerController, name: &Arc<str>) {
        let delay = self.gate.recheck_delay();
        self.bus.publish(
            Event::now(EventKind::PollScheduled)
                .with_session(Arc::clone(name))
                .with_delay(delay)
                .with_source(ScheduleSource::Recheck),
        );
        timer.arm(delay);
    }

    /// Waits for the armed timer; `false` means the session was cancelled.
    async fn await_timer(&self, timer: &mut TimerController, token: &CancellationToken) -> bool {
        select! {
            _ = timer.fired() => true,
            _ = token.cancelled() => false,
        }
    }

    /// Spawns the subscriber fan-out listener, if any subscribers are set.
    fn spawn_listener(&mut self) -> Option<(CancellationToken, JoinHandle<()>)> {
        let subscribers = std::mem::take(&mut self.subscribers);
        if subscribers.is_empty() {
            return None;
        }

        let set = SubscriberSet::new(subscribers);
        let mut rx = self.bus.subscribe();
        let stop = CancellationToken::new();
        let stop_child = stop.clone();

        let handle = tokio::spawn(async move {
            use tokio::sync::broadcast::error::RecvError;
            loop {
                select! {
                    _ = stop_child.cancelled() => {
                        // Drain what is already buffered before shutting down
                        // so the terminal event reaches subscribers.
                        while let Ok(ev) = rx.try_recv() {
                            set.emit(&ev);
                        }
                        break;
                    }
                    ev = rx.recv() => match ev {
                        Ok(ev) => set.emit(&ev),
                        Err(RecvError::Lagged(_)) => continue,
                        Err(RecvError::Closed) => break,
                    },
                }
            }
            set.shutdown().await;
        });

        Some((stop, handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Payload, TransportFn};
    use crate::visibility::ProbeFn;

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use tokio::time::Instant;

    /// Transport that succeeds or fails per attempt based on a script fn.
    fn scripted(
        attempts: Arc<AtomicU32>,
        ok: impl Fn(u32) -> bool + Send + Sync + 'static,
    ) -> TransportRef {
        TransportFn::arc("scripted", move |_req: Request, _ctx: CancellationToken| {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            let succeed = ok(n);
            async move {
                if succeed {
                    Ok(Payload::new(format!("attempt {n}")))
                } else {
                    Err(TransportError::Failed {
                        error: format!("boom {n}"),
                    })
                }
            }
        })
    }

    fn drain(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
        let mut out = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            out.push(ev);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_session_runs_exactly_n_attempts() {
        // Scenario: 3 loops, 1s cadence, every attempt succeeds.
        let attempts = Arc::new(AtomicU32::new(0));
        let poller = Poller::new(
            scripted(Arc::clone(&attempts), |_| true),
            Request::new("https://example.com/api"),
            PollOptions::default()
                .with_delay(Duration::from_secs(1))
                .with_max_loops(3),
        );

        let start = Instant::now();
        let reason = poller.run(CancellationToken::new()).await;

        assert_eq!(reason, StopReason::LoopLimitReached);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        // Attempts at t=0s, 1s, 2s; no fourth timer armed.
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_ceiling_terminates_after_threshold() {
        // Scenario: ceiling 2, every attempt fails -> stop after the 3rd
        // consecutive failure (3 > 2).
        let attempts = Arc::new(AtomicU32::new(0));
        let poller = Poller::new(
            scripted(Arc::clone(&attempts), |_| false),
            Request::new("https://example.com/api"),
            PollOptions::default().with_max_failures(2),
        );
        let mut rx = poller.bus().subscribe();

        let reason = poller.run(CancellationToken::new()).await;

        assert_eq!(reason, StopReason::FailureThresholdExceeded);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);

        // Backoff delays stay within [0, 500ms * 2^k].
        for ev in drain(&mut rx) {
            if ev.kind == EventKind::PollScheduled {
                assert_eq!(ev.source, Some(ScheduleSource::Failure));
                let k = ev.failures.expect("failure-driven schedule has count");
                assert!(u64::from(ev.delay_ms.unwrap()) <= 500u64 << k);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn hidden_host_suspends_without_losing_counters() {
        // Scenario: attempt 1 succeeds, then the host is hidden for three
        // re-checks; attempt 2 proceeds once visibility returns.
        let attempts = Arc::new(AtomicU32::new(0));
        let hidden_checks = Arc::new(AtomicU32::new(3));
        let checks = Arc::clone(&hidden_checks);

        let poller = Poller::new(
            scripted(Arc::clone(&attempts), |_| true),
            Request::new("https://example.com/api"),
            PollOptions::default()
                .with_delay(Duration::from_secs(1))
                .with_max_loops(2),
        )
        .with_probe(ProbeFn::arc(move || {
            checks
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        }));
        let mut rx = poller.bus().subscribe();

        let start = Instant::now();
        let reason = poller.run(CancellationToken::new()).await;

        assert_eq!(reason, StopReason::LoopLimitReached);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        // t=0 attempt 1; t=1s hidden; re-checks at 2s, 3s; visible at 4s.
        assert_eq!(start.elapsed(), Duration::from_secs(4));

        let events = drain(&mut rx);
        let suspended = events
            .iter()
            .filter(|e| e.kind == EventKind::PollerSuspended)
            .count();
        let resumed = events
            .iter()
            .filter(|e| e.kind == EventKind::PollerResumed)
            .count();
        assert_eq!(suspended, 1, "suspension is announced once per episode");
        assert_eq!(resumed, 1);

        // Each re-check arming is announced as a 1000 ms Recheck schedule.
        let rechecks: Vec<_> = events
            .iter()
            .filter(|e| {
                e.kind == EventKind::PollScheduled && e.source == Some(ScheduleSource::Recheck)
            })
            .collect();
        assert_eq!(rechecks.len(), 3);
        assert!(rechecks.iter().all(|e| e.delay_ms == Some(1000)));

        // Re-checks never show up as attempts.
        let starting = events
            .iter()
            .filter(|e| e.kind == EventKind::AttemptStarting)
            .count();
        assert_eq!(starting, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn callbacks_fire_for_every_completed_attempt() {
        // Alternating outcomes; failure ceiling high enough not to trip.
        let attempts = Arc::new(AtomicU32::new(0));
        let ok_seen = Arc::new(AtomicU32::new(0));
        let err_seen = Arc::new(AtomicU32::new(0));
        let ok_count = Arc::clone(&ok_seen);
        let err_count = Arc::clone(&err_seen);

        let poller = Poller::new(
            scripted(Arc::clone(&attempts), |n| n % 2 == 1),
            Request::new("https://example.com/api"),
            PollOptions::default()
                .with_delay(Duration::from_millis(100))
                .with_max_loops(3)
                .on_success(move |_| {
                    ok_count.fetch_add(1, Ordering::SeqCst);
                })
                .on_failure(move |_| {
                    err_count.fetch_add(1, Ordering::SeqCst);
                }),
        );

        let reason = poller.run(CancellationToken::new()).await;

        assert_eq!(reason, StopReason::LoopLimitReached);
        // Failures do not consume loop slots: successes at attempts 1, 3, 5.
        assert_eq!(ok_seen.load(Ordering::SeqCst), 3);
        assert_eq!(err_seen.load(Ordering::SeqCst), 2);
        assert_eq!(
            attempts.load(Ordering::SeqCst),
            ok_seen.load(Ordering::SeqCst) + err_seen.load(Ordering::SeqCst),
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_a_waiting_session() {
        let attempts = Arc::new(AtomicU32::new(0));
        let poller = Poller::new(
            scripted(Arc::clone(&attempts), |_| true),
            Request::new("https://example.com/api"),
            PollOptions::default().with_delay(Duration::from_secs(3600)),
        );

        let token = CancellationToken::new();
        let cancel = token.clone();
        let handle = tokio::spawn(poller.run(token));

        // Let the first attempt complete and the long timer arm.
        tokio::time::sleep(Duration::from_secs(1)).await;
        cancel.cancel();

        let reason = handle.await.unwrap();
        assert_eq!(reason, StopReason::Canceled);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn canceled_transport_completion_is_not_a_counted_failure() {
        let fails = Arc::new(AtomicU32::new(0));
        let fail_count = Arc::clone(&fails);

        let transport = TransportFn::arc("cancels", |_req: Request, _ctx: CancellationToken| async {
            Err::<Payload, _>(TransportError::Canceled)
        });
        let poller = Poller::new(
            transport,
            Request::new("https://example.com/api"),
            PollOptions::default().on_failure(move |_| {
                fail_count.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let reason = poller.run(CancellationToken::new()).await;
        assert_eq!(reason, StopReason::Canceled);
        assert_eq!(fails.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn successful_cadence_is_fixed() {
        // Unbounded session; cancel from a success callback after 5 polls.
        let attempts = Arc::new(AtomicU32::new(0));
        let token = CancellationToken::new();
        let cancel = token.clone();

        let poller = Poller::new(
            scripted(Arc::clone(&attempts), |_| true),
            Request::new("https://example.com/api"),
            PollOptions::default()
                .with_delay(Duration::from_secs(10))
                .on_success(move |payload| {
                    if payload.body() == "attempt 5" {
                        cancel.cancel();
                    }
                }),
        );
        let mut rx = poller.bus().subscribe();

        let start = Instant::now();
        let reason = poller.run(token).await;

        assert_eq!(reason, StopReason::Canceled);
        assert_eq!(attempts.load(Ordering::SeqCst), 5);
        assert_eq!(start.elapsed(), Duration::from_secs(40));

        for ev in drain(&mut rx) {
            if ev.kind == EventKind::PollScheduled {
                assert_eq!(ev.source, Some(ScheduleSource::Success));
                assert_eq!(ev.delay_ms, Some(10_000));
            }
        }
    }
}
