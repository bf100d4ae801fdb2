//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [starting] session=status attempt=1
//! [succeeded] session=status attempt=1
//! [failed] session=status err="error: boom" failures=1
//! [scheduled] session=status delay_ms=742 source=Failure
//! [suspended] session=status recheck_ms=1000
//! [resumed] session=status
//! [terminated] session=status reason="failure_threshold_exceeded"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints human-readable event
/// descriptions to stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::AttemptStarting => {
                if let (Some(session), Some(att)) = (&e.session, e.attempt) {
                    println!("[starting] session={session} attempt={att}");
                }
            }
            EventKind::AttemptSucceeded => {
                println!("[succeeded] session={:?} attempt={:?}", e.session, e.attempt);
            }
            EventKind::AttemptFailed => {
                println!(
                    "[failed] session={:?} err={:?} failures={:?}",
                    e.session, e.reason, e.failures
                );
            }
            EventKind::PollScheduled => {
                println!(
                    "[scheduled] session={:?} delay_ms={:?} source={:?}",
                    e.session, e.delay_ms, e.source
                );
            }
            EventKind::PollerSuspended => {
                println!(
                    "[suspended] session={:?} recheck_ms={:?}",
                    e.session, e.delay_ms
                );
            }
            EventKind::PollerResumed => {
                println!("[resumed] session={:?}", e.session);
            }
            EventKind::PollerTerminated => {
                println!(
                    "[terminated] session={:?} reason={:?}",
                    e.session, e.reason
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
