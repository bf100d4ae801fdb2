//! # Example: bounded_with_backoff
//!
//! Demonstrates how a session retries failed attempts with jittered
//! exponential backoff, and how the consecutive-failure ceiling ends the
//! session once the endpoint stays down.
//!
//! ## Flow
//! ```text
//! Poller::run()
//!   ├─► attempt 1 → Err("boom #1")
//!   ├─► publish(PollScheduled{delay ≤ 1s, source=Failure})
//!   ├─► attempt 2 → Err("boom #2")
//!   ├─► publish(PollScheduled{delay ≤ 2s, source=Failure})
//!   ├─► attempt 3 → Ok
//!   ├─► publish(PollScheduled{delay = 1s, source=Success})
//!   └─► … until the loop quota is consumed
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example bounded_with_backoff --features logging
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use repoll::{
    LogWriter, Payload, PollOptions, Poller, Request, Subscribe, TransportError, TransportFn,
};
use tokio_util::sync::CancellationToken;

static ATTEMPTS: AtomicU64 = AtomicU64::new(0);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A transport that fails twice before the endpoint "recovers".
    let flaky = TransportFn::arc("flaky", |_req: Request, _ctx: CancellationToken| async move {
        let attempt = ATTEMPTS.fetch_add(1, Ordering::Relaxed) + 1;
        if attempt <= 2 {
            println!("[flaky] simulated failure #{attempt}");
            Err(TransportError::Failed {
                error: format!("boom #{attempt}"),
            })
        } else {
            println!("[flaky] success on attempt {attempt}");
            Ok(Payload::new(format!("attempt {attempt}")))
        }
    });

    // Three successful polls, one second apart, then done.
    let options = PollOptions::default()
        .with_delay(Duration::from_secs(1))
        .with_max_loops(3)
        .with_max_failures(5)
        .on_failure(|err| println!("[callback] attempt failed: {err}"));

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];

    let poller = Poller::new(flaky, Request::new("https://example.com/api"), options)
        .with_subscribers(subs);

    let reason = poller.run(CancellationToken::new()).await;
    println!("[main] session ended: {}", reason.as_label());
    Ok(())
}
