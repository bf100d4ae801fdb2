//! # Example: suspend_resume
//!
//! Demonstrates visibility-driven suspension: while the (simulated) host
//! reports itself hidden, the session arms 1-second re-checks instead of
//! real attempts, then resumes exactly where it left off.
//!
//! ## Run
//! ```bash
//! cargo run --example suspend_resume --features logging
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use repoll::{
    LogWriter, Payload, PollOptions, Poller, ProbeFn, Request, Subscribe, TransportError,
    TransportFn,
};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let hidden = Arc::new(AtomicBool::new(false));

    // Simulate the host going to the background 1.5s in, returning at 5s.
    let flag = Arc::clone(&hidden);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        println!("[host] window hidden");
        flag.store(true, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(3500)).await;
        println!("[host] window visible");
        flag.store(false, Ordering::Relaxed);
    });

    let transport = TransportFn::arc("status", |req: Request, _ctx: CancellationToken| async move {
        println!("[status] GET {}", req.url());
        Ok::<_, TransportError>(Payload::empty())
    });

    let options = PollOptions::default()
        .with_delay(Duration::from_secs(1))
        .with_max_loops(4);

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];

    let probe_flag = Arc::clone(&hidden);
    let poller = Poller::new(transport, Request::new("https://example.com/api"), options)
        .with_probe(ProbeFn::arc(move || probe_flag.load(Ordering::Relaxed)))
        .with_subscribers(subs);

    let reason = poller.run(CancellationToken::new()).await;
    println!("[main] session ended: {}", reason.as_label());
    Ok(())
}
