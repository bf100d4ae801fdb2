//! # Example: poll_forever
//!
//! Demonstrates an unbounded polling session with the default fixed
//! cadence shortened for demonstration, stopped via Ctrl-C.
//!
//! ## Run
//! ```bash
//! cargo run --example poll_forever --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use repoll::{
    LogWriter, Payload, PollOptions, Poller, Request, Subscribe, TransportError, TransportFn,
};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Define a transport that pretends to fetch the endpoint.
    let transport = TransportFn::arc("status", |req: Request, _ctx: CancellationToken| async move {
        println!("[status] GET {}", req.url());
        Ok::<_, TransportError>(Payload::new("{\"ok\":true}"))
    });

    // 2. Unbounded session, one poll every 2 seconds.
    let options = PollOptions::default().with_delay(Duration::from_secs(2));

    // 3. Attach the built-in stdout logger.
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];

    let poller = Poller::new(
        transport,
        Request::new("https://example.com/api/status.json"),
        options,
    )
    .with_subscribers(subs);

    // 4. Cancel on Ctrl-C.
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        cancel.cancel();
    });

    let reason = poller.run(token).await;
    println!("[main] session ended: {}", reason.as_label());
    Ok(())
}
