// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Background scan loop: an initial full scan at startup, then a
//! re-scan every `cache_ttl_seconds` until the gateway shuts down.

use crate::Discovery;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Runs the initial scan immediately, then ticks every `cache_ttl_seconds`
/// until `shutdown` fires. Scan failures are logged and do not stop the
/// loop -- the next tick tries again.
pub async fn run(discovery: Arc<Discovery>, cache_ttl_seconds: u64, mut shutdown: watch::Receiver<bool>) {
    if let Err(err) = discovery.scan(true, cache_ttl_seconds).await {
        tracing::warn!(error = %err, "initial scan failed");
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(cache_ttl_seconds.max(1)));
    ticker.tick().await; // first tick fires immediately; the scan above already covered it

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = discovery.scan(false, cache_ttl_seconds).await {
                    tracing::warn!(error = %err, "background scan failed");
                }
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    tracing::info!("background scan loop shutting down");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "background_tests.rs"]
mod tests;
