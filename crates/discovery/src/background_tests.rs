// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use super::*;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn loop_exits_promptly_once_shutdown_is_signaled() {
    let dir = tempfile::tempdir().unwrap();
    let discovery = Arc::new(Discovery::new("Customer", "Environment", dir.path().join("instances.yaml")));
    let (tx, rx) = tokio::sync::watch::channel(false);

    let handle = tokio::spawn(run(discovery, 3600, rx));
    tx.send(true).unwrap();

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("background loop did not exit in time")
        .expect("background loop task panicked");
}
