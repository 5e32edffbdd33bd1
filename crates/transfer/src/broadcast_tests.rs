// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use super::*;

#[tokio::test]
async fn an_empty_target_list_returns_no_results_without_touching_the_network() {
    let results = broadcast_command(Vec::new(), "echo hi").await;
    assert!(results.is_empty());
}
