// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Fan a single command out to many instances at once, bounded concurrency,
//! one result per target regardless of individual failures.

use aws_config::BehaviorVersion;
use ctg_cloud::{document_name_for_platform, ssm_exec_output};
use ctg_core::{BroadcastResult, BroadcastTarget};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

const BROADCAST_DEADLINE: Duration = Duration::from_secs(2 * 60);
const MAX_CONCURRENT_TARGETS: usize = 10;

pub async fn broadcast_command(targets: Vec<BroadcastTarget>, command: &str) -> Vec<BroadcastResult> {
    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_TARGETS));
    let mut tasks = Vec::with_capacity(targets.len());

    for target in targets {
        let semaphore = Arc::clone(&semaphore);
        let command = command.to_string();

        tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            run_one(target, &command).await
        }));
    }

    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        match task.await {
            Ok(result) => results.push(result),
            Err(err) => {
                tracing::warn!(error = %err, "broadcast task panicked");
            }
        }
    }
    results
}

async fn run_one(target: BroadcastTarget, command: &str) -> BroadcastResult {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .profile_name(&target.profile)
        .region(aws_config::Region::new(target.region.clone()))
        .load()
        .await;
    let client = aws_sdk_ssm::Client::new(&config);
    let document = document_name_for_platform(&target.platform);

    match ssm_exec_output(&client, &target.instance_id, command, document, BROADCAST_DEADLINE).await {
        Ok(output) => BroadcastResult {
            instance_id: target.instance_id,
            name: target.name,
            output,
            error: String::new(),
            success: true,
        },
        Err(err) => BroadcastResult {
            instance_id: target.instance_id,
            name: target.name,
            output: String::new(),
            error: err.to_string(),
            success: false,
        },
    }
}

#[cfg(test)]
#[path = "broadcast_tests.rs"]
mod tests;
