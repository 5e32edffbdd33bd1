// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Shell-channel command execution: submit a command via the agent
//! channel, poll for its terminal status, and return captured output.

use crate::error::CloudError;
use std::time::{Duration, Instant};

/// Polling interval while a submitted command is in flight.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// Picks the document name for the target platform, case-insensitively.
pub fn document_name_for_platform(platform: &str) -> &'static str {
    if platform.eq_ignore_ascii_case("windows") {
        "AWS-RunPowerShellScript"
    } else {
        "AWS-RunShellScript"
    }
}

/// Submits `command` to `instance_id` via the given document and polls
/// until a terminal status, returning captured stdout on success or the
/// captured stderr (wrapped in [`CloudError::CommandFailed`]) on failure.
///
/// Invocation-not-yet-registered errors during polling are retried
/// silently -- the invocation record can lag slightly behind the
/// send-command acknowledgement.
pub async fn ssm_exec_output(
    client: &aws_sdk_ssm::Client,
    instance_id: &str,
    command: &str,
    document_name: &str,
    deadline: Duration,
) -> Result<String, CloudError> {
    let send_output = client
        .send_command()
        .instance_ids(instance_id)
        .document_name(document_name)
        .parameters("commands", vec![command.to_string()])
        .send()
        .await
        .map_err(|e| CloudError::SendCommand(e.to_string()))?;

    let command_id = send_output
        .command()
        .and_then(|c| c.command_id())
        .unwrap_or_default()
        .to_string();

    let start = Instant::now();
    loop {
        if start.elapsed() > deadline {
            return Err(CloudError::CommandTimedOut(command_id, deadline));
        }

        match client
            .get_command_invocation()
            .command_id(&command_id)
            .instance_id(instance_id)
            .send()
            .await
        {
            Ok(invocation) => {
                use aws_sdk_ssm::types::CommandInvocationStatus as Status;
                match invocation.status() {
                    Some(Status::Success) => {
                        return Ok(invocation
                            .standard_output_content()
                            .unwrap_or_default()
                            .to_string());
                    }
                    Some(Status::Failed) | Some(Status::Cancelled) | Some(Status::TimedOut) => {
                        return Err(CloudError::CommandFailed {
                            command_id,
                            status: invocation.status().map(|s| s.as_str().to_string()).unwrap_or_default(),
                            stderr: invocation
                                .standard_error_content()
                                .unwrap_or_default()
                                .to_string(),
                        });
                    }
                    _ => {}
                }
            }
            Err(_) => {
                // The invocation record can lag behind the send-command
                // acknowledgement; any poll error is treated as "not
                // registered yet" and retried until the deadline.
            }
        }

        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

#[cfg(test)]
#[path = "ssm_tests.rs"]
mod tests;
