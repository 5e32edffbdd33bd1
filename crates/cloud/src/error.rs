// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use std::time::Duration;

/// Failures surfaced by the cloud adapter layer. Region/profile enumeration
/// failures are swallowed upstream (a per-region skip, not an error here);
/// this enum covers what a single call site can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    #[error("failed to load AWS config for profile {profile:?} region {region:?}: {message}")]
    ConfigLoad {
        profile: String,
        region: String,
        message: String,
    },
    #[error("describe-instances failed: {0}")]
    DescribeInstances(String),
    #[error("command {command_id} ended in status {status}: {stderr}")]
    CommandFailed {
        command_id: String,
        status: String,
        stderr: String,
    },
    #[error("command {0} timed out after {1:?}")]
    CommandTimedOut(String, Duration),
    #[error("send-command failed: {0}")]
    SendCommand(String),
    #[error("no AWS profiles found in ~/.aws/credentials")]
    NoProfiles,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
