// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("scan already in progress")]
    Busy,
    #[error("no AWS profiles found in ~/.aws/credentials")]
    NoProfiles,
    #[error("instance {0} not found")]
    InstanceNotFound(String),
    #[error("scan of {0} failed: {1}")]
    ScanFailed(String, String),
}
