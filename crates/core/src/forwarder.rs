// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

//! Wire-level view of a forwarder session, as returned by the forwarder's
//! HTTP surface. The owning process handles live in `ctg-forwarder`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwarderSessionInfo {
    pub instance_id: String,
    pub instance_name: String,
    pub local_port: u16,
    pub aws_profile: String,
    pub aws_region: String,
    pub started_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForwarderStartStatus {
    Started,
    AlreadyRunning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwarderStartResponse {
    pub status: ForwarderStartStatus,
    pub instance_id: String,
    pub port: u16,
    pub instance_name: String,
}

#[cfg(test)]
#[path = "forwarder_tests.rs"]
mod tests;
